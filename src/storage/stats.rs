use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::{Article, Counter, parse_datetime};

/// 统计粒度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Daily,
    Monthly,
}

impl Granularity {
    fn key_format(self) -> &'static str {
        match self {
            Granularity::Daily => "%Y-%m-%d",
            Granularity::Monthly => "%Y-%m",
        }
    }
}

/// 某一天（或某一月）的汇总数据
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerformancePoint {
    pub date: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
}

/// 按发布日期汇总浏览、点赞与评论数，结果按日期升序
///
/// 发布时间无法解析的文章不参与统计。
pub fn aggregate<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    granularity: Granularity,
) -> Vec<PerformancePoint> {
    let mut points = BTreeMap::<String, PerformancePoint>::new();

    for article in articles {
        let Some(published) = parse_datetime(&article.published_date) else {
            tracing::debug!(id = %article.id, "skip article with unparsable date");
            continue;
        };

        let key = published.format(granularity.key_format()).to_string();
        let point = points.entry(key.clone()).or_insert_with(|| PerformancePoint {
            date: key,
            ..Default::default()
        });
        point.views = point.views.saturating_add(article.count(Counter::Views));
        point.likes = point.likes.saturating_add(article.count(Counter::Likes));
        point.comments = point.comments.saturating_add(article.count(Counter::Comments));
    }

    points.into_values().collect()
}
