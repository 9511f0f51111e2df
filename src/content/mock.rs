use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::Rng;

use super::{Article, Status};

/// 默认生成的文章数量
pub const DEFAULT_COUNT: usize = 50;

const AUTHORS: [&str; 4] = ["John Doe", "Jane Smith", "Bob Johnson", "Alice Williams"];
const STATUSES: [Status; 2] = [Status::Published, Status::Draft];

/// 生成模拟文章数据
///
/// 发布时间落在 `now` 之前一年内，作者与状态随机选取。
pub fn generate<R: Rng>(count: usize, now: DateTime<Utc>, rng: &mut R) -> Vec<Article> {
    (0..count)
        .map(|i| {
            let days_ago = rng.random_range(0..365);
            let published = now - Duration::days(days_ago);

            Article {
                id: format!("article-{i}"),
                title: format!("Article Title {}", i + 1),
                author: AUTHORS[rng.random_range(0..AUTHORS.len())].to_string(),
                content: format!(
                    "This is the content of article {}. It contains some sample text for demonstration purposes.",
                    i + 1
                ),
                published_date: published.to_rfc3339_opts(SecondsFormat::Millis, true),
                views: Some(rng.random_range(0..10_000)),
                likes: Some(rng.random_range(0..500)),
                comments: Some(rng.random_range(0..200)),
                status: STATUSES[rng.random_range(0..STATUSES.len())],
            }
        })
        .collect()
}
