use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文章发布状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Published,
    Draft,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Published => "Published",
            Status::Draft => "Draft",
        }
    }
}

/// 一篇文章
///
/// `id` 在集合生命周期内唯一且不可变。计数字段缺失时保持缺失，
/// 只在排序或统计时按 0 处理，参见 [`Article::count`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    /// ISO-8601 字符串，原样保存
    pub published_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<u64>,
    pub status: Status,
}

/// 文章的计数字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    Likes,
    Comments,
}

impl Article {
    /// 解析后的发布时间，无法解析时返回最小时间
    pub fn published_at(&self) -> DateTime<Utc> {
        parse_datetime(&self.published_date).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// 计数字段的值，缺失按 0 计
    pub fn count(&self, counter: Counter) -> u64 {
        let value = match counter {
            Counter::Views => self.views,
            Counter::Likes => self.likes,
            Counter::Comments => self.comments,
        };
        value.unwrap_or(0)
    }
}

/// 解析时间字符串，统一转换为 UTC。
///
/// 依次尝试 RFC 3339、不带时区的日期时间（按 UTC）和纯日期（UTC 零点）。
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive_dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive_dt| naive_dt.and_utc())
}
