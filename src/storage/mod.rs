pub mod query;
pub mod stats;
mod store;

use std::{path::Path, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;

pub use self::{
    query::{ArticleQuery, Filter, PageRequest, QueryResult, Sort, SortField, SortOrder},
    stats::{Granularity, PerformancePoint},
    store::ArticleStore,
};

use crate::{
    content::{Article, mock},
    error::Result,
};

/// 在各请求间共享的文章集合
pub type SharedStore = Arc<RwLock<ArticleStore>>;

/// 从 JSON 文件加载文章集合
///
/// 文件内容为文章数组，字段名与序列化格式一致。
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ArticleStore> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let articles: Vec<Article> = serde_json::from_str(&content)?;
    tracing::info!(path = %path.as_ref().display(), count = articles.len(), "articles loaded");
    ArticleStore::new(articles)
}

/// 生成 `count` 篇模拟文章
pub fn mock_store(count: usize) -> ArticleStore {
    let articles = mock::generate(count, Utc::now(), &mut rand::rng());
    tracing::info!(count, "mock articles generated");
    // 模拟数据的 id 由序号生成，不会重复
    ArticleStore::new(articles).unwrap_or_default()
}
