use std::collections::HashSet;

use crate::{
    content::Article,
    error::{Error, Result},
};

/// 内存中的文章集合
///
/// 唯一的修改操作是 [`ArticleStore::replace_by_id`]，修改立即对后续读取可见。
#[derive(Debug, Default, Clone)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    /// 创建集合，`id` 重复时返回 [`Error::DuplicateId`]
    pub fn new(articles: Vec<Article>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(articles.len());
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                return Err(Error::DuplicateId(article.id.clone()));
            }
        }

        Ok(Self { articles })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// 用 `updated` 整体替换 `id` 相同的文章
    ///
    /// 找不到时集合保持不变，返回 `false`。
    pub fn replace_by_id(&mut self, updated: Article) -> bool {
        match self.articles.iter_mut().find(|a| a.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => {
                tracing::debug!(id = %updated.id, "replace target not found");
                false
            }
        }
    }
}
