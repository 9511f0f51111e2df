use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Article, Status};

/// 编辑表单提交的内容
///
/// 只覆盖标题、正文和状态，其余字段沿用原文章。
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleEdit {
    pub title: String,
    pub content: String,
    pub status: Status,
}

/// 表单校验错误，按字段给出提示
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<&'static str>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = [self.title, self.content].into_iter().flatten().collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

impl ArticleEdit {
    /// 校验标题与正文非空（去除首尾空白后）
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.title.trim().is_empty() {
            errors.title = Some("Title is required");
        }
        if self.content.trim().is_empty() {
            errors.content = Some("Content is required");
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// 将编辑内容合并到原文章上，得到完整的新记录
    pub fn apply_to(self, article: &Article) -> Article {
        Article {
            title: self.title,
            content: self.content,
            status: self.status,
            ..article.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> Article {
        Article {
            id: "article-7".into(),
            title: "Old".into(),
            author: "Bob Johnson".into(),
            content: "Old body".into(),
            published_date: "2024-01-02T03:04:05.000Z".into(),
            views: Some(42),
            likes: None,
            comments: Some(1),
            status: Status::Draft,
        }
    }

    #[test]
    fn test_validate_blank_fields() {
        let edit = ArticleEdit {
            title: "   ".into(),
            content: "".into(),
            status: Status::Draft,
        };

        let errors = edit.validate().unwrap_err();
        assert_eq!(errors.title, Some("Title is required"));
        assert_eq!(errors.content, Some("Content is required"));
        assert_eq!(errors.to_string(), "Title is required, Content is required");
    }

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let edit = ArticleEdit {
            title: "New".into(),
            content: "New body".into(),
            status: Status::Published,
        };
        assert!(edit.validate().is_ok());

        let updated = edit.apply_to(&original());
        assert_eq!(updated.id, "article-7");
        assert_eq!(updated.author, "Bob Johnson");
        assert_eq!(updated.published_date, "2024-01-02T03:04:05.000Z");
        assert_eq!(updated.views, Some(42));
        assert_eq!(updated.likes, None);
        assert_eq!(updated.title, "New");
        assert_eq!(updated.status, Status::Published);
    }
}
