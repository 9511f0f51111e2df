use std::{
    fmt,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{content::Article, error::Result};

/// CSV 中的单个值
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    /// 缺失值，输出为空字段
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Unsigned(n) => write!(f, "{n}"),
            Cell::Float(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Unsigned(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<Option<u64>> for Cell {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(n) => Cell::Unsigned(n),
            None => Cell::Empty,
        }
    }
}

/// 一行记录：有序的（列名，值）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Cell)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

/// 将记录序列化为 CSV 文本
///
/// 表头取自第一条记录的列名；文本值总是加双引号，其余值原样输出；
/// 行之间以 `\n` 分隔，末尾不带空行。空输入返回空串。
pub fn to_csv(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        tracing::debug!("export requested with no records");
        return String::new();
    };

    let header = first
        .fields
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let rows = records.iter().map(|record| {
        record
            .fields
            .iter()
            .map(|(_, cell)| cell.to_string())
            .collect::<Vec<_>>()
            .join(",")
    });

    std::iter::once(header).chain(rows).collect::<Vec<_>>().join("\n")
}

/// 待下载的 CSV 文件
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

impl CsvExport {
    pub const CONTENT_TYPE: &'static str = "text/csv;charset=utf-8";

    pub fn new(stem: &str, records: &[Record]) -> Self {
        Self {
            file_name: format!("{stem}.csv"),
            content: to_csv(records),
        }
    }

    /// `Content-Disposition` 头，提示浏览器以附件下载
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// 写入到目录 `dir` 下，返回文件路径
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        tracing::info!(path = %path.display(), "csv exported");
        Ok(path)
    }
}

/// 文章导出的固定列
pub fn article_record(article: &Article) -> Record {
    Record::new()
        .field("Title", article.title.as_str())
        .field("Author", article.author.as_str())
        .field("Published Date", article.published_date.as_str())
        .field("Views", article.views)
        .field("Likes", article.likes)
        .field("Comments", article.comments)
        .field("Status", article.status.as_str())
}

/// 导出筛选并排序后的文章（不分页），文件名带上导出日期
pub fn export_articles<'a>(
    articles: impl IntoIterator<Item = &'a Article>,
    date: NaiveDate,
) -> CsvExport {
    let records: Vec<Record> = articles.into_iter().map(article_record).collect();
    let stem = format!("articles-{}", date.format("%Y-%m-%d"));
    CsvExport::new(&stem, &records)
}
