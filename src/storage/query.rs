use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{Article, Counter};

/// 每页固定的文章数量
pub const PAGE_SIZE: usize = 10;

/// 筛选条件
///
/// - `author`：`None` 表示不限作者，否则精确匹配
/// - `from` / `to`：发布时间的闭区间，任一端可缺省
/// - `search`：标题的大小写不敏感子串，空串表示不限
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub author: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub search: String,
}

impl Filter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(author) = &self.author {
            if article.author != *author {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let published = article.published_at();
            if self.from.is_some_and(|from| published < from) {
                return false;
            }
            if self.to.is_some_and(|to| published > to) {
                return false;
            }
        }

        self.search.is_empty()
            || article
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase())
    }

    /// 是否设置了任意筛选条件
    pub fn is_active(&self) -> bool {
        self.author.is_some() || self.from.is_some() || self.to.is_some() || !self.search.is_empty()
    }
}

/// 可排序字段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    PublishedDate,
    Views,
    Likes,
    Comments,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// 排序条件，默认按发布时间倒序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

/// 分页请求，页码从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: usize) -> Self {
        Self {
            page,
            size: PAGE_SIZE,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

/// 一次完整的列表查询
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleQuery {
    pub filter: Filter,
    pub sort: Sort,
    pub page: PageRequest,
}

/// 查询结果：当前页、匹配总数与总页数
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub articles: Vec<Article>,
    pub total_matched: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// 当前页在匹配结果中的位置（从 1 开始，闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl QueryResult {
    pub fn window(&self) -> Option<PageWindow> {
        if self.articles.is_empty() {
            return None;
        }
        let from = (self.page - 1) * self.page_size + 1;
        Some(PageWindow {
            from,
            to: from + self.articles.len() - 1,
            total: self.total_matched,
        })
    }
}

/// 保留满足筛选条件的文章，保持原有顺序
pub fn filter<'a>(articles: &'a [Article], filter: &Filter) -> Vec<&'a Article> {
    articles.iter().filter(|a| filter.matches(a)).collect()
}

/// 稳定排序，键相同的文章保持原有相对顺序
pub fn sort(articles: &mut [&Article], sort: Sort) {
    articles.sort_by(|a, b| {
        let ordering = match sort.field {
            SortField::PublishedDate => a.published_at().cmp(&b.published_at()),
            SortField::Views => a.count(Counter::Views).cmp(&b.count(Counter::Views)),
            SortField::Likes => a.count(Counter::Likes).cmp(&b.count(Counter::Likes)),
            SortField::Comments => a.count(Counter::Comments).cmp(&b.count(Counter::Comments)),
        };
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// 总页数，无结果时为 0
pub fn total_pages(matched: usize, size: usize) -> usize {
    matched.div_ceil(size.max(1))
}

/// 截取请求页对应的窗口，超出范围时返回空切片
pub fn paginate<'s, 'a>(sorted: &'s [&'a Article], page: PageRequest) -> &'s [&'a Article] {
    let size = page.size.max(1);
    let start = (page.page.max(1) - 1).saturating_mul(size).min(sorted.len());
    let end = start.saturating_add(size).min(sorted.len());
    &sorted[start..end]
}

/// 筛选并排序，不分页
pub fn matched<'a>(articles: &'a [Article], criteria: &Filter, order: Sort) -> Vec<&'a Article> {
    let mut matched = filter(articles, criteria);
    sort(&mut matched, order);
    matched
}

/// 执行完整的 筛选 → 排序 → 分页 流程
pub fn run(articles: &[Article], query: &ArticleQuery) -> QueryResult {
    let matched = matched(articles, &query.filter, query.sort);
    let page = paginate(&matched, query.page);

    tracing::debug!(
        total = articles.len(),
        matched = matched.len(),
        page = query.page.page,
        "article query"
    );

    QueryResult {
        articles: page.iter().map(|&a| a.clone()).collect(),
        total_matched: matched.len(),
        total_pages: total_pages(matched.len(), query.page.size),
        page: query.page.page.max(1),
        page_size: query.page.size.max(1),
    }
}

/// 全部作者（去重、按字典序），不受筛选条件影响
pub fn distinct_authors(articles: &[Article]) -> Vec<String> {
    articles
        .iter()
        .map(|a| a.author.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Status, mock};
    use chrono::TimeZone;
    use rand::{SeedableRng, rngs::StdRng};

    fn article(id: &str, author: &str, title: &str, date: &str, views: Option<u64>) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            content: "content".into(),
            published_date: date.into(),
            views,
            likes: None,
            comments: None,
            status: Status::Published,
        }
    }

    fn fixture() -> Vec<Article> {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        mock::generate(mock::DEFAULT_COUNT, now, &mut StdRng::seed_from_u64(42))
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn test_filter_is_exact_predicate() {
        let articles = fixture();
        let criteria = Filter {
            author: Some("Bob Johnson".into()),
            from: Some(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            search: "TITLE 1".into(),
        };

        let result = filter(&articles, &criteria);
        assert!(result.iter().all(|a| criteria.matches(a)));

        let expected: Vec<_> = articles.iter().filter(|a| criteria.matches(a)).collect();
        assert_eq!(result, expected);
        for a in articles.iter().filter(|a| criteria.matches(a)) {
            assert_eq!(result.iter().filter(|r| r.id == a.id).count(), 1);
        }
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let articles = vec![
            article("a", "X", "t", "2024-01-01T00:00:00Z", None),
            article("b", "X", "t", "2024-01-02T00:00:00Z", None),
            article("c", "X", "t", "2024-01-03T00:00:00Z", None),
        ];
        let criteria = Filter {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&articles, &criteria)), ["a", "b"]);

        let open_upper = Filter {
            from: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&articles, &open_upper)), ["b", "c"]);
    }

    #[test]
    fn test_unparsable_date_fails_open_as_minimum() {
        let articles = vec![
            article("bad", "X", "t", "garbage", Some(1)),
            article("ok", "X", "t", "2024-01-01T00:00:00Z", Some(1)),
        ];

        let lower = Filter {
            from: Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&articles, &lower)), ["ok"]);

        let upper = Filter {
            to: Some(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&articles, &upper)), ["bad"]);

        let mut all = filter(&articles, &Filter::default());
        sort(
            &mut all,
            Sort {
                field: SortField::PublishedDate,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(ids(&all), ["bad", "ok"]);
    }

    #[test]
    fn test_search_is_case_insensitive_on_title() {
        let articles = vec![
            article("a", "Rust Fan", "Learning Rust", "2024-01-01", None),
            article("b", "Someone", "Go tips", "2024-01-01", None),
        ];
        let criteria = Filter {
            search: "rUST".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&articles, &criteria)), ["a"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let articles = vec![
            article("a", "X", "t", "2024-01-01", Some(5)),
            article("b", "X", "t", "2024-01-01", None),
            article("c", "X", "t", "2024-01-01", Some(5)),
            article("d", "X", "t", "2024-01-01", Some(0)),
            article("e", "X", "t", "2024-01-01", Some(9)),
        ];

        let mut asc = filter(&articles, &Filter::default());
        sort(
            &mut asc,
            Sort {
                field: SortField::Views,
                order: SortOrder::Asc,
            },
        );
        assert_eq!(ids(&asc), ["b", "d", "a", "c", "e"]);

        let mut desc = filter(&articles, &Filter::default());
        sort(
            &mut desc,
            Sort {
                field: SortField::Views,
                order: SortOrder::Desc,
            },
        );
        assert_eq!(ids(&desc), ["e", "a", "c", "b", "d"]);
    }

    #[test]
    fn test_pages_reconstruct_sorted_sequence() {
        let articles = fixture();
        let query = ArticleQuery {
            sort: Sort {
                field: SortField::Likes,
                order: SortOrder::Asc,
            },
            ..Default::default()
        };

        let first = run(&articles, &query);
        assert_eq!(first.total_matched, 50);
        assert_eq!(first.total_pages, 5);

        let mut concatenated = Vec::new();
        for page in 1..=first.total_pages {
            let result = run(
                &articles,
                &ArticleQuery {
                    page: PageRequest::new(page),
                    ..query.clone()
                },
            );
            concatenated.extend(result.articles);
        }

        let expected: Vec<Article> = matched(&articles, &query.filter, query.sort)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(concatenated, expected);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
        assert_eq!(total_pages(10, PAGE_SIZE), 1);
        assert_eq!(total_pages(11, PAGE_SIZE), 2);
    }

    #[test]
    fn test_empty_result_and_out_of_range_page() {
        let articles = fixture();
        let none = run(
            &articles,
            &ArticleQuery {
                filter: Filter {
                    search: "no such title".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
        );
        assert_eq!(none.total_matched, 0);
        assert_eq!(none.total_pages, 0);
        assert!(none.articles.is_empty());
        assert_eq!(none.window(), None);

        let beyond = run(
            &articles,
            &ArticleQuery {
                page: PageRequest::new(99),
                ..Default::default()
            },
        );
        assert!(beyond.articles.is_empty());
        assert_eq!(beyond.total_pages, 5);
    }

    #[test]
    fn test_window_of_last_page() {
        let articles: Vec<_> = (0..23)
            .map(|i| article(&format!("a{i}"), "X", "t", "2024-01-01", Some(i)))
            .collect();
        let result = run(
            &articles,
            &ArticleQuery {
                page: PageRequest::new(3),
                ..Default::default()
            },
        );
        assert_eq!(
            result.window(),
            Some(PageWindow {
                from: 21,
                to: 23,
                total: 23
            })
        );
    }

    #[test]
    fn test_authors_ignore_filter_state() {
        let articles = vec![
            article("a", "Zed", "t", "2024-01-01", None),
            article("b", "Amy", "t", "2024-01-01", None),
            article("c", "Zed", "t", "2024-01-01", None),
        ];
        assert_eq!(distinct_authors(&articles), ["Amy", "Zed"]);
    }

    #[test]
    fn test_jane_smith_scenario() {
        let articles = fixture();
        let expected = articles.iter().filter(|a| a.author == "Jane Smith").count();

        let result = run(
            &articles,
            &ArticleQuery {
                filter: Filter {
                    author: Some("Jane Smith".into()),
                    ..Default::default()
                },
                sort: Sort {
                    field: SortField::Views,
                    order: SortOrder::Desc,
                },
                ..Default::default()
            },
        );

        assert_eq!(result.total_matched, expected);
        let max_views = articles
            .iter()
            .filter(|a| a.author == "Jane Smith")
            .map(|a| a.count(Counter::Views))
            .max();
        assert_eq!(result.articles.first().map(|a| a.count(Counter::Views)), max_views);
    }
}
