//! 单个会话的看板视图状态。
//!
//! 搜索词经过 [`Debouncer`] 防抖后才参与查询，其余条件立即生效。

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    content::Article,
    debounce::Debouncer,
    storage::{
        ArticleQuery, Filter, PageRequest, QueryResult, Sort, SortField,
        query::{self, PageWindow},
    },
};

/// 看板的即时状态（不含搜索词）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewState {
    pub author: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub sort: Sort,
    pub page: usize,
}

/// 看板上的一次用户操作
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ViewAction {
    Search { text: String },
    Author { author: Option<String> },
    DateRange {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    ClearDateRange,
    ClearFilters,
    Sort { field: SortField },
    Page { page: usize },
    NextPage,
    PrevPage,
}

/// 渲染给前端的完整视图
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub state: ViewState,
    /// 尚未生效的搜索输入
    pub search_input: String,
    /// 已生效（防抖后）的搜索词
    pub search: String,
    pub has_active_filters: bool,
    pub authors: Vec<String>,
    pub window: Option<PageWindow>,
    pub result: QueryResult,
}

#[derive(Debug)]
pub struct Dashboard {
    state: ViewState,
    search_input: String,
    search: Debouncer<String>,
}

impl Dashboard {
    pub fn new(search_delay: Duration) -> Self {
        Self {
            state: ViewState {
                page: 1,
                ..Default::default()
            },
            search_input: String::new(),
            search: Debouncer::new(String::new(), search_delay),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// 当前生效的查询条件
    pub fn query(&self) -> ArticleQuery {
        ArticleQuery {
            filter: Filter {
                author: self.state.author.clone(),
                from: self.state.from,
                to: self.state.to,
                search: self.search.get(),
            },
            sort: self.state.sort,
            page: PageRequest::new(self.state.page),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.search_input.is_empty() || self.query().filter.is_active()
    }

    /// 应用一次操作。翻页需要知道总页数，因此传入当前文章集合。
    pub fn apply(&mut self, action: ViewAction, articles: &[Article]) {
        match action {
            ViewAction::Search { text } => {
                self.search_input = text.clone();
                self.search.push(text);
            }
            ViewAction::Author { author } => {
                self.state.author = author.filter(|a| !a.is_empty());
            }
            ViewAction::DateRange { from, to } => {
                self.state.from = from;
                self.state.to = to;
            }
            ViewAction::ClearDateRange => {
                self.state.from = None;
                self.state.to = None;
            }
            ViewAction::ClearFilters => {
                self.search_input.clear();
                self.search.reset(String::new());
                self.state.author = None;
                self.state.from = None;
                self.state.to = None;
            }
            ViewAction::Sort { field } => {
                self.state.sort = if self.state.sort.field == field {
                    Sort {
                        field,
                        order: self.state.sort.order.reversed(),
                    }
                } else {
                    Sort {
                        field,
                        ..Default::default()
                    }
                };
            }
            ViewAction::Page { page } => self.state.page = page.max(1),
            ViewAction::PrevPage => self.state.page = self.state.page.saturating_sub(1).max(1),
            ViewAction::NextPage => {
                let query = self.query();
                let matched = query::matched(articles, &query.filter, query.sort).len();
                let total = query::total_pages(matched, query.page.size);
                self.state.page = (self.state.page + 1).min(total.max(1));
            }
        }
    }

    pub fn render(&self, articles: &[Article]) -> DashboardView {
        let query = self.query();
        let result = query::run(articles, &query);

        DashboardView {
            state: self.state.clone(),
            search_input: self.search_input.clone(),
            has_active_filters: self.has_active_filters(),
            search: query.filter.search,
            authors: query::distinct_authors(articles),
            window: result.window(),
            result,
        }
    }
}
