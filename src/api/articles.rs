use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::CurrentUser;

use crate::{
    content::{Article, ArticleEdit, parse_datetime},
    error::{Error, Result},
    export::{self, CsvExport},
    state::AppState,
    storage::{
        ArticleQuery, Filter, Granularity, PageRequest, PerformancePoint, QueryResult, Sort,
        SortField, SortOrder, query, stats,
    },
};

/// 配置文章相关路由。
///
/// 路由包括：
/// - `GET /articles`：筛选、排序后的分页列表
/// - `GET /articles/export`：导出筛选结果为 CSV
/// - `GET /articles/{id}`：获取单篇文章
/// - `PUT /articles/{id}`：编辑文章（仅管理员）
/// - `GET /authors`：全部作者
/// - `GET /stats`：按日或按月的汇总数据
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/articles", get(articles_list))
        .route("/articles/export", get(articles_export))
        .route("/articles/{id}", get(article).put(article_update))
        .route("/authors", get(author_list))
        .route("/stats", get(article_stats))
}

/// 查询参数，用于文章列表的筛选、排序和分页。
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    author: Option<String>,
    from: Option<String>,
    to: Option<String>,
    search: String,
    sort: SortField,
    order: SortOrder,
    page: usize,
    mode: Granularity,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            author: None,
            from: None,
            to: None,
            search: Default::default(),
            sort: Default::default(),
            order: Default::default(),
            page: 1,
            mode: Default::default(),
        }
    }
}

impl QueryParams {
    fn filter(&self) -> Result<Filter> {
        Ok(Filter {
            author: self.author.clone().filter(|a| !a.is_empty()),
            from: parse_bound(self.from.as_deref())?,
            to: parse_bound(self.to.as_deref())?,
            search: self.search.clone(),
        })
    }

    fn sort(&self) -> Sort {
        Sort {
            field: self.sort,
            order: self.order,
        }
    }

    fn query(&self) -> Result<ArticleQuery> {
        Ok(ArticleQuery {
            filter: self.filter()?,
            sort: self.sort(),
            page: PageRequest::new(self.page),
        })
    }
}

/// 解析日期边界，空串视为不限
fn parse_bound(value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse_datetime(v)
            .map(Some)
            .ok_or_else(|| Error::FormatError(format!("invalid date: {v}"))),
    }
}

/// 获取文章列表。
///
/// 返回当前页的 [`QueryResult`]。
async fn articles_list(
    _user: CurrentUser,
    Query(params): Query<QueryParams>,
    State(app): State<AppState>,
) -> Result<Json<QueryResult>> {
    let query = params.query()?;
    let store = app.store().read().await;
    Ok(Json(query::run(store.articles(), &query)))
}

/// 根据 id 获取单篇文章。
async fn article(
    _user: CurrentUser,
    Path(id): Path<String>,
    State(app): State<AppState>,
) -> Result<Json<Article>> {
    let store = app.store().read().await;
    store.get(&id).cloned().map(Json).ok_or(Error::NotFound)
}

/// 编辑文章。
///
/// 仅管理员可用；校验失败返回 [`Error::Validation`]。
async fn article_update(
    current: CurrentUser,
    Path(id): Path<String>,
    State(app): State<AppState>,
    Json(edit): Json<ArticleEdit>,
) -> Result<Json<Article>> {
    if !current.user.can_edit() {
        return Err(Error::Forbidden);
    }
    edit.validate()?;

    let mut store = app.store().write().await;
    let updated = edit.apply_to(store.get(&id).ok_or(Error::NotFound)?);
    store.replace_by_id(updated.clone());

    tracing::info!(%id, user = %current.user.email, "article updated");
    Ok(Json(updated))
}

/// 导出筛选并排序后的全部文章（忽略分页）。
async fn articles_export(
    _user: CurrentUser,
    Query(params): Query<QueryParams>,
    State(app): State<AppState>,
) -> Result<impl IntoResponse> {
    let filter = params.filter()?;
    let store = app.store().read().await;
    let matched = query::matched(store.articles(), &filter, params.sort());
    let csv = export::export_articles(matched, Utc::now().date_naive());

    tracing::info!(file = %csv.file_name, "articles exported");

    Ok((
        [
            (header::CONTENT_TYPE, CsvExport::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, csv.content_disposition()),
        ],
        csv.content,
    ))
}

/// 获取全部作者，不受筛选条件影响。
async fn author_list(_user: CurrentUser, State(app): State<AppState>) -> Json<Vec<String>> {
    let store = app.store().read().await;
    Json(query::distinct_authors(store.articles()))
}

/// 获取筛选结果的汇总数据，`mode` 为 `daily` 或 `monthly`。
async fn article_stats(
    _user: CurrentUser,
    Query(params): Query<QueryParams>,
    State(app): State<AppState>,
) -> Result<Json<Vec<PerformancePoint>>> {
    let filter = params.filter()?;
    let store = app.store().read().await;
    let matched = query::matched(store.articles(), &filter, params.sort());
    Ok(Json(stats::aggregate(matched, params.mode)))
}
