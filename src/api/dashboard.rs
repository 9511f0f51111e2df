use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::CurrentUser;

use crate::{
    dashboard::{DashboardView, ViewAction},
    error::Result,
    state::AppState,
};

/// 配置看板路由，视图状态保存在会话中。
///
/// - `GET /dashboard`：当前视图
/// - `POST /dashboard/actions`：执行一次 [`ViewAction`] 并返回新视图
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard_view))
        .route("/dashboard/actions", post(dashboard_action))
}

async fn dashboard_view(
    current: CurrentUser,
    State(app): State<AppState>,
) -> Result<Json<DashboardView>> {
    let store = app.store().read().await;
    let view = app
        .sessions()
        .read_session(&current.token, |s| s.dashboard.render(store.articles()))
        .await?;
    Ok(Json(view))
}

async fn dashboard_action(
    current: CurrentUser,
    State(app): State<AppState>,
    Json(action): Json<ViewAction>,
) -> Result<Json<DashboardView>> {
    tracing::debug!(user = %current.user.email, ?action, "dashboard action");

    let store = app.store().read().await;
    let view = app
        .sessions()
        .with_session(&current.token, |s| {
            s.dashboard.apply(action, store.articles());
            s.dashboard.render(store.articles())
        })
        .await?;
    Ok(Json(view))
}
