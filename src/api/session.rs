use axum::{
    Json, Router,
    extract::{FromRequestParts, State},
    http::{StatusCode, header, request::Parts},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthError, User},
    error::{Error, Result},
    state::AppState,
};

/// 配置会话相关路由。
///
/// - `POST /login`：登录，返回 token
/// - `POST /logout`：注销当前会话
/// - `GET /me`：当前用户
pub fn setup_route() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

/// 已登录的请求方，从 `Authorization: Bearer <token>` 中解析
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub user: User,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthError::Unauthenticated)?
            .trim()
            .to_string();

        let user = state
            .sessions()
            .user(&token)
            .await
            .ok_or(AuthError::Unauthenticated)?;

        Ok(Self { token, user })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
    user: User,
}

async fn login(
    State(app): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = match app.auth().login(&req.email, &req.password).await {
        Ok(user) => user,
        Err(e) => {
            tracing::info!(email = %req.email, "login rejected");
            return Err(e.into());
        }
    };

    let token = app.sessions().create(user.clone(), app.new_dashboard()).await;
    tracing::info!(user = %user.email, role = ?user.role, "login");

    Ok(Json(LoginResponse { token, user }))
}

async fn logout(State(app): State<AppState>, current: CurrentUser) -> StatusCode {
    app.sessions().remove(&current.token).await;
    tracing::info!(user = %current.user.email, "logout");
    StatusCode::NO_CONTENT
}

async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}
