use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{auth::AuthError, content::ValidationErrors};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not Found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    FormatError(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("duplicate article id: {0}")]
    DuplicateId(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            Error::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN").into_response(),
            Error::Auth(e) => (StatusCode::UNAUTHORIZED, e.to_string()).into_response(),
            Error::FormatError(s) => (StatusCode::BAD_REQUEST, s).into_response(),
            Error::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            e @ (Error::DuplicateId(_) | Error::Json(_) | Error::Config(_) | Error::Io(_)) => {
                tracing::error!(%e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
