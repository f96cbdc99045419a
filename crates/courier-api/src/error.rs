use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use courier_types::api::ErrorResponse;

/// Everything a request can fail with. All variants are request-scoped.
///
/// Client mistakes map to 400 with a detail string. "Nothing to return"
/// (unknown provider, empty window) maps to 204 so pollers can tell
/// "try again later" apart from "fix your request".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Limit is {0}")]
    InvalidLimit(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("No such provider: {0}")]
    NoSuchProvider(String),

    #[error("No messages")]
    NoMessages,

    #[error("Unknown cursor {0}")]
    UnknownCursor(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidLimit(_)
            | ApiError::InvalidToken
            | ApiError::UnknownCursor(_)
            | ApiError::EmptyMessage => StatusCode::BAD_REQUEST,
            ApiError::NoSuchProvider(_) | ApiError::NoMessages => StatusCode::NO_CONTENT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NoSuchProvider(_) | ApiError::NoMessages | ApiError::NotFound => {
                status.into_response()
            }
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                let body = ErrorResponse {
                    detail: "Internal server error".into(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ErrorResponse {
                    detail: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
