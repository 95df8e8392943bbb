use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use crate::backend::BackendError;

/// Errors returned to the dashboard's callers as `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A backend call failed; carries the status to answer with.
    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    #[error("Login required")]
    Unauthorized,

    #[error("Unknown tab {0}")]
    UnknownTab(String),
}

impl ApiError {
    /// Maps an upstream failure, keeping the upstream status when there is one.
    pub fn backend(err: &BackendError, fallback: &str) -> Self {
        let status = err
            .status()
            .and_then(|s| StatusCode::from_u16(s.as_u16()).ok())
            .unwrap_or(StatusCode::BAD_GATEWAY);
        tracing::error!(error = %err, status = status.as_u16(), "Backend call failed");
        ApiError::Backend {
            status,
            message: err.user_message(fallback),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Backend { status, .. } => *status,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UnknownTab(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
