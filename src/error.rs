use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Every way a request can fail. Each variant maps to exactly one status code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authentication(String),

    #[error("Refresh token is required")]
    MissingRefreshToken,

    /// Missing, malformed, badly signed or expired access token.
    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("{0}")]
    NotFound(String),

    #[error("token signing failed: {0}")]
    Signing(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Authentication(_) | AppError::MissingRefreshToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::InvalidRefreshToken => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Signing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Forbidden => (status, "Forbidden").into_response(),
            AppError::Signing(ref e) => {
                tracing::error!("token signing failed: {e}");
                (status, Json(json!({ "message": "Internal server error" }))).into_response()
            }
            other => (status, Json(json!({ "message": other.to_string() }))).into_response(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        AppError::Signing(e.to_string())
    }
}

/// Missing, mistyped or non-JSON bodies are client validation failures.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
