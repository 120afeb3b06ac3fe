use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use refind::StoreError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("User not found. Please register first.")]
    UserNotFound,

    #[error("Incorrect password. Please try again.")]
    WrongPassword,

    #[error("Lost item not found")]
    LostItemNotFound,

    #[error("Found item not found")]
    FoundItemNotFound,

    #[error("Item {0} has already been reunited")]
    AlreadyResolved(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServerError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::EmailTaken => StatusCode::CONFLICT,
            ServerError::UserNotFound => StatusCode::NOT_FOUND,
            ServerError::WrongPassword => StatusCode::UNAUTHORIZED,
            ServerError::LostItemNotFound | ServerError::FoundItemNotFound => {
                StatusCode::NOT_FOUND
            }
            ServerError::AlreadyResolved(_) => StatusCode::CONFLICT,
            ServerError::Store(_) | ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::Authentication(_) => "AUTH_FAILED",
            ServerError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::EmailTaken => "EMAIL_TAKEN",
            ServerError::UserNotFound => "USER_NOT_FOUND",
            ServerError::WrongPassword => "WRONG_PASSWORD",
            ServerError::LostItemNotFound => "LOST_ITEM_NOT_FOUND",
            ServerError::FoundItemNotFound => "FOUND_ITEM_NOT_FOUND",
            ServerError::AlreadyResolved(_) => "ALREADY_RESOLVED",
            ServerError::Store(_) => "STORE_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::LostItemNotFound => ServerError::LostItemNotFound,
            StoreError::FoundItemNotFound => ServerError::FoundItemNotFound,
            StoreError::AlreadyResolved(id) => ServerError::AlreadyResolved(id),
            StoreError::EmailTaken => ServerError::EmailTaken,
            other => ServerError::Store(other),
        }
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
