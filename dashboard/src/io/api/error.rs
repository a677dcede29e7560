//! Error types for the dashboard REST client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS, ...)
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Your session has expired, please sign in again")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx answer other than 401/404
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// 2xx answer whose envelope says `success: false`
    #[error("{0}")]
    Rejected(String),

    /// Successful envelope without a `data` payload
    #[error("Response from {0} contained no data")]
    MissingData(String),

    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Id that cannot stand as a single URL path segment
    #[error("Invalid id '{0}'")]
    InvalidId(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
