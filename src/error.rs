use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Business and storage failures for country operations.
///
/// Validation is fail-fast: the first violated rule terminates the operation,
/// naming the offending field or code.
#[derive(Error, Debug)]
pub enum CountryError {
    #[error("country code '{code}' is invalid: {reason}")]
    InvalidCode { code: String, reason: String },

    #[error("country '{code}' not found")]
    NotFound { code: String },

    #[error("country code '{code}' is duplicated")]
    DuplicatedCode { code: String },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl CountryError {
    pub fn invalid_code(code: impl Into<String>, reason: impl Into<String>) -> Self {
        CountryError::InvalidCode {
            code: code.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        CountryError::NotFound { code: code.into() }
    }

    pub fn duplicated(code: impl Into<String>) -> Self {
        CountryError::DuplicatedCode { code: code.into() }
    }
}

impl IntoResponse for CountryError {
    fn into_response(self) -> Response {
        let status = match &self {
            CountryError::InvalidCode { .. } => StatusCode::BAD_REQUEST,
            CountryError::NotFound { .. } => StatusCode::NOT_FOUND,
            CountryError::DuplicatedCode { .. } => StatusCode::CONFLICT,
            CountryError::Storage(e) => {
                tracing::error!("storage failure: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}
