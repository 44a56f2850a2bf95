//! Unified error handling for the HTTP boundary.
//!
//! `AppError` keeps the originating `DomainError` intact so the response
//! mapping can match on its kind. Client-facing payloads use numeric codes:
//!
//! | code | meaning |
//! |------|---------|
//! | 1101 | forbidden |
//! | 2007 | input does not match the required pattern |
//! | 2008 | invalid request |
//! | 3002 | resource already exists |
//! | 4001 | database failure |
//! | 9003 | unknown error |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Error codes
// =============================================================================

pub const FORBIDDEN_CODE: u32 = 1101;
pub const MISMATCHED_PATTERN_CODE: u32 = 2007;
pub const INVALID_REQUEST_CODE: u32 = 2008;
pub const ALREADY_EXISTS_CODE: u32 = 3002;
pub const DB_ERROR_CODE: u32 = 4001;
pub const UNKNOWN_ERROR_CODE: u32 = 9003;

const ALREADY_EXISTS_MESSAGE: &str = "Resource already exists";
const FORBIDDEN_MESSAGE: &str = "Forbidden access";
#[cfg(feature = "database")]
const DB_ERROR_MESSAGE: &str = "Internal server error";
const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred. Please contact support.";

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body could not be decoded
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),
}

/// Coded error body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: u32,
    message: String,
}

/// Plain status body used for not-found and undecodable requests
#[derive(Debug, Serialize)]
struct StatusResponse {
    status: String,
}

impl AppError {
    /// Get numeric error code for client
    pub fn code(&self) -> u32 {
        match self {
            AppError::Domain(e) if e.is_pattern_mismatch() => MISMATCHED_PATTERN_CODE,
            AppError::Domain(DomainError::InvalidSearchParams(_)) => INVALID_REQUEST_CODE,
            AppError::Domain(DomainError::DuplicateEntry(_)) => ALREADY_EXISTS_CODE,
            AppError::Domain(DomainError::SystemRoleProtected) => FORBIDDEN_CODE,
            AppError::MalformedBody(_) | AppError::BadRequest(_) => INVALID_REQUEST_CODE,
            #[cfg(feature = "database")]
            AppError::Database(_) => DB_ERROR_CODE,
            _ => UNKNOWN_ERROR_CODE,
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e {
                e if e.is_pattern_mismatch() => StatusCode::BAD_REQUEST,
                DomainError::InvalidSearchParams(_) => StatusCode::BAD_REQUEST,
                DomainError::DuplicateEntry(_) => StatusCode::CONFLICT,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::SystemRoleProtected => StatusCode::FORBIDDEN,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::MalformedBody(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            #[cfg(feature = "database")]
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Domain(e) => match e {
                e if e.is_pattern_mismatch() => e.to_string(),
                DomainError::InvalidSearchParams(_) | DomainError::NotFound(_) => e.to_string(),
                DomainError::DuplicateEntry(_) => ALREADY_EXISTS_MESSAGE.to_string(),
                DomainError::SystemRoleProtected => FORBIDDEN_MESSAGE.to_string(),
                _ => UNKNOWN_ERROR_MESSAGE.to_string(),
            },
            AppError::MalformedBody(_) => "Bad Request".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            #[cfg(feature = "database")]
            AppError::Database(_) => DB_ERROR_MESSAGE.to_string(),
        }
    }

    fn log(&self) {
        if self.status().is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();

        match &self {
            AppError::Domain(DomainError::NotFound(_)) | AppError::MalformedBody(_) => {
                let body = StatusResponse {
                    status: self.user_message(),
                };
                (status, Json(body)).into_response()
            }
            _ => {
                let body = ErrorResponse {
                    code: self.code(),
                    message: self.user_message(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| DomainError::not_found(entity).into())
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    /// The domain error this wraps, if any.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
