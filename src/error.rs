//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the error conditions the API can hit, from persistence faults to
//! failed authentication.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handler errors
//! convert into HTTP responses automatically. Responses carry the message as a
//! plaintext body. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, and
//! `bcrypt::BcryptError` allow propagation with the `?` operator.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or invalid request body (HTTP 400).
    BadRequest(String),
    /// Missing, invalid, or expired credentials (HTTP 401).
    Unauthorized(String),
    /// An operation matched no row owned by the caller (HTTP 403).
    /// Deliberately covers both "does not exist" and "not yours".
    Forbidden(String),
    /// Duplicate email or an unclassified write failure during
    /// registration (HTTP 409).
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Error originating from database operations (HTTP 500).
    /// Wraps errors from the `sqlx` crate.
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg) => msg.clone(),
        };
        HttpResponse::build(self.status_code()).body(message)
    }
}

/// Converts `sqlx::Error` into `AppError::DatabaseError`.
///
/// Callers that need a different mapping (registration collapses every write
/// failure into `Conflict`) do it at the store level instead.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Validation failures are client errors; the taxonomy maps them to 400.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

/// Token processing failures (bad signature, wrong algorithm, expiry).
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}

/// Hashing failures are always server-side faults.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
