//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` returned by every HTTP handler.
//! Lower layers (token validation, the task and user services, the stores) report
//! failures through their own closed error enums; the `From` implementations at the
//! bottom of this file translate those into `AppError` so handlers can use `?`.
//!
//! `AppError` implements `actix_web::error::ResponseError` and always renders a JSON
//! body of the form `{"error": "<message>"}`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::services::{TaskError, UserError};

/// Represents all errors that can be reported to an HTTP client.
#[derive(Debug)]
pub enum AppError {
    /// Missing, malformed, expired or forged credentials (HTTP 401).
    Unauthorized(String),
    /// Authenticated, but the caller's role does not permit the operation (HTTP 403).
    Forbidden(String),
    /// Malformed request or failed input validation (HTTP 400).
    BadRequest(String),
    /// The addressed task or user does not exist (HTTP 404).
    NotFound(String),
    /// The resource already exists. Reported as HTTP 400 to stay compatible with
    /// existing clients of the registration endpoint.
    Conflict(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// A store failure (HTTP 500). The message is a generic one; backend detail is
    /// only logged.
    DatabaseError(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::InternalServerError(msg)
            | AppError::DatabaseError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.message()
        }))
    }
}

/// Token failures of any kind are an authentication failure for the client; only a
/// signing failure is our fault.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Signing(msg) => {
                log::error!("Failed to sign token: {}", msg);
                AppError::InternalServerError("failed to issue token".into())
            }
            _ => AppError::Unauthorized("invalid token".into()),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(error: TaskError) -> AppError {
        match error {
            TaskError::EmptyTitle | TaskError::EmptyDescription => {
                AppError::BadRequest(error.to_string())
            }
            TaskError::NotFound(_) => AppError::NotFound("task not found".into()),
            TaskError::Store(e) => {
                log::error!("Task store failure: {}", e);
                AppError::DatabaseError("task store unavailable".into())
            }
        }
    }
}

impl From<UserError> for AppError {
    fn from(error: UserError) -> AppError {
        match error {
            UserError::InvalidInput(_) => AppError::BadRequest("invalid data".into()),
            UserError::UsernameTaken => AppError::Conflict(error.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(error.to_string()),
            UserError::NotFound => AppError::NotFound(error.to_string()),
            UserError::Hashing(e) => {
                log::error!("Password hashing failure: {}", e);
                AppError::InternalServerError("failed to process credentials".into())
            }
            UserError::Token(e) => e.into(),
            UserError::Store(e) => {
                log::error!("User store failure: {}", e);
                AppError::DatabaseError("user store unavailable".into())
            }
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::BadRequest`.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::RepositoryError;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Forbidden("admin access only".into());
        assert_eq!(error.error_response().status(), 403);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Conflict("username is already taken".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for error in [
            TokenError::Malformed("bad".into()),
            TokenError::InvalidSignature,
            TokenError::Expired,
        ] {
            let app_error: AppError = error.into();
            assert_eq!(app_error.status_code(), StatusCode::UNAUTHORIZED);
        }

        let app_error: AppError = TokenError::Signing("no key".into()).into();
        assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_detail_is_not_leaked() {
        let app_error: AppError =
            TaskError::Store(RepositoryError::Backend("connection refused at 10.0.0.3".into()))
                .into();
        assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!app_error.message().contains("10.0.0.3"));
    }

    #[test]
    fn test_user_error_mapping() {
        let app_error: AppError = UserError::UsernameTaken.into();
        assert_eq!(app_error.status_code(), StatusCode::BAD_REQUEST);

        let app_error: AppError = UserError::InvalidCredentials.into();
        assert_eq!(app_error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(app_error.message(), "invalid credentials");

        let app_error: AppError = UserError::NotFound.into();
        assert_eq!(app_error.status_code(), StatusCode::NOT_FOUND);
    }
}
