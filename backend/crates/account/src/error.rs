//! Account Error Types
//!
//! This module provides account-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Account-specific result type alias
pub type AccountResult<T> = Result<T, AccountError>;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email is already registered")]
    EmailTaken,

    /// Wrong email or wrong password; deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    #[error("Invalid reset code")]
    InvalidResetCode,

    #[error("Reset code expired")]
    ResetCodeExpired,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::UserNotFound => ErrorKind::NotFound,
            AccountError::EmailTaken => ErrorKind::Conflict,
            AccountError::InvalidCredentials => ErrorKind::Unauthorized,
            AccountError::InvalidEmail(_)
            | AccountError::InvalidName(_)
            | AccountError::PasswordValidation(_) => ErrorKind::BadRequest,
            AccountError::InvalidResetCode => ErrorKind::Unauthorized,
            AccountError::ResetCodeExpired => ErrorKind::Gone,
            AccountError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => ErrorKind::ServiceUnavailable,
            AccountError::Database(_) | AccountError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Client-facing error; server-side details stay in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            AccountError::Database(_) if self.kind() == ErrorKind::ServiceUnavailable => {
                AppError::service_unavailable("Database unavailable")
                    .with_action("Retry the request")
            }
            AccountError::Database(_) | AccountError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AccountError::EmailTaken => {
                AppError::conflict(self.to_string()).with_action("Sign in instead")
            }
            AccountError::ResetCodeExpired => {
                AppError::gone(self.to_string()).with_action("Request a new reset code")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AccountError::Database(e) => {
                tracing::error!(error = %e, "Account database error");
            }
            AccountError::Internal(msg) => {
                tracing::error!(message = %msg, "Account internal error");
            }
            AccountError::InvalidCredentials => {
                tracing::warn!("Invalid credential check");
            }
            AccountError::InvalidResetCode => {
                tracing::warn!("Invalid reset code submitted");
            }
            _ => {
                tracing::debug!(error = %self, "Account error");
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccountError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AccountError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AccountError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AccountError::ResetCodeExpired.status_code(), StatusCode::GONE);
        assert_eq!(
            AccountError::PasswordValidation("too short".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_errors_hide_details() {
        let err = AccountError::from(sqlx::Error::RowNotFound);
        let app = err.to_app_error();
        assert_eq!(app.kind(), ErrorKind::InternalServerError);
        assert_eq!(app.message(), "Internal server error");

        let err = AccountError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_app_error().action(), Some("Retry the request"));
    }
}
