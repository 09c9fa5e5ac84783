//! Social Error Types
//!
//! Relationship conflicts are not errors; they are reported as
//! [`Outcome`](crate::domain::outcome::Outcome) values. What remains here
//! are missing resources, invalid input and storage failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type SocialResult<T> = Result<T, SocialError>;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    /// Rejected title or content
    #[error("Invalid post: {0}")]
    InvalidPost(String),

    /// The edge or post store failed; nothing was committed
    #[error("Storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SocialError {
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        SocialError::Storage(Box::new(err))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SocialError::UserNotFound | SocialError::PostNotFound => StatusCode::NOT_FOUND,
            SocialError::InvalidPost(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SocialError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            SocialError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SocialError::UserNotFound | SocialError::PostNotFound => ErrorKind::NotFound,
            SocialError::InvalidPost(_) => ErrorKind::UnprocessableEntity,
            SocialError::Storage(_) => ErrorKind::ServiceUnavailable,
            SocialError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Client-facing error; storage details stay in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            SocialError::Storage(_) => AppError::service_unavailable("Storage unavailable")
                .with_action("Retry the request"),
            SocialError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            SocialError::Storage(e) => {
                tracing::error!(error = %e, "Social storage error");
            }
            SocialError::Internal(msg) => {
                tracing::error!(message = %msg, "Social internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Social request rejected");
            }
        }
    }
}

impl From<sqlx::Error> for SocialError {
    fn from(err: sqlx::Error) -> Self {
        SocialError::storage(err)
    }
}

impl From<SocialError> for AppError {
    fn from(err: SocialError) -> Self {
        err.to_app_error()
    }
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
