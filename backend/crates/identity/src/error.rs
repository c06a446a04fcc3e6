//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. The `Display` text of the caller-facing
//! variants is exactly the message returned by the callable function.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Request carried no verifiable identity
    #[error("{0}")]
    Unauthenticated(String),

    /// Request was malformed or lacked a required value
    #[error("{0}")]
    InvalidArgument(String),

    /// Deletion rejected by the identity service with a reported reason
    #[error("Failed to delete account: {0}")]
    DeletionFailed(String),

    /// Deletion failed without a usable reason
    #[error("An unknown error occurred during account deletion.")]
    DeletionFailedUnknown,

    /// Identity service answered with an error body
    #[error("Identity provider error: {message}")]
    Provider {
        code: Option<String>,
        message: String,
    },

    /// Identity service could not be reached
    ///
    /// The request URL is stripped: it carries the project's API key.
    #[error("Identity provider unreachable: {0}")]
    Transport(reqwest::Error),

    /// Identity service answered with something we could not decode
    #[error("Unexpected identity provider response: {0}")]
    Decode(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Unauthenticated(_) => ErrorKind::Unauthorized,
            IdentityError::InvalidArgument(_) => ErrorKind::BadRequest,
            IdentityError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            IdentityError::Transport(_) => ErrorKind::ServiceUnavailable,
            IdentityError::DeletionFailed(_)
            | IdentityError::DeletionFailedUnknown
            | IdentityError::Provider { .. }
            | IdentityError::Decode(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Reason reported by the identity service, when it gave one
    ///
    /// Only provider errors that carry both a code and a message qualify.
    pub fn provider_reason(&self) -> Option<&str> {
        match self {
            IdentityError::Provider {
                code: Some(_),
                message,
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Transport(e) => {
                tracing::error!(error = %e, "Identity provider unreachable");
            }
            IdentityError::Provider { code, message } => {
                tracing::error!(code = ?code, message = %message, "Identity provider error");
            }
            IdentityError::DeletionFailed(_)
            | IdentityError::DeletionFailedUnknown
            | IdentityError::Decode(_)
            | IdentityError::Internal(_) => {
                tracing::error!(error = %self, "Identity internal error");
            }
            IdentityError::Unauthenticated(_) => {
                tracing::warn!(error = %self, "Unauthenticated callable request");
            }
            IdentityError::InvalidArgument(_) => {
                tracing::debug!(error = %self, "Invalid callable request");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::Transport(err.without_url())
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::Unauthorized => IdentityError::Unauthenticated(err.message().to_string()),
            ErrorKind::BadRequest => IdentityError::InvalidArgument(err.message().to_string()),
            _ => IdentityError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            IdentityError::Unauthenticated("x".into()).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            IdentityError::InvalidArgument("x".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(
            IdentityError::DeletionFailedUnknown.kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_deletion_messages() {
        assert_eq!(
            IdentityError::DeletionFailed("USER_NOT_FOUND".into()).to_string(),
            "Failed to delete account: USER_NOT_FOUND"
        );
        assert_eq!(
            IdentityError::DeletionFailedUnknown.to_string(),
            "An unknown error occurred during account deletion."
        );
    }

    #[test]
    fn test_provider_reason_requires_code_and_message() {
        let with_code = IdentityError::Provider {
            code: Some("400".into()),
            message: "USER_NOT_FOUND".into(),
        };
        assert_eq!(with_code.provider_reason(), Some("USER_NOT_FOUND"));

        let without_code = IdentityError::Provider {
            code: None,
            message: "boom".into(),
        };
        assert_eq!(without_code.provider_reason(), None);

        assert_eq!(IdentityError::Decode("x".into()).provider_reason(), None);
    }

    #[test]
    fn test_from_app_error() {
        let err: IdentityError = AppError::bad_request("Invalid uid").into();
        assert!(matches!(err, IdentityError::InvalidArgument(m) if m == "Invalid uid"));
    }
}
