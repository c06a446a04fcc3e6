//! Client Error Types

use identity::IdentityError;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::config::ConfigError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Startup configuration is incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Session store could not be read or written
    #[error("Session persistence error: {0}")]
    Persistence(String),

    /// Operation needs a signed-in user
    #[error("No user is signed in")]
    NotSignedIn,

    /// Callable function answered with a structured error
    #[error("{message}")]
    Callable {
        kind: ErrorKind,
        status: String,
        message: String,
    },

    /// Functions endpoint could not be reached
    #[error("Functions endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Functions endpoint answered with something we could not decode
    #[error("Unexpected callable response (HTTP {status}): {detail}")]
    Decode { status: u16, detail: String },

    /// Malformed document path
    #[error("Invalid document path: {0}")]
    InvalidPath(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Identity(e) => e.kind(),
            ClientError::Callable { kind, .. } => *kind,
            ClientError::NotSignedIn => ErrorKind::Unauthorized,
            ClientError::InvalidPath(_) => ErrorKind::BadRequest,
            ClientError::Transport(e) if e.is_timeout() => ErrorKind::RequestTimeout,
            ClientError::Transport(_) => ErrorKind::ServiceUnavailable,
            ClientError::Config(_) | ClientError::Persistence(_) | ClientError::Decode { .. } => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Callable status string (`UNAUTHENTICATED`, `INTERNAL`, ...)
    pub fn callable_status(&self) -> &str {
        match self {
            ClientError::Callable { status, .. } => status,
            other => other.kind().callable_status(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Persistence(format!("corrupt session data: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callable_error_keeps_status_and_message() {
        let err = ClientError::Callable {
            kind: ErrorKind::Unauthorized,
            status: "UNAUTHENTICATED".into(),
            message: "Authentication required to delete an account.".into(),
        };
        assert_eq!(err.callable_status(), "UNAUTHENTICATED");
        assert_eq!(err.to_string(), "Authentication required to delete an account.");
        assert_eq!(err.to_app_error().status_code(), 401);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ClientError::NotSignedIn.kind(), ErrorKind::Unauthorized);
        assert_eq!(ClientError::NotSignedIn.callable_status(), "UNAUTHENTICATED");
        assert_eq!(
            ClientError::Persistence("disk full".into()).kind(),
            ErrorKind::InternalServerError
        );
        assert_eq!(
            ClientError::from(ConfigError::Missing("VUE_APP_FIREBASE_API_KEY")).to_string(),
            "Missing required environment variable: VUE_APP_FIREBASE_API_KEY"
        );
    }
}
