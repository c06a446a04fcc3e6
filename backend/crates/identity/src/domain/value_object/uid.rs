//! Uid Value Object
//!
//! The identity service's user identifier. Opaque string, not a UUID.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Maximum uid length accepted by the identity service
const UID_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Create a uid with validation
    pub fn parse(uid: impl Into<String>) -> AppResult<Self> {
        let uid = uid.into().trim().to_string();

        if uid.is_empty() {
            return Err(AppError::bad_request("User ID cannot be empty"));
        }

        if uid.len() > UID_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "User ID must be at most {} characters",
                UID_MAX_LENGTH
            )));
        }

        Ok(Self(uid))
    }

    /// Wrap a value reported by the identity service (not re-validated)
    pub fn from_provider(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the identity service handed back an empty identifier
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
