//! Session Persistence
//!
//! Where the signed-in session survives between page loads (process runs).

use std::str::FromStr;

use chrono::Utc;
use identity::{IdToken, Session, Uid};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Persistence policy for the signed-in session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// Survives restarts (file on disk)
    #[default]
    Local,
    /// Lives as long as this process
    Session,
    /// Never stored
    None,
}

impl Persistence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Persistence::Local => "local",
            Persistence::Session => "session",
            Persistence::None => "none",
        }
    }
}

impl std::fmt::Display for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persistence {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Persistence::Local),
            "session" => Ok(Persistence::Session),
            "none" => Ok(Persistence::None),
            other => Err(ClientError::Persistence(format!(
                "unknown persistence `{other}` (expected local, session or none)"
            ))),
        }
    }
}

/// What gets written to the store
///
/// Only the token is authoritative; the uid is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub uid: Uid,
    pub id_token: IdToken,
    pub saved_at_ms: i64,
}

impl PersistedSession {
    pub fn from_session(session: &Session) -> Self {
        Self {
            uid: session.uid.clone(),
            id_token: session.id_token.clone(),
            saved_at_ms: Utc::now().timestamp_millis(),
        }
    }
}

#[trait_variant::make(SessionStore: Send)]
pub trait LocalSessionStore {
    async fn load(&self) -> ClientResult<Option<PersistedSession>>;

    async fn save(&self, session: &PersistedSession) -> ClientResult<()>;

    async fn clear(&self) -> ClientResult<()>;
}
