//! Session Entity
//!
//! Resolved authentication state of one browser context: identity token,
//! verification flag and expiry. Owned by the client's identity handle and
//! only ever replaced as a whole.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::UserRecord;
use crate::domain::value_object::{email::Email, id_token::IdToken, uid::Uid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: Uid,
    pub email: Option<Email>,
    pub email_verified: bool,
    pub id_token: IdToken,
    /// Token expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

impl Session {
    /// Create a session for a freshly looked-up record
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(record: &UserRecord, id_token: IdToken, ttl: Duration) -> Self {
        Self {
            uid: record.uid.clone(),
            email: record.email.clone(),
            email_verified: record.email_verified,
            id_token,
            expires_at_ms: (Utc::now() + ttl).timestamp_millis(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn is_verified(&self) -> bool {
        self.email_verified
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }
}
