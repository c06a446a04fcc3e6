//! In-Memory Identity Provider
//!
//! Stands in for the identity service in tests and offline runs. Tokens are
//! issued explicitly by the test/operator; there is no sign-in flow.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::entity::{caller::CallerContext, user::UserRecord};
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::{id_token::IdToken, uid::Uid};
use crate::error::{IdentityError, IdentityResult};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uid, UserRecord>,
    tokens: HashMap<String, Uid>,
}

#[derive(Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<MemoryState>>,
    next_token: Arc<AtomicU64>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record
    pub async fn insert_user(&self, record: UserRecord) {
        self.state
            .write()
            .await
            .users
            .insert(record.uid.clone(), record);
    }

    /// Issue a fresh token for an existing user
    pub async fn issue_token(&self, uid: &Uid) -> Option<IdToken> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(uid) {
            return None;
        }
        let n = self.next_token.fetch_add(1, Ordering::Relaxed);
        let raw = format!("mem.{uid}.{n}");
        state.tokens.insert(raw.clone(), uid.clone());
        IdToken::new(raw)
    }

    pub async fn set_email_verified(&self, uid: &Uid, verified: bool) -> bool {
        match self.state.write().await.users.get_mut(uid) {
            Some(record) => {
                record.email_verified = verified;
                true
            }
            None => false,
        }
    }

    pub async fn contains(&self, uid: &Uid) -> bool {
        self.state.read().await.users.contains_key(uid)
    }
}

impl IdentityProvider for InMemoryIdentityProvider {
    async fn lookup(&self, token: &IdToken) -> IdentityResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .tokens
            .get(token.expose())
            .and_then(|uid| state.users.get(uid))
            .cloned())
    }

    async fn delete_account(&self, caller: &CallerContext) -> IdentityResult<()> {
        let mut state = self.state.write().await;

        if state.users.remove(&caller.uid).is_none() {
            return Err(IdentityError::Provider {
                code: Some("auth/user-not-found".to_string()),
                message: "There is no user record corresponding to the provided identifier."
                    .to_string(),
            });
        }

        state.tokens.retain(|_, uid| uid != &caller.uid);
        Ok(())
    }
}
