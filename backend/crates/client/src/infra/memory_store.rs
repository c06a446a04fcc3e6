//! In-memory session store, used for `session` persistence and as the
//! fallback when the file store cannot be opened.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::persistence::{PersistedSession, SessionStore};
use crate::error::ClientResult;

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<RwLock<Option<PersistedSession>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> ClientResult<Option<PersistedSession>> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, session: &PersistedSession) -> ClientResult<()> {
        *self.slot.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}
