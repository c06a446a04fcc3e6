//! Active session store, selected by the persistence policy.

use std::path::Path;

use crate::domain::persistence::{PersistedSession, Persistence, SessionStore};
use crate::error::ClientResult;
use crate::infra::{file_store::FileSessionStore, memory_store::MemorySessionStore};

#[derive(Debug, Clone)]
pub enum ActiveStore {
    File(FileSessionStore),
    Memory(MemorySessionStore),
    Disabled,
}

impl Default for ActiveStore {
    fn default() -> Self {
        ActiveStore::Memory(MemorySessionStore::new())
    }
}

impl ActiveStore {
    /// Build the store for a policy
    pub async fn for_persistence(persistence: Persistence, state_dir: &Path) -> ClientResult<Self> {
        Ok(match persistence {
            Persistence::Local => ActiveStore::File(FileSessionStore::open(state_dir).await?),
            Persistence::Session => ActiveStore::Memory(MemorySessionStore::new()),
            Persistence::None => ActiveStore::Disabled,
        })
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ActiveStore::File(_) => "file",
            ActiveStore::Memory(_) => "memory",
            ActiveStore::Disabled => "disabled",
        }
    }
}

impl SessionStore for ActiveStore {
    async fn load(&self) -> ClientResult<Option<PersistedSession>> {
        match self {
            ActiveStore::File(store) => store.load().await,
            ActiveStore::Memory(store) => store.load().await,
            ActiveStore::Disabled => Ok(None),
        }
    }

    async fn save(&self, session: &PersistedSession) -> ClientResult<()> {
        match self {
            ActiveStore::File(store) => store.save(session).await,
            ActiveStore::Memory(store) => store.save(session).await,
            ActiveStore::Disabled => Ok(()),
        }
    }

    async fn clear(&self) -> ClientResult<()> {
        match self {
            ActiveStore::File(store) => store.clear().await,
            ActiveStore::Memory(store) => store.clear().await,
            ActiveStore::Disabled => Ok(()),
        }
    }
}
