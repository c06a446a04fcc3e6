//! Session Resolver
//!
//! Waits for the identity service's first auth-state emission exactly once
//! per cold start, then serves the cached session synchronously.
//!
//! Concurrent navigations issued before the first emission all await the
//! same resolution. A failing or silent identity service resolves to
//! anonymous after `timeout`; navigation never hangs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use identity::{IdentityResult, Session};
use tokio::sync::OnceCell;

use crate::guard::DEFAULT_RESOLVE_TIMEOUT;
use crate::state::SessionState;

/// One-shot source of the initial auth state
///
/// Implementations subscribe to auth-state changes, capture the first
/// emitted value and unsubscribe.
#[trait_variant::make(AuthStateSource: Send)]
pub trait LocalAuthStateSource {
    async fn first_auth_state(&self) -> IdentityResult<Option<Session>>;
}

pub struct SessionResolver<S>
where
    S: AuthStateSource,
{
    source: Arc<S>,
    resolved: OnceCell<()>,
    cache: RwLock<SessionState>,
    timeout: Duration,
    resolutions: AtomicUsize,
}

impl<S> SessionResolver<S>
where
    S: AuthStateSource + Sync,
{
    pub fn new(source: Arc<S>) -> Self {
        Self::with_timeout(source, DEFAULT_RESOLVE_TIMEOUT)
    }

    pub fn with_timeout(source: Arc<S>, timeout: Duration) -> Self {
        Self {
            source,
            resolved: OnceCell::new(),
            cache: RwLock::new(SessionState::Unresolved),
            timeout,
            resolutions: AtomicUsize::new(0),
        }
    }

    /// Resolve the session, waiting on the source only the first time
    pub async fn resolve(&self) -> SessionState {
        self.resolved
            .get_or_init(|| async {
                let session = self.fetch_first().await;
                self.store_initial(session);
            })
            .await;

        self.current()
    }

    async fn fetch_first(&self) -> Option<Session> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);

        match tokio::time::timeout(self.timeout, self.source.first_auth_state()).await {
            Ok(Ok(session)) => {
                tracing::debug!(signed_in = session.is_some(), "Initial auth state resolved");
                session
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Session resolution failed, continuing as anonymous");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Session resolution timed out, continuing as anonymous"
                );
                None
            }
        }
    }

    // A session set while resolution was in flight is newer; keep it
    fn store_initial(&self, session: Option<Session>) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if !cache.is_resolved() {
            *cache = SessionState::from_session(session);
        }
    }

    /// Cached state, read synchronously
    ///
    /// A cached session that has since expired reads as anonymous.
    pub fn current(&self) -> SessionState {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        match cache.session() {
            Some(session) if session.is_expired() => SessionState::Anonymous,
            _ => cache.clone(),
        }
    }

    /// Record a later auth change (sign-in, sign-out, reload)
    pub fn set_session(&self, session: Option<Session>) {
        let state = SessionState::from_session(session);
        tracing::debug!(session = state.label(), "Session cache updated");
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    /// Number of times the source has been consulted
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
