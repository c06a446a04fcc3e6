//! Identity Client
//!
//! Process-wide handle to the identity service: owns the single session slot,
//! broadcasts auth-state changes and applies the persistence policy.
//!
//! The slot is a `watch` channel. Its only writers are the methods below;
//! everything else reads or subscribes.

use std::path::PathBuf;
use std::sync::Arc;

use identity::{IdToken, IdentityError, IdentityProvider, IdentityResult, Session};
use navigation::AuthStateSource;
use tokio::sync::{RwLock, watch};

use crate::application::config::ClientConfig;
use crate::domain::auth_state::AuthState;
use crate::domain::persistence::{PersistedSession, Persistence, SessionStore};
use crate::error::{ClientError, ClientResult};
use crate::infra::store::ActiveStore;

struct StoreState {
    persistence: Persistence,
    store: ActiveStore,
}

pub struct IdentityClient<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
    state: watch::Sender<AuthState>,
    store: RwLock<StoreState>,
    state_dir: PathBuf,
    session_ttl: chrono::Duration,
}

impl<P> IdentityClient<P>
where
    P: IdentityProvider + Sync,
{
    /// Create a client with an in-memory store; the auth state stays
    /// `Pending` until [`restore`](Self::restore) runs
    pub fn new(provider: Arc<P>, config: &ClientConfig) -> Self {
        let (state, _) = watch::channel(AuthState::Pending);
        Self {
            provider,
            state,
            store: RwLock::new(StoreState {
                persistence: Persistence::Session,
                store: ActiveStore::default(),
            }),
            state_dir: config.state_dir.clone(),
            session_ttl: config.session_ttl_chrono(),
        }
    }

    /// Switch the persistence policy
    ///
    /// On failure the session keeps living in memory for this run and the
    /// error is returned for the caller to log.
    pub async fn set_persistence(&self, persistence: Persistence) -> ClientResult<()> {
        let result = ActiveStore::for_persistence(persistence, &self.state_dir).await;
        let mut guard = self.store.write().await;

        match result {
            Ok(store) => {
                if let Some(session) = self.current_user() {
                    if let Err(e) = store.save(&PersistedSession::from_session(&session)).await {
                        tracing::warn!(error = %e, "Could not carry session over to new store");
                    }
                }
                tracing::info!(
                    persistence = %persistence,
                    store = store.describe(),
                    "Auth persistence set"
                );
                *guard = StoreState { persistence, store };
                Ok(())
            }
            Err(e) => {
                if !matches!(guard.store, ActiveStore::Memory(_)) {
                    *guard = StoreState {
                        persistence: Persistence::Session,
                        store: ActiveStore::default(),
                    };
                }
                Err(e)
            }
        }
    }

    pub async fn persistence(&self) -> Persistence {
        self.store.read().await.persistence
    }

    /// Check the persisted session and emit the first auth state
    ///
    /// Never fails: an unreadable store or an unreachable identity service
    /// emits signed-out.
    pub async fn restore(&self) -> Option<Session> {
        let persisted = match self.store.read().await.store.load().await {
            Ok(persisted) => persisted,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted session");
                None
            }
        };

        let session = match persisted {
            None => None,
            Some(persisted) => match self.lookup_session(persisted.id_token).await {
                Ok(Some(session)) => Some(session),
                Ok(None) => {
                    tracing::debug!(uid = %persisted.uid, "Persisted session is no longer valid");
                    self.clear_store().await;
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Could not verify persisted session, continuing signed out");
                    None
                }
            },
        };

        // A sign-in that finished first wins
        let emitted = self.state.send_if_modified(|state| {
            if state.is_ready() {
                return false;
            }
            *state = AuthState::Ready(session.clone());
            true
        });
        if emitted {
            tracing::info!(signed_in = session.is_some(), "Auth state restored");
        }
        self.current_user()
    }

    /// Subscribe to auth-state changes
    pub fn on_auth_state_changed(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn auth_state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Signed-in session, read synchronously
    pub fn current_user(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    pub fn id_token(&self) -> Option<IdToken> {
        self.state.borrow().session().map(|s| s.id_token.clone())
    }

    /// Adopt an ID token issued by the identity service
    pub async fn sign_in_with_id_token(&self, token: IdToken) -> ClientResult<Session> {
        let Some(session) = self.lookup_session(token).await? else {
            return Err(IdentityError::Unauthenticated("Invalid or expired ID token.".into()).into());
        };

        self.persist(&session).await;
        tracing::info!(uid = %session.uid, verified = session.email_verified, "Signed in");
        self.publish(Some(session.clone()));
        Ok(session)
    }

    /// Drop the session locally and from the store
    pub async fn sign_out(&self) -> ClientResult<()> {
        let uid = self.current_user().map(|s| s.uid);
        self.publish(None);
        self.store.read().await.store.clear().await?;
        tracing::info!(uid = ?uid.as_ref().map(|u| u.as_str()), "Signed out");
        Ok(())
    }

    /// Re-read the signed-in user's record (e.g. after email verification)
    pub async fn reload(&self) -> ClientResult<Option<Session>> {
        let token = self.id_token().ok_or(ClientError::NotSignedIn)?;

        match self.lookup_session(token).await? {
            Some(session) => {
                self.persist(&session).await;
                self.publish(Some(session.clone()));
                Ok(Some(session))
            }
            None => {
                tracing::info!("Session no longer valid on reload");
                self.sign_out().await?;
                Ok(None)
            }
        }
    }

    async fn lookup_session(&self, token: IdToken) -> ClientResult<Option<Session>> {
        let record = self.provider.lookup(&token).await?;
        Ok(record
            .filter(|r| r.can_authenticate())
            .map(|r| Session::new(&r, token, self.session_ttl)))
    }

    async fn persist(&self, session: &Session) {
        let persisted = PersistedSession::from_session(session);
        if let Err(e) = self.store.read().await.store.save(&persisted).await {
            tracing::warn!(error = %e, "Could not persist session, keeping it in memory");
        }
    }

    async fn clear_store(&self) {
        if let Err(e) = self.store.read().await.store.clear().await {
            tracing::warn!(error = %e, "Could not clear persisted session");
        }
    }

    fn publish(&self, session: Option<Session>) {
        self.state.send_replace(AuthState::Ready(session));
    }
}

impl<P> AuthStateSource for IdentityClient<P>
where
    P: IdentityProvider + Sync,
{
    /// Wait for the first `Ready` state, then drop the subscription
    async fn first_auth_state(&self) -> IdentityResult<Option<Session>> {
        let mut rx = self.state.subscribe();
        let session = match rx.wait_for(AuthState::is_ready).await {
            Ok(state) => state.session().cloned(),
            Err(_) => return Err(IdentityError::Internal("auth state channel closed".into())),
        };
        Ok(session)
    }
}
