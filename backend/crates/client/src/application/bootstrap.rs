//! Backend Client Bootstrap
//!
//! Builds every process-wide handle exactly once from the project
//! configuration. Construction order:
//!
//! 1. HTTP client, identity client, app check, analytics, document store
//! 2. Persistence policy (a failure is logged and the session stays in memory)
//! 3. Background restore of the persisted session, which emits the first
//!    auth state

use std::sync::{Arc, Weak};

use identity::IdentityProvider;
use navigation::{GuardConfig, NavigationGuard, Navigator, RouteTable, SessionResolver};
use platform::config::BackendConfig;
use platform::http_client::build_http_client;

use crate::application::analytics::Analytics;
use crate::application::app_check::AppCheck;
use crate::application::config::ClientConfig;
use crate::application::functions::FunctionsClient;
use crate::application::identity_client::IdentityClient;
use crate::domain::auth_state::AuthState;
use crate::domain::document_path::DocumentStore;
use crate::error::ClientResult;

pub struct BackendClient<P>
where
    P: IdentityProvider,
{
    config: BackendConfig,
    identity: Arc<IdentityClient<P>>,
    documents: DocumentStore,
    analytics: Analytics,
    app_check: Arc<AppCheck>,
    functions: FunctionsClient<P>,
}

impl<P> BackendClient<P>
where
    P: IdentityProvider + Sync + 'static,
{
    /// Initialize all handles
    ///
    /// Must run inside a Tokio runtime. Only HTTP client construction can
    /// fail here; persistence problems are absorbed.
    pub async fn initialize(
        config: BackendConfig,
        provider: P,
        client_config: ClientConfig,
    ) -> ClientResult<Self> {
        let http = build_http_client(client_config.request_timeout)?;
        let identity = Arc::new(IdentityClient::new(Arc::new(provider), &client_config));
        let app_check = Arc::new(
            AppCheck::new(config.recaptcha_site_key.clone(), config.environment)
                .with_debug_token(client_config.app_check_debug_token.clone()),
        );
        let analytics = Analytics::new(config.measurement_id.clone());
        let documents = DocumentStore::new(config.project_id.clone());
        let functions = FunctionsClient::new(
            http,
            client_config.functions_endpoint.clone(),
            identity.clone(),
            app_check.clone(),
        );

        if let Err(e) = identity.set_persistence(client_config.persistence).await {
            tracing::error!(
                persistence = %client_config.persistence,
                error = %e,
                "Error setting auth persistence"
            );
        }

        let restoring = identity.clone();
        tokio::spawn(async move {
            restoring.restore().await;
        });

        tracing::info!(
            project_id = %config.project_id,
            auth_domain = %config.auth_domain,
            functions = %functions.endpoint(),
            "Backend client initialized"
        );

        Ok(Self {
            config,
            identity,
            documents,
            analytics,
            app_check,
            functions,
        })
    }

    /// Build a navigator whose session cache follows this client's auth state
    ///
    /// Must be called inside a Tokio runtime.
    pub fn navigator(&self, guard: GuardConfig) -> Navigator<IdentityClient<P>> {
        let resolver = Arc::new(SessionResolver::with_timeout(
            self.identity.clone(),
            guard.resolve_timeout,
        ));
        self.follow_auth_changes(Arc::downgrade(&resolver));
        Navigator::new(RouteTable::default(), NavigationGuard::new(guard), resolver)
    }

    fn follow_auth_changes(&self, resolver: Weak<SessionResolver<IdentityClient<P>>>) {
        let mut rx = self.identity.on_auth_state_changed();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let AuthState::Ready(session) = rx.borrow_and_update().clone() else {
                    continue;
                };
                let Some(resolver) = resolver.upgrade() else {
                    break;
                };
                resolver.set_session(session);
            }
        });
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn identity(&self) -> &Arc<IdentityClient<P>> {
        &self.identity
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn app_check(&self) -> &AppCheck {
        &self.app_check
    }

    pub fn functions(&self) -> &FunctionsClient<P> {
        &self.functions
    }
}
