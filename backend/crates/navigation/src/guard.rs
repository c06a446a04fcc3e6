//! Navigation Guard
//!
//! Pure decision function: given the target route and the session state,
//! allow the transition or redirect it. Never mutates the session.

use std::time::Duration;

use crate::route::{
    LOGIN_PATH, REGISTER_PATH, RESET_PASSWORD_PATH, ROOT_PATH, RouteDescriptor, RoutingMode,
    TASKS_PATH,
};
use crate::state::SessionState;

/// Default bound on the first session resolution
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GuardDecision {
    #[display("allow")]
    Allow,
    #[display("redirect to {_0}")]
    RedirectToLogin(String),
    #[display("redirect to {_0}")]
    RedirectToHome(String),
}

impl GuardDecision {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin(p) | GuardDecision::RedirectToHome(p) => Some(p),
        }
    }
}

/// Guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// When false, any signed-in session passes auth-required routes
    pub verification_required: bool,
    pub routing_mode: RoutingMode,
    pub resolve_timeout: Duration,
    pub login_path: String,
    /// Authenticated landing route
    pub home_path: String,
    /// Pages a signed-out visitor may always reach
    pub auth_pages: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            verification_required: true,
            routing_mode: RoutingMode::Hash,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            login_path: LOGIN_PATH.to_string(),
            home_path: TASKS_PATH.to_string(),
            auth_pages: vec![
                LOGIN_PATH.to_string(),
                REGISTER_PATH.to_string(),
                RESET_PASSWORD_PATH.to_string(),
            ],
        }
    }
}

impl GuardConfig {
    pub fn with_verification_required(mut self, required: bool) -> Self {
        self.verification_required = required;
        self
    }

    pub fn with_routing_mode(mut self, mode: RoutingMode) -> Self {
        self.routing_mode = mode;
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationGuard {
    config: GuardConfig,
}

impl NavigationGuard {
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn is_auth_page(&self, path: &str) -> bool {
        self.config.auth_pages.iter().any(|p| p == path)
    }

    /// Whether the state satisfies auth-required routes
    pub fn is_verified(&self, state: &SessionState) -> bool {
        match state {
            SessionState::AuthenticatedVerified(_) => true,
            SessionState::AuthenticatedUnverified(_) => !self.config.verification_required,
            // Unresolved should never get here; treated as signed out
            SessionState::Unresolved | SessionState::Anonymous => false,
        }
    }

    /// Evaluate the decision table
    ///
    /// | requires auth | verified | target               | outcome          |
    /// |---------------|----------|----------------------|------------------|
    /// | yes           | no       | not an auth page     | redirect login   |
    /// | yes           | no       | auth page            | allow            |
    /// | yes           | yes      | any                  | allow            |
    /// | no            | yes      | auth page or root    | redirect home    |
    /// | no            | any      | anything else        | allow            |
    pub fn decide(&self, path: &str, requires_auth: bool, state: &SessionState) -> GuardDecision {
        let verified = self.is_verified(state);

        let decision = if requires_auth {
            if verified || self.is_auth_page(path) {
                GuardDecision::Allow
            } else {
                GuardDecision::RedirectToLogin(self.config.login_path.clone())
            }
        } else if verified && (self.is_auth_page(path) || path == ROOT_PATH) {
            GuardDecision::RedirectToHome(self.config.home_path.clone())
        } else {
            GuardDecision::Allow
        };

        tracing::trace!(
            path = %path,
            requires_auth,
            session = state.label(),
            decision = %decision,
            "Guard evaluated"
        );

        decision
    }

    pub fn decide_route(&self, route: &RouteDescriptor, state: &SessionState) -> GuardDecision {
        self.decide(&route.path, route.requires_auth, state)
    }
}
