//! Auth State
//!
//! Value broadcast to auth-state subscribers. Starts `Pending` on cold start
//! and becomes `Ready` once the persisted session has been checked.

use identity::Session;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Persisted session not checked yet
    #[default]
    Pending,
    /// Signed in (`Some`) or signed out (`None`)
    Ready(Option<Session>),
}

impl AuthState {
    pub fn is_ready(&self) -> bool {
        matches!(self, AuthState::Ready(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Ready(session) => session.as_ref(),
            AuthState::Pending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_has_no_session() {
        let state = AuthState::default();
        assert!(!state.is_ready());
        assert!(state.session().is_none());
        assert!(AuthState::Ready(None).is_ready());
    }
}
