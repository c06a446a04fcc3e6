//! Session State
//!
//! What the guard knows about the current browser context.

use identity::Session;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Resolution has not completed yet
    #[default]
    Unresolved,
    Anonymous,
    AuthenticatedUnverified(Session),
    AuthenticatedVerified(Session),
}

impl SessionState {
    /// Classify a resolved session
    ///
    /// Expired sessions are treated as signed out.
    pub fn from_session(session: Option<Session>) -> Self {
        match session {
            None => SessionState::Anonymous,
            Some(s) if s.is_expired() => {
                tracing::debug!(uid = %s.uid, "Session expired, treating as anonymous");
                SessionState::Anonymous
            }
            Some(s) if s.is_verified() => SessionState::AuthenticatedVerified(s),
            Some(s) => SessionState::AuthenticatedUnverified(s),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::AuthenticatedUnverified(s) | SessionState::AuthenticatedVerified(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unresolved)
    }

    /// Short label for logs
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Unresolved => "unresolved",
            SessionState::Anonymous => "anonymous",
            SessionState::AuthenticatedUnverified(_) => "unverified",
            SessionState::AuthenticatedVerified(_) => "verified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use identity::{Email, IdToken, Uid, UserRecord};

    fn session(verified: bool, ttl_secs: i64) -> Session {
        let record = UserRecord::new(Uid::parse("u-1").unwrap())
            .with_email(Email::new("u@example.com").unwrap(), verified);
        Session::new(
            &record,
            IdToken::new("tok").unwrap(),
            chrono::Duration::seconds(ttl_secs),
        )
    }

    #[test]
    fn test_from_session() {
        assert_eq!(SessionState::from_session(None), SessionState::Anonymous);
        assert!(matches!(
            SessionState::from_session(Some(session(true, 60))),
            SessionState::AuthenticatedVerified(_)
        ));
        assert!(matches!(
            SessionState::from_session(Some(session(false, 60))),
            SessionState::AuthenticatedUnverified(_)
        ));
    }

    #[test]
    fn test_expired_session_is_anonymous() {
        assert_eq!(
            SessionState::from_session(Some(session(true, -5))),
            SessionState::Anonymous
        );
    }

    #[test]
    fn test_default_is_unresolved() {
        let state = SessionState::default();
        assert!(!state.is_resolved());
        assert!(state.session().is_none());
        assert_eq!(state.label(), "unresolved");
    }
}
