//! User Record Entity
//!
//! Identity record as held by the identity service.

use crate::domain::value_object::{email::Email, uid::Uid};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uid: Uid,
    pub email: Option<Email>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    /// Disabled accounts cannot authenticate
    pub disabled: bool,
}

impl UserRecord {
    pub fn new(uid: Uid) -> Self {
        Self {
            uid,
            email: None,
            email_verified: false,
            display_name: None,
            disabled: false,
        }
    }

    pub fn with_email(mut self, email: Email, verified: bool) -> Self {
        self.email = Some(email);
        self.email_verified = verified;
        self
    }

    pub fn can_authenticate(&self) -> bool {
        !self.disabled
    }
}
