//! Caller Context
//!
//! Identity of the authenticated caller of a callable function, derived from
//! the request's ID token. Never built from request payload data.

use crate::domain::entity::user::UserRecord;
use crate::domain::value_object::{id_token::IdToken, uid::Uid};

#[derive(Debug, Clone)]
pub struct CallerContext {
    pub uid: Uid,
    pub email_verified: bool,
    pub token: IdToken,
}

impl CallerContext {
    pub fn from_record(record: &UserRecord, token: IdToken) -> Self {
        Self {
            uid: record.uid.clone(),
            email_verified: record.email_verified,
            token,
        }
    }
}
