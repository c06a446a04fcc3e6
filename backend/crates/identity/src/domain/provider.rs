//! Identity Provider Trait
//!
//! Seam to the managed identity service. Implementations live in the
//! infrastructure layer.

use crate::domain::entity::{caller::CallerContext, user::UserRecord};
use crate::domain::value_object::id_token::IdToken;
use crate::error::IdentityResult;

#[trait_variant::make(IdentityProvider: Send)]
pub trait LocalIdentityProvider {
    /// Resolve a token to its identity record
    ///
    /// Invalid, expired or revoked tokens resolve to `Ok(None)`; `Err` is
    /// reserved for the service itself failing.
    async fn lookup(&self, token: &IdToken) -> IdentityResult<Option<UserRecord>>;

    /// Permanently remove the caller's own identity record
    async fn delete_account(&self, caller: &CallerContext) -> IdentityResult<()>;
}
