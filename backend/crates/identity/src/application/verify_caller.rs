//! Verify Caller Use Case
//!
//! Turns the request's ID token (if any) into a [`CallerContext`].

use std::sync::Arc;

use crate::domain::entity::caller::CallerContext;
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::id_token::IdToken;
use crate::error::IdentityResult;

pub struct VerifyCallerUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
}

impl<P> VerifyCallerUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Resolve the caller
    ///
    /// `Ok(None)` means anonymous: no token, an unknown token, or a disabled
    /// account. Only a failing identity service yields `Err`.
    pub async fn execute(&self, token: Option<IdToken>) -> IdentityResult<Option<CallerContext>> {
        let Some(token) = token else {
            return Ok(None);
        };

        let Some(record) = self.provider.lookup(&token).await? else {
            tracing::debug!("ID token did not resolve to an identity");
            return Ok(None);
        };

        if !record.can_authenticate() {
            tracing::warn!(uid = %record.uid, "Rejected token of disabled account");
            return Ok(None);
        }

        Ok(Some(CallerContext::from_record(&record, token)))
    }
}
