//! Delete Account Use Case
//!
//! Backs the `deleteCorporateAccount` callable. Deletes the caller's own
//! identity record and nothing else: the uid comes from the verified caller,
//! never from the request payload.

use std::sync::Arc;

use crate::domain::entity::caller::CallerContext;
use crate::domain::provider::IdentityProvider;
use crate::error::{IdentityError, IdentityResult};

pub const MSG_UNAUTHENTICATED: &str = "Authentication required to delete an account.";
pub const MSG_MISSING_UID: &str = "No user ID provided for deletion.";
pub const MSG_DELETED: &str = "Account deleted successfully.";

/// Delete account output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAccountOutput {
    pub success: bool,
    pub message: String,
}

pub struct DeleteAccountUseCase<P>
where
    P: IdentityProvider,
{
    provider: Arc<P>,
}

impl<P> DeleteAccountUseCase<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, caller: Option<&CallerContext>) -> IdentityResult<DeleteAccountOutput> {
        let caller =
            caller.ok_or_else(|| IdentityError::Unauthenticated(MSG_UNAUTHENTICATED.to_string()))?;

        if caller.uid.is_blank() {
            return Err(IdentityError::InvalidArgument(MSG_MISSING_UID.to_string()));
        }

        match self.provider.delete_account(caller).await {
            Ok(()) => {
                tracing::info!(uid = %caller.uid, "Successfully deleted user");
                Ok(DeleteAccountOutput {
                    success: true,
                    message: MSG_DELETED.to_string(),
                })
            }
            Err(e) => {
                tracing::error!(uid = %caller.uid, error = %e, "Error deleting user");
                Err(match e.provider_reason() {
                    Some(reason) => IdentityError::DeletionFailed(reason.to_string()),
                    None => IdentityError::DeletionFailedUnknown,
                })
            }
        }
    }
}
