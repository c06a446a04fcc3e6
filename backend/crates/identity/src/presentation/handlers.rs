//! Callable Handlers

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use std::sync::Arc;

use crate::application::DeleteAccountUseCase;
use crate::domain::entity::caller::CallerContext;
use crate::domain::provider::IdentityProvider;
use crate::error::{IdentityError, IdentityResult};
use crate::presentation::dto::{CallableRequest, CallableResponse, DeleteAccountResponse};

/// Shared state for callable handlers
pub struct FunctionsState<P> {
    pub provider: Arc<P>,
}

impl<P> Clone for FunctionsState<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
        }
    }
}

/// POST /deleteCorporateAccount
///
/// The payload is accepted but ignored: the account deleted is always the
/// caller's.
pub async fn delete_corporate_account<P>(
    State(state): State<FunctionsState<P>>,
    Extension(caller): Extension<Option<CallerContext>>,
    request: Result<Json<CallableRequest>, JsonRejection>,
) -> IdentityResult<Json<CallableResponse<DeleteAccountResponse>>>
where
    P: IdentityProvider + Send + Sync + 'static,
{
    let Json(request) = request.map_err(|e| {
        IdentityError::InvalidArgument(format!("Request body must be a callable envelope: {e}"))
    })?;

    if !request.data.is_null() {
        tracing::debug!("Ignoring payload supplied to deleteCorporateAccount");
    }

    let use_case = DeleteAccountUseCase::new(state.provider.clone());
    let output = use_case.execute(caller.as_ref()).await?;

    Ok(Json(CallableResponse {
        result: DeleteAccountResponse {
            success: output.success,
            message: output.message,
        },
    }))
}
