//! Caller Middleware
//!
//! Verifies the request's ID token and stores `Option<CallerContext>` in
//! the request extensions for downstream handlers.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::{extract_app_check_token, extract_bearer_token};

use crate::application::VerifyCallerUseCase;
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::id_token::IdToken;
use crate::presentation::handlers::FunctionsState;

/// Returned when the identity service can't be asked about the caller
pub const VERIFICATION_FAILED_MESSAGE: &str = "Unable to verify the caller's credentials.";

/// Resolve the caller but don't require one
///
/// Anonymous requests continue with `None`; handlers decide whether that is
/// acceptable. Only an identity service failure short-circuits, and it is
/// reported as `INTERNAL` without the underlying detail.
pub async fn resolve_caller<P>(
    State(state): State<FunctionsState<P>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    P: IdentityProvider + Send + Sync + 'static,
{
    let headers = req.headers();

    let token = extract_bearer_token(headers).and_then(IdToken::new);
    if extract_app_check_token(headers).is_none() {
        tracing::debug!("Callable request without app check token");
    }

    let use_case = VerifyCallerUseCase::new(state.provider.clone());
    let caller = match use_case.execute(token).await {
        Ok(caller) => caller,
        Err(e) => {
            tracing::error!(error = %e, kind = ?e.kind(), "Caller verification failed");
            return AppError::internal(VERIFICATION_FAILED_MESSAGE).into_response();
        }
    };

    if let Some(caller) = &caller {
        tracing::debug!(uid = %caller.uid, "Callable caller resolved");
    }

    req.extensions_mut().insert(caller);
    next.run(req).await
}
