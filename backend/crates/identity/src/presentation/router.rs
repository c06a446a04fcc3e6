//! Functions Router

use axum::{Router, middleware, routing::post};
use std::sync::Arc;

use crate::domain::provider::IdentityProvider;
use crate::presentation::handlers::{self, FunctionsState};
use crate::presentation::middleware::resolve_caller;

/// Name under which the deletion callable is exposed
pub const DELETE_ACCOUNT_FUNCTION: &str = "deleteCorporateAccount";

/// Create the callable functions router for any provider implementation
pub fn functions_router<P>(provider: P) -> Router
where
    P: IdentityProvider + Send + Sync + 'static,
{
    let state = FunctionsState {
        provider: Arc::new(provider),
    };

    Router::new()
        .route(
            &format!("/{DELETE_ACCOUNT_FUNCTION}"),
            post(handlers::delete_corporate_account::<P>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_caller::<P>,
        ))
        .with_state(state)
}
