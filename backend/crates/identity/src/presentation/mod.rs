//! Presentation Layer
//!
//! Callable function protocol: DTOs, handlers, caller middleware, router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::FunctionsState;
pub use middleware::resolve_caller;
pub use router::{DELETE_ACCOUNT_FUNCTION, functions_router};
