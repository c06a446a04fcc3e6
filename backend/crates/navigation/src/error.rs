//! Navigation Error Types

use thiserror::Error;

pub type NavigationResult<T> = Result<T, NavigationError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Redirects kept bouncing between routes
    #[error("Redirect loop while navigating to {requested} ({hops} hops)")]
    RedirectLoop { requested: String, hops: usize },

    /// Route table is unusable
    #[error("Invalid route table: {0}")]
    InvalidRouteTable(String),

    /// Unknown routing mode name
    #[error("Unknown routing mode: {0} (expected `hash` or `path`)")]
    UnknownRoutingMode(String),
}
