//! Navigation Module
//!
//! Gates client-side route transitions on the resolved session.
//!
//! - `route` - Static route table and routing modes (hash / path)
//! - `state` - Session states as seen by the guard
//! - `guard` - The decision table: allow, redirect to login, redirect home
//! - `resolver` - One-shot session resolution with a cached result
//! - `navigator` - Route matching + guard + redirect following
//!
//! ## Flow
//! A transition first awaits the resolver (only the first call per cold
//! start actually waits on the identity service), then matches the target
//! against the route table and evaluates the guard. Guard evaluation itself
//! is synchronous and side-effect free.

pub mod error;
pub mod guard;
pub mod navigator;
pub mod resolver;
pub mod route;
pub mod state;

pub use error::{NavigationError, NavigationResult};
pub use guard::{GuardConfig, GuardDecision, NavigationGuard};
pub use navigator::{NavigationOutcome, Navigator};
pub use resolver::{AuthStateSource, SessionResolver};
pub use route::{RouteDescriptor, RouteTable, RoutingMode};
pub use state::SessionState;
