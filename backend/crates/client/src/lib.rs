//! Backend Client
//!
//! Process-wide handles to the managed backend, built once at startup:
//!
//! - `domain/` - Auth state, persistence policy, document paths
//! - `application/` - Identity client, callable functions client, analytics,
//!   app check, and the [`BackendClient`] bootstrap
//! - `infra/` - Session stores (file, memory)
//!
//! ## Error policy
//! - Missing configuration fails startup (`ClientError::Config`)
//! - Persistence problems are logged; the session lives in memory instead
//! - Failures while restoring a session resolve to signed-out
//! - Callable errors reach the caller with their status and message

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

pub use application::{
    analytics::Analytics, app_check::AppCheck, bootstrap::BackendClient, config::ClientConfig,
    functions::FunctionsClient, identity_client::IdentityClient,
};
pub use domain::{
    auth_state::AuthState,
    document_path::DocumentStore,
    persistence::{PersistedSession, Persistence, SessionStore},
};
pub use error::{ClientError, ClientResult};
pub use infra::{file_store::FileSessionStore, memory_store::MemorySessionStore};
