//! Identity Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity vocabulary (uid, email, user record, session, caller)
//!   and the provider trait
//! - `application/` - Use cases (caller verification, account deletion)
//! - `infra/` - Identity provider implementations (REST, in-memory)
//! - `presentation/` - Callable function HTTP surface
//!
//! ## Features
//! - Verification of the caller's ID token against the managed identity service
//! - `deleteCorporateAccount` callable: deletes the caller's own identity
//!
//! ## Security Model
//! - The callable never accepts a target identifier; the uid always comes
//!   from the verified token
//! - Tokens are never logged
//! - Purging client-side session data after deletion is the caller's job

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use domain::entity::{caller::CallerContext, session::Session, user::UserRecord};
pub use domain::provider::IdentityProvider;
pub use domain::value_object::{email::Email, id_token::IdToken, uid::Uid};
pub use error::{IdentityError, IdentityResult};
pub use infra::{memory::InMemoryIdentityProvider, rest::RestIdentityProvider};
pub use presentation::router::functions_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
