//! Domain Layer
//!
//! Contains entities, value objects, and the identity provider trait.

pub mod entity;
pub mod provider;
pub mod value_object;

// Re-exports
pub use entity::{caller::CallerContext, session::Session, user::UserRecord};
pub use provider::IdentityProvider;
