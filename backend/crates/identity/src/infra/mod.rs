//! Infrastructure Layer
//!
//! Identity provider implementations.

pub mod memory;
pub mod rest;

pub use memory::InMemoryIdentityProvider;
pub use rest::RestIdentityProvider;
