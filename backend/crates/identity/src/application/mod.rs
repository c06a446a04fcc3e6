//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod delete_account;
pub mod verify_caller;

// Re-exports
pub use config::IdentityConfig;
pub use delete_account::{DeleteAccountOutput, DeleteAccountUseCase};
pub use verify_caller::VerifyCallerUseCase;
