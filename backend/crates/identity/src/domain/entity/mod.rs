//! Entity Module

pub mod caller;
pub mod session;
pub mod user;
