//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Environment configuration for the managed backend project
//! - Credential extraction from incoming requests (bearer token, cookie)
//! - HTTP client construction for the backend REST APIs

pub mod client;
pub mod config;
pub mod cookie;
pub mod http_client;
