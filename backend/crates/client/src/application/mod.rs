pub mod analytics;
pub mod app_check;
pub mod bootstrap;
pub mod config;
pub mod functions;
pub mod identity_client;
