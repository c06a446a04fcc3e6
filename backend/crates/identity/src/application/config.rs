//! Application Configuration
//!
//! Configuration for talking to the managed identity service.

use std::time::Duration;

use platform::config::{BackendConfig, ConfigError, REQUEST_TIMEOUT_SECS, optional, parse_or};
use platform::http_client::DEFAULT_REQUEST_TIMEOUT;

pub const IDENTITY_ENDPOINT: &str = "IDENTITY_ENDPOINT";
pub const IDENTITY_ADMIN_TOKEN: &str = "IDENTITY_ADMIN_TOKEN";

pub const DEFAULT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

/// Identity application configuration
#[derive(Clone)]
pub struct IdentityConfig {
    /// Base URL of the identity REST API (no trailing slash)
    pub endpoint: String,
    /// Web API key of the project
    pub api_key: String,
    /// Project identifier
    pub project_id: String,
    /// Admin bearer used for server-side deletion by uid
    pub admin_token: Option<String>,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            project_id: String::new(),
            admin_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("endpoint", &self.endpoint)
            .field("project_id", &self.project_id)
            .field("admin_token", &self.admin_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl IdentityConfig {
    /// Derive from the backend project configuration
    pub fn from_backend(backend: &BackendConfig) -> Self {
        Self {
            api_key: backend.api_key.clone(),
            project_id: backend.project_id.clone(),
            ..Default::default()
        }
    }

    /// Apply the optional `IDENTITY_*` / `REQUEST_TIMEOUT_SECS` variables
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(endpoint) = optional(IDENTITY_ENDPOINT) {
            self.endpoint = endpoint;
        }
        self.endpoint = self.endpoint.trim_end_matches('/').to_string();
        self.admin_token = optional(IDENTITY_ADMIN_TOKEN).or(self.admin_token.take());

        let secs = parse_or(REQUEST_TIMEOUT_SECS, self.request_timeout.as_secs())?;
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Create config pointing at a local endpoint (emulator, test server)
    pub fn local(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: "local-api-key".to_string(),
            project_id: "local-project".to_string(),
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }
}
