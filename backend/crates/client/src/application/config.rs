//! Client Configuration

use std::path::PathBuf;
use std::time::Duration;

use platform::config::{BackendConfig, ConfigError, REQUEST_TIMEOUT_SECS, optional, parse_or};
use platform::http_client::DEFAULT_REQUEST_TIMEOUT;

use crate::domain::persistence::Persistence;

pub const FUNCTIONS_ENDPOINT: &str = "FUNCTIONS_ENDPOINT";
pub const SESSION_STATE_DIR: &str = "SESSION_STATE_DIR";
pub const APP_CHECK_DEBUG_TOKEN: &str = "APP_CHECK_DEBUG_TOKEN";

pub const DEFAULT_FUNCTIONS_REGION: &str = "us-central1";
pub const DEFAULT_STATE_DIR: &str = ".todo-session";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL that callable names are appended to
    pub functions_endpoint: String,
    pub persistence: Persistence,
    /// Directory holding the `local` session file
    pub state_dir: PathBuf,
    pub request_timeout: Duration,
    /// Lifetime assumed for an ID token after sign-in
    pub session_ttl: Duration,
    /// Registered debug token sent instead of a real attestation
    pub app_check_debug_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            functions_endpoint: "http://127.0.0.1:5001".to_string(),
            persistence: Persistence::Local,
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            session_ttl: Duration::from_secs(3600),
            app_check_debug_token: None,
        }
    }
}

impl ClientConfig {
    /// Hosted functions endpoint of the project
    pub fn from_backend(backend: &BackendConfig) -> Self {
        Self {
            functions_endpoint: format!(
                "https://{}-{}.cloudfunctions.net",
                DEFAULT_FUNCTIONS_REGION, backend.project_id
            ),
            ..Default::default()
        }
    }

    /// Local functions emulator, session kept in memory
    pub fn development(functions_endpoint: impl Into<String>) -> Self {
        Self {
            functions_endpoint: functions_endpoint.into().trim_end_matches('/').to_string(),
            persistence: Persistence::Session,
            request_timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(endpoint) = optional(FUNCTIONS_ENDPOINT) {
            self.functions_endpoint = endpoint;
        }
        self.functions_endpoint = self.functions_endpoint.trim_end_matches('/').to_string();

        if let Some(dir) = optional(SESSION_STATE_DIR) {
            self.state_dir = PathBuf::from(dir);
        }
        self.app_check_debug_token = optional(APP_CHECK_DEBUG_TOKEN).or(self.app_check_debug_token.take());

        let secs = parse_or(REQUEST_TIMEOUT_SECS, self.request_timeout.as_secs())?;
        self.request_timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::hours(1))
    }

    /// `{endpoint}/{name}`
    pub fn callable_url(&self, name: &str) -> String {
        format!("{}/{}", self.functions_endpoint, name)
    }
}
