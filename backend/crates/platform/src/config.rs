//! Backend Project Configuration
//!
//! Loads the fixed set of environment variables that identify the managed
//! backend project. Every variable in [`REQUIRED_VARS`] must be present and
//! non-blank; a gap is a startup-time configuration error, never a runtime
//! fault.

use std::fmt::Display;
use std::str::FromStr;

pub const API_KEY: &str = "VUE_APP_FIREBASE_API_KEY";
pub const AUTH_DOMAIN: &str = "VUE_APP_FIREBASE_AUTH_DOMAIN";
pub const PROJECT_ID: &str = "VUE_APP_FIREBASE_PROJECT_ID";
pub const STORAGE_BUCKET: &str = "VUE_APP_FIREBASE_STORAGE_BUCKET";
pub const MESSAGING_SENDER_ID: &str = "VUE_APP_FIREBASE_MESSAGING_SENDER_ID";
pub const APP_ID: &str = "VUE_APP_FIREBASE_APP_ID";
pub const MEASUREMENT_ID: &str = "VUE_APP_FIREBASE_MEASUREMENT_ID";
pub const RECAPTCHA_SITE_KEY: &str = "VUE_APP_RECAPTCHA_SITE_KEY";

/// Selects development behaviour (app-check debug token, insecure defaults)
pub const NODE_ENV: &str = "NODE_ENV";

/// Per-request timeout override, in seconds, shared by every HTTP client
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

pub const REQUIRED_VARS: [&str; 8] = [
    API_KEY,
    AUTH_DOMAIN,
    PROJECT_ID,
    STORAGE_BUCKET,
    MESSAGING_SENDER_ID,
    APP_ID,
    MEASUREMENT_ID,
    RECAPTCHA_SITE_KEY,
];

/// Configuration error raised while reading the environment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("development") => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

/// Static configuration of the managed backend project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
    pub measurement_id: String,
    pub recaptcha_site_key: String,
    pub environment: Environment,
}

impl BackendConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary lookup function
    ///
    /// All missing variables are checked in declaration order; the first one
    /// found missing is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let config = Self {
            api_key: required(API_KEY)?,
            auth_domain: required(AUTH_DOMAIN)?,
            project_id: required(PROJECT_ID)?,
            storage_bucket: required(STORAGE_BUCKET)?,
            messaging_sender_id: required(MESSAGING_SENDER_ID)?,
            app_id: required(APP_ID)?,
            measurement_id: required(MEASUREMENT_ID)?,
            recaptcha_site_key: required(RECAPTCHA_SITE_KEY)?,
            environment: Environment::from_node_env(lookup(NODE_ENV).as_deref()),
        };

        tracing::debug!(
            project_id = %config.project_id,
            environment = ?config.environment,
            "Backend configuration loaded"
        );

        Ok(config)
    }
}

/// Read an optional variable, treating blank values as unset
pub fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional variable, falling back to `default` when unset
pub fn parse_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match optional(name) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, String> {
        REQUIRED_VARS
            .iter()
            .map(|name| (*name, format!("value-of-{name}")))
            .collect()
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<BackendConfig, ConfigError> {
        BackendConfig::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_loads_all_required_vars() {
        let mut env = full_env();
        env.insert(PROJECT_ID, "todo-app".to_string());

        let config = load(&env).unwrap();
        assert_eq!(config.project_id, "todo-app");
        assert_eq!(config.api_key, format!("value-of-{API_KEY}"));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_each_missing_var_is_reported() {
        for name in REQUIRED_VARS {
            let mut env = full_env();
            env.remove(name);
            assert_eq!(load(&env), Err(ConfigError::Missing(name)));
        }
    }

    #[test]
    fn test_blank_var_counts_as_missing() {
        let mut env = full_env();
        env.insert(RECAPTCHA_SITE_KEY, "   ".to_string());
        assert_eq!(load(&env), Err(ConfigError::Missing(RECAPTCHA_SITE_KEY)));
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut env = full_env();
        env.insert(API_KEY, "  key-123 \n".to_string());
        assert_eq!(load(&env).unwrap().api_key, "key-123");
    }

    #[test]
    fn test_development_environment() {
        let mut env = full_env();
        env.insert(NODE_ENV, "development".to_string());
        assert!(load(&env).unwrap().environment.is_development());

        env.insert(NODE_ENV, "staging".to_string());
        assert_eq!(load(&env).unwrap().environment, Environment::Production);
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::Missing(API_KEY);
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: VUE_APP_FIREBASE_API_KEY"
        );
    }
}
