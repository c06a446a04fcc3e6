//! App Check
//!
//! Attestation settings for outgoing callable requests. In development a
//! debug token stands in for the reCAPTCHA attestation.

use platform::config::Environment;

#[derive(Debug, Clone)]
pub struct AppCheck {
    site_key: String,
    auto_refresh: bool,
    debug_mode: bool,
    token: Option<String>,
}

impl AppCheck {
    pub fn new(site_key: impl Into<String>, environment: Environment) -> Self {
        let debug_mode = environment.is_development();
        if debug_mode {
            tracing::info!("App Check debug mode enabled for development");
        }
        Self {
            site_key: site_key.into(),
            auto_refresh: true,
            debug_mode,
            token: None,
        }
    }

    /// Use a registered debug token (development only)
    pub fn with_debug_token(mut self, token: Option<String>) -> Self {
        if self.debug_mode {
            self.token = token;
        } else if token.is_some() {
            tracing::warn!("Ignoring App Check debug token outside development");
        }
        self
    }

    pub fn site_key(&self) -> &str {
        &self.site_key
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn is_debug(&self) -> bool {
        self.debug_mode
    }

    /// Token for the `x-firebase-appcheck` header, when one is available
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
