//! HTTP client construction
//!
//! One `reqwest::Client` per process; it pools connections internally and is
//! cheap to clone.

use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("todo-backend/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client with rustls and a per-request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .use_rustls_tls()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(5)))
        .user_agent(USER_AGENT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(DEFAULT_REQUEST_TIMEOUT).is_ok());
        assert!(build_http_client(Duration::from_millis(250)).is_ok());
    }
}
