//! Cookie parsing
//!
//! Hosting rewrites strip every cookie except `__session`, so that is the
//! only one the functions ever read.

use axum::http::{HeaderMap, header};

/// Extract a cookie value from headers
///
/// Values wrapped in double quotes are unquoted.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.trim_matches('"').to_string())
        })
}
