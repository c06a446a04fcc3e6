//! Client credential utilities
//!
//! Common functions for pulling caller credentials out of HTTP headers.

use axum::http::{HeaderMap, header};

use crate::cookie::extract_cookie;

/// Cookie consulted when no `Authorization` header is present
pub const SESSION_COOKIE: &str = "__session";

/// Header carrying the app attestation token
pub const APP_CHECK_HEADER: &str = "x-firebase-appcheck";

/// Extract the caller's ID token from request headers
///
/// Checks `Authorization: Bearer <token>` first, then falls back to the
/// `__session` cookie. Blank tokens are treated as absent.
///
/// ## Returns
/// The raw token, or `None` when the request carries no credentials
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let from_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    from_header.or_else(|| extract_cookie(headers, SESSION_COOKIE).filter(|t| !t.is_empty()))
}

/// Extract the app attestation token, if the client sent one
pub fn extract_app_check_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(APP_CHECK_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer tok"));
        assert_eq!(extract_bearer_token(&headers), Some("tok".to_string()));
    }

    #[test]
    fn test_other_schemes_are_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpw"));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn test_falls_back_to_session_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; __session=cookie-token"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("cookie-token".to_string()));
    }

    #[test]
    fn test_empty_bearer_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_extract_app_check_token() {
        let mut headers = HeaderMap::new();
        headers.insert(APP_CHECK_HEADER, HeaderValue::from_static("attest-1"));
        assert_eq!(extract_app_check_token(&headers), Some("attest-1".to_string()));
    }
}
