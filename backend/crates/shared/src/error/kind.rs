//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum. Each kind maps to an HTTP status code
//! and to the canonical status string used by callable functions
//! (`UNAUTHENTICATED`, `INVALID_ARGUMENT`, `INTERNAL`, ...).

use serde::Serialize;

/// エラー種別の列挙体
///
/// HTTP ステータスコードと callable function のステータス文字列の
/// 両方に対応するエラー分類を定義します。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.status_code(), 401);
/// assert_eq!(kind.callable_status(), "UNAUTHENTICATED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request / INVALID_ARGUMENT
    BadRequest,
    /// 401 - Unauthorized / UNAUTHENTICATED
    Unauthorized,
    /// 403 - Forbidden / PERMISSION_DENIED
    Forbidden,
    /// 404 - Not Found / NOT_FOUND
    NotFound,
    /// 408 - Request Timeout / DEADLINE_EXCEEDED
    RequestTimeout,
    /// 409 - Conflict / ALREADY_EXISTS
    Conflict,
    /// 429 - Too Many Requests / RESOURCE_EXHAUSTED
    TooManyRequests,
    /// 500 - Internal Server Error / INTERNAL
    InternalServerError,
    /// 503 - Service Unavailable / UNAVAILABLE
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.status_code(), 400);
    /// assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// callable function のステータス文字列を取得
    ///
    /// エラーレスポンス `{"error": {"status": ..., "message": ...}}` の
    /// `status` フィールドに使用します。
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.callable_status(), "INVALID_ARGUMENT");
    /// assert_eq!(ErrorKind::InternalServerError.callable_status(), "INTERNAL");
    /// ```
    #[inline]
    pub const fn callable_status(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "INVALID_ARGUMENT",
            ErrorKind::Unauthorized => "UNAUTHENTICATED",
            ErrorKind::Forbidden => "PERMISSION_DENIED",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::RequestTimeout => "DEADLINE_EXCEEDED",
            ErrorKind::Conflict => "ALREADY_EXISTS",
            ErrorKind::TooManyRequests => "RESOURCE_EXHAUSTED",
            ErrorKind::InternalServerError => "INTERNAL",
            ErrorKind::ServiceUnavailable => "UNAVAILABLE",
        }
    }

    /// callable function のステータス文字列からエラー種別を復元
    ///
    /// 未知のステータスは `None` を返します。
    pub fn from_callable_status(status: &str) -> Option<Self> {
        let kind = match status {
            "INVALID_ARGUMENT" => ErrorKind::BadRequest,
            "UNAUTHENTICATED" => ErrorKind::Unauthorized,
            "PERMISSION_DENIED" => ErrorKind::Forbidden,
            "NOT_FOUND" => ErrorKind::NotFound,
            "DEADLINE_EXCEEDED" => ErrorKind::RequestTimeout,
            "ALREADY_EXISTS" => ErrorKind::Conflict,
            "RESOURCE_EXHAUSTED" => ErrorKind::TooManyRequests,
            "INTERNAL" => ErrorKind::InternalServerError,
            "UNAVAILABLE" => ErrorKind::ServiceUnavailable,
            _ => return None,
        };
        Some(kind)
    }

    /// 呼び出し側の再試行で解消しうる、サーバー側のエラーか
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorKind; 9] = [
        ErrorKind::BadRequest,
        ErrorKind::Unauthorized,
        ErrorKind::Forbidden,
        ErrorKind::NotFound,
        ErrorKind::RequestTimeout,
        ErrorKind::Conflict,
        ErrorKind::TooManyRequests,
        ErrorKind::InternalServerError,
        ErrorKind::ServiceUnavailable,
    ];

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_deletion_failure_kinds() {
        assert_eq!(ErrorKind::Unauthorized.callable_status(), "UNAUTHENTICATED");
        assert_eq!(ErrorKind::BadRequest.callable_status(), "INVALID_ARGUMENT");
        assert_eq!(ErrorKind::InternalServerError.callable_status(), "INTERNAL");
    }

    #[test]
    fn test_callable_status_is_recoverable() {
        for kind in ALL {
            assert_eq!(
                ErrorKind::from_callable_status(kind.callable_status()),
                Some(kind)
            );
        }
        assert_eq!(ErrorKind::from_callable_status("CANCELLED"), None);
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
        assert!(!ErrorKind::Unauthorized.is_server_error());
    }
}
