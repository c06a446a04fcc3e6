//! Callable DTOs
//!
//! Requests are `{"data": ...}`; successful responses are `{"result": ...}`.
//! Error bodies are rendered by `kernel` from the `AppError`.

use serde::{Deserialize, Serialize};

/// Callable request envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Callable success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableResponse<T> {
    pub result: T,
}

/// Callable error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableErrorResponse {
    pub error: CallableErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallableErrorDetail {
    pub status: String,
    pub message: String,
}

/// `deleteCorporateAccount` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_data_defaults_to_null() {
        let request: CallableRequest = serde_json::from_str("{}").unwrap();
        assert!(request.data.is_null());

        let request: CallableRequest =
            serde_json::from_str(r#"{"data":{"uid":"someone-else"}}"#).unwrap();
        assert_eq!(request.data["uid"], "someone-else");
    }

    #[test]
    fn test_delete_response_serialization() {
        let response = CallableResponse {
            result: DeleteAccountResponse {
                success: true,
                message: "Account deleted successfully.".to_string(),
            },
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(
            json,
            r#"{"result":{"success":true,"message":"Account deleted successfully."}}"#
        );
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"error":{"status":"UNAUTHENTICATED","message":"nope"}}"#;
        let response: CallableErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.status, "UNAUTHENTICATED");
        assert_eq!(response.error.message, "nope");
    }
}
