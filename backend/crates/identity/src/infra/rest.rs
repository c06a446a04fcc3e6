//! REST Identity Provider
//!
//! Talks to the identity service's REST API:
//! - `POST /v1/accounts:lookup?key=...` with `{"idToken"}`
//! - `POST /v1/projects/{project}/accounts:delete` with `{"localId"}` and an
//!   admin bearer, or `POST /v1/accounts:delete?key=...` with the caller's
//!   own `{"idToken"}` when no admin credential is configured

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::config::IdentityConfig;
use crate::domain::entity::{caller::CallerContext, user::UserRecord};
use crate::domain::provider::IdentityProvider;
use crate::domain::value_object::{email::Email, id_token::IdToken, uid::Uid};
use crate::error::{IdentityError, IdentityResult};

/// Error messages that mean "this token does not identify anyone"
const ANONYMOUS_MESSAGES: [&str; 5] = [
    "INVALID_ID_TOKEN",
    "TOKEN_EXPIRED",
    "USER_NOT_FOUND",
    "USER_DISABLED",
    "CREDENTIAL_TOO_OLD_LOGIN_AGAIN",
];

#[derive(Clone)]
pub struct RestIdentityProvider {
    http: reqwest::Client,
    config: Arc<IdentityConfig>,
}

impl RestIdentityProvider {
    pub fn new(http: reqwest::Client, config: Arc<IdentityConfig>) -> Self {
        Self { http, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.config.endpoint, path)
    }

    async fn decode_error(response: reqwest::Response) -> IdentityError {
        let status = response.status();
        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => IdentityError::Provider {
                code: Some(envelope.error.code.unwrap_or(status.as_u16()).to_string()),
                message: envelope.error.message,
            },
            Err(_) => IdentityError::Provider {
                code: None,
                message: format!("HTTP {status}"),
            },
        }
    }
}

impl IdentityProvider for RestIdentityProvider {
    async fn lookup(&self, token: &IdToken) -> IdentityResult<Option<UserRecord>> {
        let response = self
            .http
            .post(self.url("accounts:lookup"))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&IdTokenBody {
                id_token: token.expose(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::decode_error(response).await;
            if let IdentityError::Provider { message, .. } = &err {
                if ANONYMOUS_MESSAGES.iter().any(|m| message.starts_with(m)) {
                    return Ok(None);
                }
            }
            return Err(err);
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::Decode(e.to_string()))?;

        Ok(body
            .users
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(ProviderUser::into_record))
    }

    async fn delete_account(&self, caller: &CallerContext) -> IdentityResult<()> {
        let request = match &self.config.admin_token {
            Some(admin) => self
                .http
                .post(self.url(&format!(
                    "projects/{}/accounts:delete",
                    self.config.project_id
                )))
                .bearer_auth(admin)
                .json(&LocalIdBody {
                    local_id: caller.uid.as_str(),
                }),
            None => self
                .http
                .post(self.url("accounts:delete"))
                .query(&[("key", self.config.api_key.as_str())])
                .json(&IdTokenBody {
                    id_token: caller.token.expose(),
                }),
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        Ok(())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdTokenBody<'a> {
    id_token: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocalIdBody<'a> {
    local_id: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    users: Option<Vec<ProviderUser>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderUser {
    local_id: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    display_name: Option<String>,
    #[serde(default)]
    disabled: bool,
}

impl ProviderUser {
    fn into_record(self) -> UserRecord {
        UserRecord {
            uid: Uid::from_provider(self.local_id),
            email: self.email.map(Email::from_provider),
            email_verified: self.email_verified,
            display_name: self.display_name,
            disabled: self.disabled,
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    code: Option<u16>,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::{Json, Router, routing::post};
    use serde_json::{Value, json};
    use std::collections::HashMap;

    const GOOD_TOKEN: &str = "good-token";

    async fn lookup(Query(q): Query<HashMap<String, String>>, Json(body): Json<Value>) -> impl IntoResponse {
        assert_eq!(q.get("key").map(String::as_str), Some("local-api-key"));
        match body["idToken"].as_str() {
            Some(GOOD_TOKEN) => (
                StatusCode::OK,
                Json(json!({
                    "users": [{
                        "localId": "uid-1",
                        "email": "Alice@Example.com",
                        "emailVerified": true,
                        "displayName": "Alice"
                    }]
                })),
            ),
            Some("broken") => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": {"code": 500, "message": "BACKEND_ERROR"}})),
            ),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "INVALID_ID_TOKEN"}})),
            ),
        }
    }

    async fn delete_self(Json(body): Json<Value>) -> impl IntoResponse {
        match body["idToken"].as_str() {
            Some(GOOD_TOKEN) => (StatusCode::OK, Json(json!({"kind": "identitytoolkit#DeleteAccountResponse"}))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": {"code": 400, "message": "USER_NOT_FOUND"}})),
            ),
        }
    }

    async fn delete_admin(
        Path(project): Path<String>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        assert_eq!(project, "local-project");
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer admin-secret");
        if authorized && body["localId"] == "uid-1" {
            StatusCode::OK
        } else {
            StatusCode::FORBIDDEN
        }
    }

    async fn spawn_identity_server() -> String {
        let app = Router::new()
            .route("/v1/accounts:lookup", post(lookup))
            .route("/v1/accounts:delete", post(delete_self))
            .route("/v1/projects/{project}/accounts:delete", post(delete_admin));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn provider(endpoint: &str, admin_token: Option<&str>) -> RestIdentityProvider {
        let config = IdentityConfig {
            admin_token: admin_token.map(str::to_string),
            ..IdentityConfig::local(endpoint)
        };
        RestIdentityProvider::new(reqwest::Client::new(), Arc::new(config))
    }

    fn caller(uid: &str, token: &str) -> CallerContext {
        CallerContext {
            uid: Uid::from_provider(uid),
            email_verified: true,
            token: IdToken::new(token).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_lookup_known_token() {
        let endpoint = spawn_identity_server().await;
        let record = provider(&endpoint, None)
            .lookup(&IdToken::new(GOOD_TOKEN).unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.uid.as_str(), "uid-1");
        assert_eq!(record.email.unwrap().as_str(), "alice@example.com");
        assert!(record.email_verified);
        assert_eq!(record.display_name.as_deref(), Some("Alice"));
        assert!(!record.disabled);
    }

    #[tokio::test]
    async fn test_lookup_invalid_token_is_anonymous() {
        let endpoint = spawn_identity_server().await;
        let record = provider(&endpoint, None)
            .lookup(&IdToken::new("stale").unwrap())
            .await
            .unwrap();
        assert!(record.is_none());
    }

    #[tokio::test]
    async fn test_lookup_service_failure_is_error() {
        let endpoint = spawn_identity_server().await;
        let err = provider(&endpoint, None)
            .lookup(&IdToken::new("broken").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.provider_reason(), Some("BACKEND_ERROR"));
    }

    #[tokio::test]
    async fn test_delete_with_caller_token() {
        let endpoint = spawn_identity_server().await;
        let provider = provider(&endpoint, None);

        assert!(provider.delete_account(&caller("uid-1", GOOD_TOKEN)).await.is_ok());

        let err = provider
            .delete_account(&caller("uid-1", "other"))
            .await
            .unwrap_err();
        assert_eq!(err.provider_reason(), Some("USER_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_delete_with_admin_token() {
        let endpoint = spawn_identity_server().await;
        let provider = provider(&endpoint, Some("admin-secret"));

        assert!(provider.delete_account(&caller("uid-1", "ignored")).await.is_ok());

        let err = provider
            .delete_account(&caller("uid-2", "ignored"))
            .await
            .unwrap_err();
        // Empty body: no reason to report
        assert_eq!(err.provider_reason(), None);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) on loopback is not served
        let err = provider("http://127.0.0.1:9", None)
            .lookup(&IdToken::new(GOOD_TOKEN).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Transport(_)));
        assert!(!err.to_string().contains("local-api-key"));
    }
}
