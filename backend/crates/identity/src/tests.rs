//! Callable function tests for the identity crate
//!
//! Drive the functions router end to end with `tower::ServiceExt::oneshot`.

#[cfg(test)]
mod delete_account_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::IdentityConfig;
    use crate::domain::entity::{caller::CallerContext, user::UserRecord};
    use crate::domain::provider::IdentityProvider;
    use crate::domain::value_object::{email::Email, id_token::IdToken, uid::Uid};
    use crate::error::{IdentityError, IdentityResult};
    use crate::infra::memory::InMemoryIdentityProvider;
    use crate::infra::rest::RestIdentityProvider;
    use crate::presentation::middleware::VERIFICATION_FAILED_MESSAGE;
    use crate::presentation::router::functions_router;

    async fn call(app: Router, token: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut request = Request::post("/deleteCorporateAccount")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn seeded() -> (InMemoryIdentityProvider, Uid, IdToken) {
        let provider = InMemoryIdentityProvider::new();
        let uid = Uid::parse("user-u").unwrap();
        provider
            .insert_user(
                UserRecord::new(uid.clone()).with_email(Email::new("u@example.com").unwrap(), true),
            )
            .await;
        let token = provider.issue_token(&uid).await.unwrap();
        (provider, uid, token)
    }

    #[tokio::test]
    async fn test_unauthenticated_call_is_rejected() {
        let (provider, uid, _) = seeded().await;
        let (status, body) = call(functions_router(provider.clone()), None, r#"{"data":null}"#).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["status"], "UNAUTHENTICATED");
        assert_eq!(
            body["error"]["message"],
            "Authentication required to delete an account."
        );
        assert!(provider.contains(&uid).await);
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let (provider, _, _) = seeded().await;
        let (status, body) =
            call(functions_router(provider), Some("forged"), r#"{"data":{}}"#).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["status"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_authenticated_caller_is_deleted() {
        let (provider, uid, token) = seeded().await;
        let (status, body) = call(
            functions_router(provider.clone()),
            Some(token.expose()),
            r#"{"data":null}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"result": {"success": true, "message": "Account deleted successfully."}})
        );
        assert!(!provider.contains(&uid).await);
    }

    #[tokio::test]
    async fn test_payload_cannot_target_another_user() {
        let (provider, caller_uid, token) = seeded().await;
        let victim = Uid::parse("victim").unwrap();
        provider.insert_user(UserRecord::new(victim.clone())).await;

        let body = json!({"data": {"uid": "victim"}}).to_string();
        let (status, _) = call(functions_router(provider.clone()), Some(token.expose()), &body).await;

        assert_eq!(status, StatusCode::OK);
        assert!(!provider.contains(&caller_uid).await);
        assert!(provider.contains(&victim).await);
    }

    #[tokio::test]
    async fn test_second_call_with_same_token_is_unauthenticated() {
        let (provider, _, token) = seeded().await;
        let app = functions_router(provider);

        let (first, _) = call(app.clone(), Some(token.expose()), r#"{"data":null}"#).await;
        let (second, body) = call(app, Some(token.expose()), r#"{"data":null}"#).await;

        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["status"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_argument() {
        let (provider, uid, token) = seeded().await;
        let (status, body) =
            call(functions_router(provider.clone()), Some(token.expose()), "not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
        assert!(provider.contains(&uid).await);
    }

    // ------------------------------------------------------------------------
    // Scripted provider for failure paths the in-memory provider can't reach
    // ------------------------------------------------------------------------

    #[derive(Clone)]
    struct ScriptedProvider {
        record: Option<UserRecord>,
        delete_error: Option<fn() -> IdentityError>,
    }

    impl IdentityProvider for ScriptedProvider {
        async fn lookup(&self, _token: &IdToken) -> IdentityResult<Option<UserRecord>> {
            Ok(self.record.clone())
        }

        async fn delete_account(&self, _caller: &CallerContext) -> IdentityResult<()> {
            match self.delete_error {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    fn scripted(uid: &str, delete_error: Option<fn() -> IdentityError>) -> ScriptedProvider {
        ScriptedProvider {
            record: Some(UserRecord::new(Uid::from_provider(uid))),
            delete_error,
        }
    }

    #[tokio::test]
    async fn test_blank_uid_is_invalid_argument() {
        let (status, body) =
            call(functions_router(scripted("", None)), Some("tok"), r#"{"data":null}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
        assert_eq!(body["error"]["message"], "No user ID provided for deletion.");
    }

    #[tokio::test]
    async fn test_provider_failure_with_reason_is_internal() {
        fn not_found() -> IdentityError {
            IdentityError::Provider {
                code: Some("auth/user-not-found".into()),
                message: "no such user".into(),
            }
        }

        let (status, body) = call(
            functions_router(scripted("u", Some(not_found))),
            Some("tok"),
            r#"{"data":null}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], "INTERNAL");
        assert_eq!(
            body["error"]["message"],
            "Failed to delete account: no such user"
        );
    }

    #[tokio::test]
    async fn test_provider_failure_without_reason_is_unknown() {
        fn opaque() -> IdentityError {
            IdentityError::Decode("garbage".into())
        }

        let (status, body) = call(
            functions_router(scripted("u", Some(opaque))),
            Some("tok"),
            r#"{"data":null}"#,
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], "INTERNAL");
        assert_eq!(
            body["error"]["message"],
            "An unknown error occurred during account deletion."
        );
    }

    #[tokio::test]
    async fn test_unreachable_identity_service_is_internal() {
        let config = IdentityConfig::local("http://127.0.0.1:9");
        let provider = RestIdentityProvider::new(reqwest::Client::new(), Arc::new(config));

        let (status, body) =
            call(functions_router(provider), Some("tok"), r#"{"data":null}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["status"], "INTERNAL");
        assert_eq!(body["error"]["message"], VERIFICATION_FAILED_MESSAGE);
        let rendered = body.to_string();
        assert!(!rendered.contains("local-api-key"));
        assert!(!rendered.contains("127.0.0.1"));
    }

    #[tokio::test]
    async fn test_disabled_account_is_unauthenticated() {
        let mut provider = scripted("u", None);
        if let Some(record) = provider.record.as_mut() {
            record.disabled = true;
        }

        let (status, _) = call(functions_router(provider), Some("tok"), r#"{"data":null}"#).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
