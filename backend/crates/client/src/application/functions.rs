//! Callable Functions Client
//!
//! Invokes server-hosted callable functions with the signed-in user's ID
//! token and decodes the `{"result": ...}` / `{"error": ...}` envelopes.

use std::sync::Arc;

use identity::IdentityProvider;
use identity::presentation::dto::{
    CallableErrorResponse, CallableRequest, CallableResponse, DeleteAccountResponse,
};
use identity::presentation::router::DELETE_ACCOUNT_FUNCTION;
use kernel::error::kind::ErrorKind;
use platform::client::APP_CHECK_HEADER;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::app_check::AppCheck;
use crate::application::identity_client::IdentityClient;
use crate::error::{ClientError, ClientResult};

/// Longest response excerpt kept in decode errors
const MAX_ERROR_EXCERPT: usize = 200;

pub struct FunctionsClient<P>
where
    P: IdentityProvider,
{
    http: reqwest::Client,
    endpoint: String,
    identity: Arc<IdentityClient<P>>,
    app_check: Arc<AppCheck>,
}

impl<P> FunctionsClient<P>
where
    P: IdentityProvider + Sync,
{
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        identity: Arc<IdentityClient<P>>,
        app_check: Arc<AppCheck>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            identity,
            app_check,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Call `name` with `data`, returning the decoded `result`
    pub async fn call<T>(&self, name: &str, data: Value) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.endpoint, name);
        let mut request = self.http.post(&url).json(&CallableRequest { data });

        if let Some(token) = self.identity.id_token() {
            request = request.bearer_auth(token.expose());
        }
        if let Some(token) = self.app_check.token() {
            request = request.header(APP_CHECK_HEADER, token);
        }

        tracing::debug!(function = name, "Invoking callable function");
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if status.is_success() {
            let body: CallableResponse<T> =
                serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
                    status: status.as_u16(),
                    detail: e.to_string(),
                })?;
            return Ok(body.result);
        }

        match serde_json::from_slice::<CallableErrorResponse>(&bytes) {
            Ok(body) => {
                let kind = ErrorKind::from_callable_status(&body.error.status)
                    .unwrap_or(ErrorKind::InternalServerError);
                if kind.is_server_error() {
                    tracing::error!(
                        function = name,
                        status = %body.error.status,
                        message = %body.error.message,
                        "Callable function failed"
                    );
                } else {
                    tracing::warn!(
                        function = name,
                        status = %body.error.status,
                        message = %body.error.message,
                        "Callable function rejected the request"
                    );
                }
                Err(ClientError::Callable {
                    kind,
                    status: body.error.status,
                    message: body.error.message,
                })
            }
            Err(_) => Err(ClientError::Decode {
                status: status.as_u16(),
                detail: String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(MAX_ERROR_EXCERPT)
                    .collect(),
            }),
        }
    }

    /// Delete the signed-in user's account, then sign out locally
    ///
    /// On failure the local session is left untouched. Once the account is
    /// gone the acknowledgement is returned even if the persisted session
    /// can't be cleared; the in-memory session is dropped either way.
    pub async fn delete_account(&self) -> ClientResult<DeleteAccountResponse> {
        let uid = self.identity.current_user().map(|s| s.uid);
        let response: DeleteAccountResponse =
            self.call(DELETE_ACCOUNT_FUNCTION, Value::Null).await?;

        tracing::info!(uid = ?uid.as_ref().map(|u| u.as_str()), "Account deleted");
        if let Err(e) = self.identity.sign_out().await {
            tracing::warn!(error = %e, "Could not clear persisted session after account deletion");
        }
        Ok(response)
    }
}
