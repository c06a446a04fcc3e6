//! API Server Entry Point
//!
//! Hosts the callable functions over HTTP.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use identity::{IdentityConfig, IdentityProvider, RestIdentityProvider, functions_router};
use platform::client::APP_CHECK_HEADER;
use platform::config::{BackendConfig, parse_or};
use platform::http_client::build_http_client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const API_PORT: &str = "API_PORT";
const DEFAULT_PORT: u16 = 5001;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,identity=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing project configuration halts startup
    let backend = BackendConfig::from_env()?;
    let identity_config = IdentityConfig::from_backend(&backend).with_env_overrides()?;
    tracing::info!(
        project_id = %backend.project_id,
        endpoint = %identity_config.endpoint,
        admin = identity_config.admin_token.is_some(),
        "Identity provider configured"
    );

    let http_client = build_http_client(identity_config.request_timeout)?;
    let provider = RestIdentityProvider::new(http_client, Arc::new(identity_config));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8080,http://127.0.0.1:8080".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::GET, Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            http::HeaderName::from_static(APP_CHECK_HEADER),
        ]))
        .allow_credentials(true);

    let app = app(provider).layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let port = parse_or(API_PORT, DEFAULT_PORT)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Callable functions plus the health probe
fn app<P>(provider: P) -> Router
where
    P: IdentityProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(healthz))
        .merge(functions_router(provider))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
