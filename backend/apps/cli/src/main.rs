//! Task app shell
//!
//! Stands in for the browser: bootstraps the backend client, evaluates
//! navigations through the guard, and drives sign-in, sign-out and account
//! deletion. Output is JSON on stdout; logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use client::{BackendClient, ClientConfig, ClientError, Persistence};
use identity::{IdToken, IdentityConfig, IdentityProvider, RestIdentityProvider, Session};
use navigation::{AuthStateSource, GuardConfig, NavigationError, RouteTable, RoutingMode};
use platform::config::{BackendConfig, ConfigError};
use platform::http_client::build_http_client;
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("ID token must not be blank")]
    BlankToken,
    #[error("identity service did not report an auth state within {0:?}")]
    AuthStateTimeout(Duration),
}

#[derive(Parser, Debug)]
#[command(name = "todo-cli", about = "Task app shell: navigation, session and account commands")]
struct Cli {
    /// How locations are written (`hash` for `#/tasks`, `path` for `/tasks`)
    #[arg(long, env = "ROUTING_MODE", default_value = "hash")]
    routing_mode: RoutingMode,

    /// Let signed-in users with unverified email through protected routes
    #[arg(long, default_value_t = false)]
    no_verification: bool,

    /// Directory for the persisted session
    #[arg(long, env = "SESSION_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[arg(long, default_value = "local")]
    persistence: Persistence,

    /// Callable functions base URL (overrides FUNCTIONS_ENDPOINT)
    #[arg(long)]
    functions_endpoint: Option<String>,

    /// Bound on waiting for the first auth state, in seconds
    #[arg(long, default_value_t = 10)]
    resolve_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the route table
    Routes,
    /// Resolve where navigating to a location ends up
    Navigate { location: String },
    /// Adopt an ID token issued by the identity service
    SignIn {
        #[arg(long, env = "ID_TOKEN")]
        id_token: String,
    },
    SignOut,
    /// Show the signed-in user
    Whoami,
    /// Delete the signed-in user's account
    DeleteAccount,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs on stderr, stdout is for results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cli=info,client=info,navigation=info,identity=warn,platform=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Command::Routes = cli.command {
        return print_routes();
    }

    // Missing project configuration halts startup
    let backend = BackendConfig::from_env()?;
    let identity_config = IdentityConfig::from_backend(&backend).with_env_overrides()?;
    let http_client = build_http_client(identity_config.request_timeout)?;
    let provider = RestIdentityProvider::new(http_client, Arc::new(identity_config));

    let client_config = client_config(&cli, &backend)?;
    let client = BackendClient::initialize(backend, provider, client_config).await?;

    let guard = GuardConfig::default()
        .with_routing_mode(cli.routing_mode)
        .with_verification_required(!cli.no_verification)
        .with_resolve_timeout(Duration::from_secs(cli.resolve_timeout));

    run(&client, guard, cli.command).await
}

fn client_config(cli: &Cli, backend: &BackendConfig) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_backend(backend)
        .with_env_overrides()?
        .with_persistence(cli.persistence);
    if let Some(dir) = &cli.state_dir {
        config = config.with_state_dir(dir.clone());
    }
    if let Some(endpoint) = &cli.functions_endpoint {
        config.functions_endpoint = endpoint.trim_end_matches('/').to_string();
    }
    Ok(config)
}

async fn run<P>(client: &BackendClient<P>, guard: GuardConfig, command: Command) -> Result<(), CliError>
where
    P: IdentityProvider + Sync + 'static,
{
    match command {
        Command::Routes => print_routes(),
        Command::Navigate { location } => {
            tracing::debug!(location = %location, "Navigating");
            let navigator = client.navigator(guard);
            let outcome = navigator.navigate(&location).await?;
            print_json(&serde_json::to_value(outcome)?)
        }
        Command::SignIn { id_token } => {
            wait_for_auth_state(client, guard.resolve_timeout).await?;
            let token = IdToken::new(id_token).ok_or(CliError::BlankToken)?;
            let session = client.identity().sign_in_with_id_token(token).await?;
            client
                .analytics()
                .log_event("login", &json!({ "method": "id_token" }));
            print_json(&session_json(&session))
        }
        Command::SignOut => {
            wait_for_auth_state(client, guard.resolve_timeout).await?;
            client.identity().sign_out().await?;
            print_json(&json!({ "signedIn": false }))
        }
        Command::Whoami => {
            let session = wait_for_auth_state(client, guard.resolve_timeout).await?;
            match session {
                Some(session) => print_json(&session_json(&session)),
                None => print_json(&json!({ "signedIn": false })),
            }
        }
        Command::DeleteAccount => {
            wait_for_auth_state(client, guard.resolve_timeout).await?;
            let response = client.functions().delete_account().await?;
            client.analytics().log_event("delete_account", &Value::Null);
            print_json(&serde_json::to_value(response)?)
        }
    }
}

/// Wait for the restored session before acting on it
async fn wait_for_auth_state<P>(
    client: &BackendClient<P>,
    timeout: Duration,
) -> Result<Option<Session>, CliError>
where
    P: IdentityProvider + Sync + 'static,
{
    match tokio::time::timeout(timeout, client.identity().first_auth_state()).await {
        Ok(Ok(session)) => Ok(session),
        Ok(Err(e)) => Err(ClientError::from(e).into()),
        Err(_) => Err(CliError::AuthStateTimeout(timeout)),
    }
}

fn print_routes() -> Result<(), CliError> {
    let routes: Vec<Value> = RouteTable::default()
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;
    print_json(&Value::Array(routes))
}

// Token deliberately left out
fn session_json(session: &Session) -> Value {
    json!({
        "signedIn": true,
        "uid": session.uid.as_str(),
        "email": session.email.as_ref().map(|e| e.as_str()),
        "emailVerified": session.email_verified,
        "expiresAtMs": session.expires_at_ms,
    })
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
