use hms_portal::{
    App,
    config::{AppConfig, Env},
    credentials::{CredentialState, FileCredentialStore},
    gateway::{GatewayState, HttpApiGateway},
    routes::RouteAction,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the portal shell, responsible for
/// initializing all core components: Configuration, Logging, Credentials,
/// the API Gateway, and the session boot sequence.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() implements the fail-fast principle for missing Production settings.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Sets the default log level. It prioritizes the RUST_LOG environment variable,
    // falling back to sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hms_portal=debug,reqwest=info".into());

    // 3. Initialize Logging based on Environment
    // The structured logging format is dynamically selected based on the APP_ENV.
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability during local debugging.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Portal shell starting in {:?} mode", config.env);
    tracing::info!("API endpoint: {}", config.api_base_url);

    // 4. Credential Store Initialization
    // The bearer token persists in a token file between runs; an absent or
    // unreadable file simply means an unauthenticated session.
    let token_path =
        std::env::var("HMS_TOKEN_FILE").unwrap_or_else(|_| ".hms-token".to_string());
    let credentials = Arc::new(FileCredentialStore::new(token_path)) as CredentialState;

    // 5. Gateway Initialization
    let gateway =
        Arc::new(HttpApiGateway::new(&config, credentials.clone())) as GatewayState;

    // 6. Shell Assembly & Session Boot
    // The identity call is the only operation gating the route tree; every
    // failure mode settles to an unauthenticated session.
    let mut app = App::new(config, gateway, credentials);
    let role = app.boot().await;

    match role {
        Some(role) => tracing::info!("session resolved: {}", role.as_str()),
        None => tracing::info!("session resolved: unauthenticated"),
    }

    // 7. Route Visibility Report
    // Logs what this session can reach, the shell's equivalent of the
    // server's startup route listing.
    let table = app.visible_routes();
    tracing::info!(
        sidebar = hms_portal::routes::sidebar_visible(app.role()),
        routes = table.entries().len(),
        "visible route set computed"
    );
    for entry in table.entries() {
        match entry.action {
            RouteAction::Render(screen) => {
                tracing::debug!(path = entry.pattern, screen = ?screen, "route");
            }
            RouteAction::Redirect(target) => {
                tracing::debug!(path = entry.pattern, redirect = target, "route");
            }
        }
    }
}
