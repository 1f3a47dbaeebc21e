use std::env;
use std::time::Duration;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across the app shell, the API gateway
/// and every page controller that reads it.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Base URL of the hospital REST API, e.g. "http://localhost:7500".
    pub api_base_url: String,
    // Per-request timeout applied by the HTTP gateway.
    pub request_timeout: Duration,
    // Quiet period for debounced search inputs (receptionist, triage, lab).
    pub search_debounce: Duration,
    // Runtime environment marker. Controls the logging format in main.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, localhost API defaults) and production settings (JSON logs,
/// mandatory API endpoint).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:7500".to_string(),
            request_timeout: Duration::from_secs(10),
            search_debounce: Duration::from_millis(500),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime environment
    /// (especially Production) is not found. This prevents the application from starting
    /// pointed at nothing.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // API endpoint resolution. The production endpoint is mandatory and must be
        // explicitly set; local development falls back to the conventional port.
        let api_base_url = match env {
            Env::Production => {
                env::var("API_BASE_URL").expect("FATAL: API_BASE_URL required in production")
            }
            _ => env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:7500".to_string()),
        };

        let request_timeout = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        Self {
            // Trailing slashes would double up when joining endpoint paths.
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            request_timeout,
            search_debounce: Duration::from_millis(500),
            env,
        }
    }
}
