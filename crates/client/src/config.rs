//! Client configuration
//!
//! Constructor defaults can be overridden from the environment.
//!
//! ## Environment Variables
//! - `UNISPHERE_ENDPOINT`: management endpoint URL
//! - `UNISPHERE_INSECURE`: skip TLS certificate verification (true/false)
//! - `UNISPHERE_DEBUG`: verbose client logging (true/false)
//! - `UNISPHERE_TRACE_HTTP`: dump full requests and responses (true/false)
//! - `UNISPHERE_TIMEOUT_SECS`: per-request timeout in seconds

use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Transport configuration, immutable after client construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Management endpoint, e.g. `https://array.example.com`.
    pub endpoint: String,
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Trust the OS certificate pool instead of the bundled roots.
    pub use_system_certs: bool,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Dump full requests and responses to the debug log.
    pub trace_http: bool,
    /// Verbose client logging.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            insecure: false,
            use_system_certs: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            trace_http: false,
            debug: false,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into(), ..Self::default() }
    }

    /// Apply environment overrides on top of the constructor defaults.
    /// Unset variables leave the corresponding field untouched.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if let Some(endpoint) = env_var("UNISPHERE_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(insecure) = env_bool("UNISPHERE_INSECURE") {
            self.insecure = insecure;
        }
        if let Some(debug) = env_bool("UNISPHERE_DEBUG") {
            self.debug = debug;
        }
        if let Some(trace_http) = env_bool("UNISPHERE_TRACE_HTTP") {
            self.trace_http = trace_http;
        }
        if let Some(secs) = env_var("UNISPHERE_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.timeout = Duration::from_secs(secs),
                Err(e) => {
                    tracing::debug!(value = %secs, error = %e, "ignoring invalid UNISPHERE_TIMEOUT_SECS")
                }
            }
        }
        self
    }
}

/// Credentials used for login and every re-authentication.
#[derive(Clone)]
pub struct Credentials {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        endpoint: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self { endpoint: endpoint.into(), username: username.into(), password: password.into() }
    }
}

// Keep passwords out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
    env_var(name).map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}
