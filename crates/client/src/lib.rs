//! # Unisphere Client
//!
//! HTTP session engine and resource adapters for the Unisphere REST API.
//!
//! This crate contains:
//! - The transport client (connection pool, cookie jar, TLS flags,
//!   structured error extraction, request/response tracing)
//! - The session manager (Basic-auth login, CSRF token cache, single-flight
//!   re-authentication on 401)
//! - One adapter per resource kind (volumes, filesystems, NFS shares,
//!   snapshots, hosts, pools, consistency groups, replication, IP
//!   interfaces, metrics)
//! - Resource-name and retention-duration validation
//!
//! ## Architecture
//! - Payload records and errors come from `unisphere-domain`
//! - A single [`UnisphereClient`] is safe to share across tasks; shared
//!   state is limited to the CSRF token and the transport's cookie jar
//!
//! ## Example
//! ```no_run
//! use unisphere_client::{ClientConfig, Credentials, UnisphereClient};
//!
//! # async fn run() -> unisphere_domain::Result<()> {
//! let config = ClientConfig::new("https://array.example.com").from_env();
//! let credentials = Credentials::new("https://array.example.com", "admin", "secret");
//! let client = UnisphereClient::new(config, credentials)?;
//!
//! client.session().authenticate().await?;
//! let pools = client.pools().list().await?;
//! # let _ = pools;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod http;
pub mod session;
pub mod uri;
pub mod validation;

// Re-export commonly used items
pub use api::UnisphereClient;
pub use config::{ClientConfig, Credentials};
pub use http::{Body, RestClient};
pub use session::Session;
pub use unisphere_domain::{Result, UnisphereError, ValidationError};
