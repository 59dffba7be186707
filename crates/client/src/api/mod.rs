//! Resource adapters
//!
//! One adapter per resource kind. Every operation follows the same
//! protocol: validate inputs, format a URI from the template catalog,
//! build the request record, dispatch through the session, and translate
//! well-known service error codes into domain sentinels.

use std::sync::Arc;

use unisphere_domain::{Result, UnisphereError};

use crate::config::{ClientConfig, Credentials};
use crate::session::Session;

mod consistency_group;
mod filesystem;
mod host;
mod ip_interface;
mod metrics;
mod nfs_share;
mod pool;
mod replication;
mod snapshot;
mod system;
mod volume;

pub use consistency_group::{ConsistencyGroupApi, ModifyConsistencyGroupRequest};
pub use filesystem::{CreateFilesystemRequest, FilesystemApi};
pub use host::HostApi;
pub use ip_interface::IpInterfaceApi;
pub use metrics::MetricsApi;
pub use nfs_share::NfsShareApi;
pub use pool::PoolApi;
pub use replication::{CreateReplicationSessionRequest, ReplicationApi};
pub use snapshot::{CreateSnapshotRequest, ListSnapshotsRequest, SnapshotApi};
pub use system::SystemApi;
pub use volume::{CreateVolumeRequest, VolumeApi};

/// Page size used when the client iterates a collection.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 100;

/// Entry point: a shareable handle over one authenticated session.
#[derive(Debug, Clone)]
pub struct UnisphereClient {
    session: Arc<Session>,
}

impl UnisphereClient {
    /// Build a client from configuration and credentials. No network
    /// traffic happens until the first call (or an explicit
    /// [`Session::authenticate`]).
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        Ok(Self { session: Arc::new(Session::new(&config, credentials)?) })
    }

    /// The session manager, exposed for token sharing and explicit
    /// login/logout.
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn volumes(&self) -> VolumeApi<'_> {
        VolumeApi::new(self)
    }

    pub fn filesystems(&self) -> FilesystemApi<'_> {
        FilesystemApi::new(self)
    }

    pub fn nfs_shares(&self) -> NfsShareApi<'_> {
        NfsShareApi::new(self)
    }

    pub fn snapshots(&self) -> SnapshotApi<'_> {
        SnapshotApi::new(self)
    }

    pub fn hosts(&self) -> HostApi<'_> {
        HostApi::new(self)
    }

    pub fn pools(&self) -> PoolApi<'_> {
        PoolApi::new(self)
    }

    pub fn consistency_groups(&self) -> ConsistencyGroupApi<'_> {
        ConsistencyGroupApi::new(self)
    }

    pub fn replication(&self) -> ReplicationApi<'_> {
        ReplicationApi::new(self)
    }

    pub fn ip_interfaces(&self) -> IpInterfaceApi<'_> {
        IpInterfaceApi::new(self)
    }

    pub fn metrics(&self) -> MetricsApi<'_> {
        MetricsApi::new(self)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }
}

/// Translate the array's resource-not-found code (and plain 404s) into the
/// per-resource sentinel.
pub(crate) fn map_not_found(
    err: UnisphereError,
    kind: &'static str,
    identifier: &str,
) -> UnisphereError {
    match err {
        UnisphereError::Api(api)
            if api.error_code == unisphere_domain::ERROR_CODE_RESOURCE_NOT_FOUND
                || api.http_status_code == 404 =>
        {
            UnisphereError::NotFound { kind, identifier: identifier.to_string() }
        }
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared scaffolding for adapter tests.

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Client pointed at a mock server, with a login mock mounted and the
    /// session pre-authenticated so adapter tests exercise only their own
    /// requests.
    pub(crate) async fn authenticated_client(server: &MockServer) -> UnisphereClient {
        Mock::given(method("GET"))
            .and(path("/api/types/loginSessionInfo"))
            .and(header("X-EMC-REST-CLIENT", "true"))
            .respond_with(ResponseTemplate::new(200).insert_header("EMC-CSRF-TOKEN", "test-token"))
            .mount(server)
            .await;

        let client = UnisphereClient::new(
            ClientConfig::new(server.uri()),
            Credentials::new(server.uri(), "admin", "secret"),
        )
        .expect("client");
        client.session().authenticate().await.expect("login");
        client
    }

    /// Requests seen by the server, excluding the login round trip.
    pub(crate) async fn non_login_requests(server: &MockServer) -> Vec<wiremock::Request> {
        server
            .received_requests()
            .await
            .expect("requests")
            .into_iter()
            .filter(|r| !r.url.path().contains("loginSessionInfo"))
            .collect()
    }
}
