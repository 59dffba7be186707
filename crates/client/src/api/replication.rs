//! Remote system and replication session adapter.

use unisphere_domain::{
    Collection, CreateReplicationSessionBody, IdRef, Instance, RemoteSystem, ReplicationSession,
    Result, UnisphereError,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const REMOTE_SYSTEM_TYPE: &str = "remoteSystem";
const REMOTE_SYSTEM_FIELDS: &str = "id,name,model,serialNumber,managementAddress,health";
const SESSION_TYPE: &str = "replicationSession";
const SESSION_FIELDS: &str =
    "id,name,srcResourceId,dstResourceId,maxTimeOutOfSync,remoteSystem,status,health";

/// Inputs for a replication session create.
#[derive(Debug, Clone)]
pub struct CreateReplicationSessionRequest {
    pub name: String,
    pub src_resource_id: String,
    pub dst_resource_id: String,
    /// Minutes the destination may lag behind the source.
    pub max_time_out_of_sync: u32,
    pub remote_system_id: Option<String>,
}

#[derive(Debug)]
pub struct ReplicationApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> ReplicationApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    pub async fn find_remote_system_by_name(&self, name: &str) -> Result<RemoteSystem> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<RemoteSystem> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(REMOTE_SYSTEM_TYPE, &name, REMOTE_SYSTEM_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "remote system", &name))?;
        Ok(instance.content)
    }

    pub async fn create_replication_session(
        &self,
        request: CreateReplicationSessionRequest,
    ) -> Result<ReplicationSession> {
        let name = validate_resource_name(&request.name, MAX_RESOURCE_NAME_LEN)?;
        let src = require_id(&request.src_resource_id, "source resource id")?;
        let dst = require_id(&request.dst_resource_id, "destination resource id")?;
        let remote_system = match request.remote_system_id.as_deref() {
            Some(id) => Some(IdRef::new(require_id(id, "remote system id")?)),
            None => None,
        };

        let body = CreateReplicationSessionBody {
            name,
            src_resource_id: src.to_string(),
            dst_resource_id: dst.to_string(),
            max_time_out_of_sync: request.max_time_out_of_sync,
            remote_system,
        };
        let created: Instance<ReplicationSession> = self
            .client
            .session()
            .post(&uri::list_instances(SESSION_TYPE), &body)
            .await?;
        Ok(created.content)
    }

    pub async fn find_session_by_id(&self, id: &str) -> Result<ReplicationSession> {
        let id = require_id(id, "replication session id")?;
        let instance: Instance<ReplicationSession> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(SESSION_TYPE, id, SESSION_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "replication session", id))?;
        Ok(instance.content)
    }

    /// Find the session replicating the given source storage resource.
    pub async fn find_session_by_source(&self, src_resource_id: &str) -> Result<ReplicationSession> {
        let src_resource_id = require_id(src_resource_id, "source resource id")?;
        let filter = format!(r#"srcResourceId eq "{src_resource_id}""#);
        let path = format!(
            "{}&fields={}",
            uri::list_instances_filtered(SESSION_TYPE, &filter),
            SESSION_FIELDS
        );
        let collection: Collection<ReplicationSession> = self.client.session().get(&path).await?;
        collection.into_contents().into_iter().next().ok_or_else(|| UnisphereError::NotFound {
            kind: "replication session",
            identifier: src_resource_id.to_string(),
        })
    }
}
