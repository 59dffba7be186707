//! Snapshot adapter.

use unisphere_domain::{
    Collection, CreateSnapshotBody, FilesystemAccessType, IdRef, Instance, Result, Snapshot,
    ValidationError,
};

use super::{map_not_found, UnisphereClient, DEFAULT_PAGE_SIZE};
use crate::uri;
use crate::validation::{
    parse_retention_duration, require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN,
};

const SNAP_TYPE: &str = "snap";
const SNAP_FIELDS: &str = "id,name,description,state,size,isAutoDelete,creationTime,expirationTime,storageResource,lun,parentSnap";

/// Inputs for a snapshot create.
#[derive(Debug, Clone, Default)]
pub struct CreateSnapshotRequest {
    pub storage_resource_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Retention as `D:H:M:S`; empty or absent means no retention.
    pub retention_duration: Option<String>,
    pub auto_delete: Option<bool>,
    pub filesystem_access: Option<FilesystemAccessType>,
}

/// Inputs for a snapshot listing.
#[derive(Debug, Clone, Default)]
pub struct ListSnapshotsRequest {
    /// Short-circuits to a single instance lookup when set.
    pub snapshot_id: Option<String>,
    /// Client-side filter on the snapshot's source LUN.
    pub source_volume_id: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug)]
pub struct SnapshotApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> SnapshotApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: CreateSnapshotRequest) -> Result<Snapshot> {
        let name = validate_resource_name(&request.name, MAX_RESOURCE_NAME_LEN)?;
        let resource_id = require_id(&request.storage_resource_id, "storage resource id")?;
        let retention_duration = match request.retention_duration.as_deref() {
            None => None,
            Some(raw) => match parse_retention_duration(raw)? {
                0 => None,
                seconds => Some(seconds),
            },
        };

        let body = CreateSnapshotBody {
            storage_resource: IdRef::new(resource_id),
            name,
            description: request.description,
            retention_duration,
            is_auto_delete: request.auto_delete,
            filesystem_access_type: request.filesystem_access.map(FilesystemAccessType::token),
        };
        let created: Instance<Snapshot> = self
            .client
            .session()
            .post(&uri::list_instances(SNAP_TYPE), &body)
            .await?;
        Ok(created.content)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Snapshot> {
        let id = require_id(id, "snapshot id")?;
        let instance: Instance<Snapshot> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(SNAP_TYPE, id, SNAP_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "snapshot", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Snapshot> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<Snapshot> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(SNAP_TYPE, &name, SNAP_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "snapshot", &name))?;
        Ok(instance.content)
    }

    /// List snapshots, in the order the service reports them.
    ///
    /// A set `snapshot_id` short-circuits to a one-element result without a
    /// collection request. `source_volume_id` filters client-side on the
    /// snapshot's `lun` reference; without an explicit `page` the filter
    /// walks every page so matches beyond the first page are not lost.
    pub async fn list(&self, request: ListSnapshotsRequest) -> Result<Vec<Snapshot>> {
        if let Some(id) = request.snapshot_id.as_deref() {
            return Ok(vec![self.find_by_id(id).await?]);
        }

        let per_page = match request.per_page {
            Some(0) => return Err(ValidationError::InvalidPageSize.into()),
            Some(per_page) => per_page,
            None => DEFAULT_PAGE_SIZE,
        };
        let walk_all = request.page.is_none() && request.source_volume_id.is_some();
        let mut page = request.page.unwrap_or(1);

        let mut snapshots = Vec::new();
        loop {
            let path =
                uri::paged(&uri::list_instances_with_fields(SNAP_TYPE, SNAP_FIELDS), page, per_page);
            let collection: Collection<Snapshot> = self.client.session().get(&path).await?;
            let entries = collection.into_contents();
            let count = entries.len();
            snapshots.extend(entries);
            if !walk_all || count < per_page as usize {
                break;
            }
            page += 1;
        }

        Ok(match request.source_volume_id.as_deref() {
            Some(volume_id) => snapshots
                .into_iter()
                .filter(|s| s.lun.as_ref().is_some_and(|l| l.id == volume_id))
                .collect(),
            None => snapshots,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id, "snapshot id")?;
        self.client
            .session()
            .delete(&uri::instance_by_id(SNAP_TYPE, id))
            .await
            .map_err(|e| map_not_found(e, "snapshot", id))
    }
}
