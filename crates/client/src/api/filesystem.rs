//! Filesystem adapter.

use tracing::debug;
use unisphere_domain::{
    Collection, CreateFilesystemBody, Filesystem, FileEventSettings, FsParameters, IdRef,
    Instance, ModifyFilesystemBody, Result, StorageResourceCreated, UnisphereError,
    ValidationError, LICENSE_DATA_REDUCTION, LICENSE_THIN_PROVISIONING,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const FILESYSTEM_TYPE: &str = "filesystem";
const FILESYSTEM_FIELDS: &str = "id,name,description,sizeTotal,sizeAllocated,isThinEnabled,isDataReductionEnabled,pool,nasServer,storageResource,nfsShare,health";

/// Inputs for a filesystem create.
#[derive(Debug, Clone)]
pub struct CreateFilesystemRequest {
    pub name: String,
    pub description: Option<String>,
    pub pool_id: String,
    pub nas_server_id: String,
    pub size: u64,
    pub thin: bool,
    pub data_reduction: bool,
}

#[derive(Debug)]
pub struct FilesystemApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> FilesystemApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Create an NFS-enabled filesystem.
    ///
    /// Thin provisioning and data reduction are checked against the array's
    /// license state first; an absent or invalid license fails the create
    /// before anything is written.
    pub async fn create(&self, request: CreateFilesystemRequest) -> Result<IdRef> {
        let name = validate_resource_name(&request.name, MAX_RESOURCE_NAME_LEN)?;
        let pool_id = require_id(&request.pool_id, "pool id")?;
        let nas_server_id = require_id(&request.nas_server_id, "NAS server id")?;

        if request.thin {
            self.client.system().ensure_licensed(LICENSE_THIN_PROVISIONING).await?;
        }
        if request.data_reduction {
            self.client.system().ensure_licensed(LICENSE_DATA_REDUCTION).await?;
        }

        let body = CreateFilesystemBody {
            name,
            description: request.description,
            fs_parameters: FsParameters {
                pool: Some(IdRef::new(pool_id)),
                nas_server: Some(IdRef::new(nas_server_id)),
                size: Some(request.size),
                is_thin_enabled: Some(request.thin),
                is_data_reduction_enabled: Some(request.data_reduction),
                file_event_settings: Some(FileEventSettings::default()),
                ..FsParameters::default()
            },
        };

        let created: Instance<StorageResourceCreated> = self
            .client
            .session()
            .post(&uri::storage_resource_action("createFilesystem"), &body)
            .await?;
        Ok(created.content.storage_resource)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Filesystem> {
        let id = require_id(id, "filesystem id")?;
        let instance: Instance<Filesystem> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(FILESYSTEM_TYPE, id, FILESYSTEM_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "filesystem", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Filesystem> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<Filesystem> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(FILESYSTEM_TYPE, &name, FILESYSTEM_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "filesystem", &name))?;
        Ok(instance.content)
    }

    pub async fn list(&self) -> Result<Vec<Filesystem>> {
        let collection: Collection<Filesystem> = self
            .client
            .session()
            .get(&uri::list_instances_with_fields(FILESYSTEM_TYPE, FILESYSTEM_FIELDS))
            .await?;
        Ok(collection.into_contents())
    }

    /// Delete the storage resource backing the filesystem.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id, "filesystem id")?;
        let fs = self.find_by_id(id).await?;
        let resource_id = self.resource_id(&fs, id)?;
        self.client
            .session()
            .delete(&uri::instance_by_id("storageResource", &resource_id))
            .await
            .map_err(|e| map_not_found(e, "filesystem", id))
    }

    /// Grow the filesystem to `new_size` bytes. Equal size is a no-op;
    /// a smaller size is rejected before any write.
    pub async fn expand(&self, id: &str, new_size: u64) -> Result<()> {
        let id = require_id(id, "filesystem id")?;
        let fs = self.find_by_id(id).await?;

        if fs.size_total == new_size {
            debug!(%id, size = new_size, "filesystem already at requested size");
            return Ok(());
        }
        if new_size < fs.size_total {
            return Err(ValidationError::SizeNotLarger {
                current: fs.size_total,
                requested: new_size,
            }
            .into());
        }

        let resource_id = self.resource_id(&fs, id)?;
        let body = ModifyFilesystemBody {
            fs_parameters: Some(FsParameters { size: Some(new_size), ..FsParameters::default() }),
            ..ModifyFilesystemBody::default()
        };
        self.client
            .session()
            .post(&uri::instance_action("storageResource", &resource_id, "modifyFilesystem"), &body)
            .await
    }

    fn resource_id(&self, fs: &Filesystem, id: &str) -> Result<String> {
        fs.storage_resource.as_ref().map(|r| r.id.clone()).ok_or_else(|| {
            UnisphereError::Internal(format!("filesystem '{id}' has no storage resource"))
        })
    }
}
