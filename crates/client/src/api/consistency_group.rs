//! Consistency group adapter. Groups are storage resources, so lookups use
//! the `storageResource` type and mutations use its instance actions.

use unisphere_domain::{
    ConsistencyGroup, ConsistencyGroupLun, CreateConsistencyGroupBody, IdRef, Instance,
    ModifyConsistencyGroupBody, Result, StorageResourceCreated,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_CONSISTENCY_GROUP_NAME_LEN};

const RESOURCE_TYPE: &str = "storageResource";
const GROUP_FIELDS: &str = "id,name,description,luns,health";

/// Inputs for a consistency group modify. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ModifyConsistencyGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub add_lun_ids: Vec<String>,
    pub remove_lun_ids: Vec<String>,
}

#[derive(Debug)]
pub struct ConsistencyGroupApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> ConsistencyGroupApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Create an empty group. Group names allow up to 95 characters.
    pub async fn create(&self, name: &str, description: Option<String>) -> Result<IdRef> {
        let name = validate_resource_name(name, MAX_CONSISTENCY_GROUP_NAME_LEN)?;
        let body = CreateConsistencyGroupBody { name, description };
        let created: Instance<StorageResourceCreated> = self
            .client
            .session()
            .post(&uri::storage_resource_action("createConsistencyGroup"), &body)
            .await?;
        Ok(created.content.storage_resource)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<ConsistencyGroup> {
        let id = require_id(id, "consistency group id")?;
        let instance: Instance<ConsistencyGroup> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(RESOURCE_TYPE, id, GROUP_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "consistency group", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<ConsistencyGroup> {
        let name = validate_resource_name(name, MAX_CONSISTENCY_GROUP_NAME_LEN)?;
        let instance: Instance<ConsistencyGroup> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(RESOURCE_TYPE, &name, GROUP_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "consistency group", &name))?;
        Ok(instance.content)
    }

    /// Rename the group and/or adjust its LUN membership.
    pub async fn modify(&self, id: &str, request: ModifyConsistencyGroupRequest) -> Result<()> {
        let id = require_id(id, "consistency group id")?;
        let name = match request.name {
            Some(name) => Some(validate_resource_name(&name, MAX_CONSISTENCY_GROUP_NAME_LEN)?),
            None => None,
        };

        let to_entries = |ids: Vec<String>| -> Option<Vec<ConsistencyGroupLun>> {
            if ids.is_empty() {
                None
            } else {
                Some(ids.into_iter().map(|id| ConsistencyGroupLun { lun: IdRef::new(id) }).collect())
            }
        };
        let body = ModifyConsistencyGroupBody {
            name,
            description: request.description,
            lun_add: to_entries(request.add_lun_ids),
            lun_remove: to_entries(request.remove_lun_ids),
        };
        self.client
            .session()
            .post(&uri::instance_action(RESOURCE_TYPE, id, "modifyConsistencyGroup"), &body)
            .await
            .map_err(|e| map_not_found(e, "consistency group", id))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id, "consistency group id")?;
        self.client
            .session()
            .delete(&uri::instance_by_id(RESOURCE_TYPE, id))
            .await
            .map_err(|e| map_not_found(e, "consistency group", id))
    }
}
