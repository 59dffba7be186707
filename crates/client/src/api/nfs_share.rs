//! NFS share adapter.
//!
//! Filesystem-backed shares are created, modified and deleted through the
//! backing storage resource's `modifyFilesystem` action; snapshot-backed
//! shares post directly to the `nfsShare` type.

use unisphere_domain::{
    Collection, CreateNfsShareFromSnapshotBody, IdRef, Instance, ModifyFilesystemBody, NfsShare,
    NfsShareAccess, NfsShareCreate, NfsShareDefaultAccess, NfsShareDelete, NfsShareModify,
    NfsShareParameters, Result, UnisphereError,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const NFS_SHARE_TYPE: &str = "nfsShare";
const NFS_SHARE_FIELDS: &str = "id,name,path,exportPaths,filesystem,snap,readOnlyHosts,readWriteHosts,readOnlyRootAccessHosts,rootAccessHosts";

#[derive(Debug)]
pub struct NfsShareApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> NfsShareApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Create a share exporting `path` of an existing filesystem.
    pub async fn create_from_filesystem(
        &self,
        filesystem_id: &str,
        name: &str,
        path: &str,
        default_access: NfsShareDefaultAccess,
    ) -> Result<NfsShare> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let filesystem_id = require_id(filesystem_id, "filesystem id")?;

        let fs = self.client.filesystems().find_by_id(filesystem_id).await?;
        let resource_id = fs.storage_resource.map(|r| r.id).ok_or_else(|| {
            UnisphereError::Internal(format!(
                "filesystem '{filesystem_id}' has no storage resource"
            ))
        })?;

        let body = ModifyFilesystemBody {
            nfs_share_create: Some(vec![NfsShareCreate {
                name: name.clone(),
                path: path.to_string(),
                nfs_share_parameters: Some(NfsShareParameters {
                    default_access: Some(default_access.token()),
                    ..NfsShareParameters::default()
                }),
            }]),
            ..ModifyFilesystemBody::default()
        };
        self.client
            .session()
            .post::<_, ()>(
                &uri::instance_action("storageResource", &resource_id, "modifyFilesystem"),
                &body,
            )
            .await?;

        self.find_by_name(&name).await
    }

    /// Create a share exporting a filesystem snapshot.
    pub async fn create_from_snapshot(
        &self,
        snapshot_id: &str,
        name: &str,
        path: &str,
        default_access: NfsShareDefaultAccess,
    ) -> Result<NfsShare> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let snapshot_id = require_id(snapshot_id, "snapshot id")?;

        let body = CreateNfsShareFromSnapshotBody {
            snap: IdRef::new(snapshot_id),
            name: name.clone(),
            path: path.to_string(),
            default_access: Some(default_access.token()),
        };
        self.client
            .session()
            .post::<_, ()>(&uri::list_instances(NFS_SHARE_TYPE), &body)
            .await?;

        self.find_by_name(&name).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<NfsShare> {
        let id = require_id(id, "NFS share id")?;
        let instance: Instance<NfsShare> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(NFS_SHARE_TYPE, id, NFS_SHARE_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "NFS share", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<NfsShare> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<NfsShare> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(NFS_SHARE_TYPE, &name, NFS_SHARE_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "NFS share", &name))?;
        Ok(instance.content)
    }

    pub async fn list(&self) -> Result<Vec<NfsShare>> {
        let collection: Collection<NfsShare> = self
            .client
            .session()
            .get(&uri::list_instances_with_fields(NFS_SHARE_TYPE, NFS_SHARE_FIELDS))
            .await?;
        Ok(collection.into_contents())
    }

    /// Replace the host list of exactly one access category.
    pub async fn modify_host_access(
        &self,
        share_id: &str,
        access: NfsShareAccess,
        host_ids: &[&str],
    ) -> Result<()> {
        let share_id = require_id(share_id, "NFS share id")?;
        let share = self.find_by_id(share_id).await?;

        let hosts = host_ids.iter().map(|id| IdRef::new(*id)).collect();
        let body = ModifyFilesystemBody {
            nfs_share_modify: Some(vec![NfsShareModify {
                nfs_share: IdRef::new(&share.id),
                nfs_share_parameters: NfsShareParameters::for_access(access, hosts),
            }]),
            ..ModifyFilesystemBody::default()
        };
        let resource_id = self.filesystem_resource_id(&share).await?;
        self.client
            .session()
            .post(
                &uri::instance_action("storageResource", &resource_id, "modifyFilesystem"),
                &body,
            )
            .await
    }

    /// Delete a share. Filesystem-backed shares go through `modifyFilesystem`;
    /// snapshot-backed shares are deleted directly.
    pub async fn delete(&self, share_id: &str) -> Result<()> {
        let share_id = require_id(share_id, "NFS share id")?;
        let share = self.find_by_id(share_id).await?;

        if share.filesystem.is_some() {
            let resource_id = self.filesystem_resource_id(&share).await?;
            let body = ModifyFilesystemBody {
                nfs_share_delete: Some(vec![NfsShareDelete { nfs_share: IdRef::new(&share.id) }]),
                ..ModifyFilesystemBody::default()
            };
            self.client
                .session()
                .post(
                    &uri::instance_action("storageResource", &resource_id, "modifyFilesystem"),
                    &body,
                )
                .await
        } else {
            self.client
                .session()
                .delete(&uri::instance_by_id(NFS_SHARE_TYPE, &share.id))
                .await
                .map_err(|e| map_not_found(e, "NFS share", share_id))
        }
    }

    async fn filesystem_resource_id(&self, share: &NfsShare) -> Result<String> {
        let fs_id = share.filesystem.as_ref().map(|r| r.id.as_str()).ok_or_else(|| {
            UnisphereError::Internal(format!("NFS share '{}' has no filesystem", share.id))
        })?;
        let fs = self.client.filesystems().find_by_id(fs_id).await?;
        fs.storage_resource.map(|r| r.id).ok_or_else(|| {
            UnisphereError::Internal(format!("filesystem '{fs_id}' has no storage resource"))
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::authenticated_client;
    use super::*;

    fn filesystem_body() -> serde_json::Value {
        serde_json::json!({
            "content": {"id": "fs_1", "storageResource": {"id": "res_9"}}
        })
    }

    fn share_body(with_filesystem: bool) -> serde_json::Value {
        let mut content = serde_json::json!({
            "id": "NFSShare_1",
            "name": "share1",
            "path": "/"
        });
        if with_filesystem {
            content["filesystem"] = serde_json::json!({"id": "fs_1"});
        } else {
            content["snap"] = serde_json::json!({"id": "snap_1"});
        }
        serde_json::json!({"content": content})
    }

    #[tokio::test]
    async fn create_from_filesystem_goes_through_modify_filesystem() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/filesystem/fs_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(filesystem_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/instances/storageResource/res_9/action/modifyFilesystem"))
            .and(body_partial_json(serde_json::json!({
                "nfsShareCreate": [{
                    "name": "share1",
                    "path": "/",
                    "nfsShareParameters": {"defaultAccess": 0}
                }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/instances/nfsShare/name:share1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(share_body(true)))
            .mount(&server)
            .await;

        let share = client
            .nfs_shares()
            .create_from_filesystem("fs_1", "share1", "/", NfsShareDefaultAccess::NoAccess)
            .await
            .expect("create");
        assert_eq!(share.id, "NFSShare_1");
    }

    #[tokio::test]
    async fn create_from_snapshot_posts_to_the_share_type() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("POST"))
            .and(path("/api/types/nfsShare/instances"))
            .and(body_partial_json(serde_json::json!({
                "snap": {"id": "snap_1"},
                "name": "share1",
                "path": "/",
                "defaultAccess": 3
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/instances/nfsShare/name:share1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(share_body(false)))
            .mount(&server)
            .await;

        let share = client
            .nfs_shares()
            .create_from_snapshot("snap_1", "share1", "/", NfsShareDefaultAccess::Root)
            .await
            .expect("create");
        assert_eq!(share.snap.expect("snap ref").id, "snap_1");
    }

    #[tokio::test]
    async fn modify_touches_exactly_one_access_category() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/nfsShare/NFSShare_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(share_body(true)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/instances/filesystem/fs_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(filesystem_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/instances/storageResource/res_9/action/modifyFilesystem"))
            .and(body_partial_json(serde_json::json!({
                "nfsShareModify": [{
                    "nfsShare": {"id": "NFSShare_1"},
                    "nfsShareParameters": {"readWriteHosts": [{"id": "Host_1"}]}
                }]
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client
            .nfs_shares()
            .modify_host_access("NFSShare_1", NfsShareAccess::ReadWrite, &["Host_1"])
            .await
            .expect("modify");
    }

    #[tokio::test]
    async fn snapshot_backed_share_is_deleted_directly() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/nfsShare/NFSShare_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(share_body(false)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/instances/nfsShare/NFSShare_1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.nfs_shares().delete("NFSShare_1").await.expect("delete");
    }
}
