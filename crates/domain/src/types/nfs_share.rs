//! NFS share records.

use serde::{Deserialize, Serialize};

use super::common::IdRef;

/// Host-access category mutated by a share modify call. The array accepts
/// exactly one category per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfsShareAccess {
    ReadOnly,
    ReadWrite,
    ReadOnlyRoot,
    ReadWriteRoot,
}

/// Default access granted to hosts not listed in any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NfsShareDefaultAccess {
    NoAccess,
    ReadOnly,
    ReadWrite,
    Root,
    RoRoot,
}

impl NfsShareDefaultAccess {
    /// Integer token the wire schema expects.
    pub fn token(self) -> i32 {
        match self {
            Self::NoAccess => 0,
            Self::ReadOnly => 1,
            Self::ReadWrite => 2,
            Self::Root => 3,
            Self::RoRoot => 4,
        }
    }
}

/// NFS share response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsShare {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub export_paths: Vec<String>,
    #[serde(default)]
    pub filesystem: Option<IdRef>,
    #[serde(default)]
    pub snap: Option<IdRef>,
    #[serde(default)]
    pub read_only_hosts: Vec<IdRef>,
    #[serde(default)]
    pub read_write_hosts: Vec<IdRef>,
    #[serde(default)]
    pub read_only_root_access_hosts: Vec<IdRef>,
    #[serde(default)]
    pub root_access_hosts: Vec<IdRef>,
}

/// Share-level parameters shared by the create and modify list entries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsShareParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_access: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_hosts: Option<Vec<IdRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_write_hosts: Option<Vec<IdRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_root_access_hosts: Option<Vec<IdRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_access_hosts: Option<Vec<IdRef>>,
}

impl NfsShareParameters {
    /// Parameters mutating the single category `access` selects.
    pub fn for_access(access: NfsShareAccess, hosts: Vec<IdRef>) -> Self {
        let mut params = Self::default();
        match access {
            NfsShareAccess::ReadOnly => params.read_only_hosts = Some(hosts),
            NfsShareAccess::ReadWrite => params.read_write_hosts = Some(hosts),
            NfsShareAccess::ReadOnlyRoot => params.read_only_root_access_hosts = Some(hosts),
            NfsShareAccess::ReadWriteRoot => params.root_access_hosts = Some(hosts),
        }
        params
    }
}

/// Entry of the `nfsShareCreate` list on `modifyFilesystem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsShareCreate {
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfs_share_parameters: Option<NfsShareParameters>,
}

/// Entry of the `nfsShareModify` list on `modifyFilesystem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsShareModify {
    pub nfs_share: IdRef,
    pub nfs_share_parameters: NfsShareParameters,
}

/// Entry of the `nfsShareDelete` list on `modifyFilesystem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NfsShareDelete {
    pub nfs_share: IdRef,
}

/// Body of the snapshot-backed share create, which posts directly to the
/// `nfsShare` type rather than through `modifyFilesystem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNfsShareFromSnapshotBody {
    pub snap: IdRef,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_access: Option<i32>,
}
