//! Snapshot records.

use serde::{Deserialize, Serialize};

use super::common::IdRef;

/// Access granted when a filesystem snapshot is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesystemAccessType {
    Checkpoint,
    Protocol,
}

impl FilesystemAccessType {
    /// Integer token the wire schema expects.
    pub fn token(self) -> i32 {
        match self {
            Self::Checkpoint => 0,
            Self::Protocol => 1,
        }
    }
}

/// Snapshot response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub state: i32,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub is_auto_delete: bool,
    #[serde(default)]
    pub creation_time: Option<String>,
    #[serde(default)]
    pub expiration_time: Option<String>,
    #[serde(default)]
    pub storage_resource: Option<IdRef>,
    #[serde(default)]
    pub lun: Option<IdRef>,
    #[serde(default)]
    pub parent_snap: Option<IdRef>,
}

/// Body posted to `/api/types/snap/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSnapshotBody {
    pub storage_resource: IdRef,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_auto_delete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_access_type: Option<i32>,
}
