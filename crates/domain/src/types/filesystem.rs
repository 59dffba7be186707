//! Filesystem records.

use serde::{Deserialize, Serialize};

use super::common::{Health, IdRef};

/// Filesystem response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filesystem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size_total: u64,
    #[serde(default)]
    pub size_allocated: u64,
    #[serde(default)]
    pub is_thin_enabled: bool,
    #[serde(default)]
    pub is_data_reduction_enabled: bool,
    #[serde(default)]
    pub pool: Option<IdRef>,
    #[serde(default)]
    pub nas_server: Option<IdRef>,
    #[serde(default)]
    pub storage_resource: Option<IdRef>,
    #[serde(default)]
    pub nfs_share: Vec<IdRef>,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Protocol selection for a new filesystem. NFS only by default; the CIFS
/// side of the event settings stays disabled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEventSettings {
    #[serde(rename = "isCIFSEnabled")]
    pub is_cifs_enabled: bool,
    #[serde(rename = "isNFSEnabled")]
    pub is_nfs_enabled: bool,
}

impl Default for FileEventSettings {
    fn default() -> Self {
        Self { is_cifs_enabled: false, is_nfs_enabled: true }
    }
}

/// `fsParameters` block of the create/modify actions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FsParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nas_server: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_protocols: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_thin_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_data_reduction_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_vp_parameters: Option<super::lun::FastVpParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_event_settings: Option<FileEventSettings>,
}

/// Body of the `createFilesystem` type-level action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilesystemBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fs_parameters: FsParameters,
}

/// Body of the `modifyFilesystem` instance action. Besides resizing, the
/// same action carries NFS share create/modify/delete lists.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyFilesystemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fs_parameters: Option<FsParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfs_share_create: Option<Vec<super::nfs_share::NfsShareCreate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfs_share_modify: Option<Vec<super::nfs_share::NfsShareModify>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nfs_share_delete: Option<Vec<super::nfs_share::NfsShareDelete>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_settings_default_to_nfs_only() {
        let json = serde_json::to_value(FileEventSettings::default()).expect("json");
        assert_eq!(json["isNFSEnabled"], true);
        assert_eq!(json["isCIFSEnabled"], false);
    }

    #[test]
    fn modify_body_omits_unused_lists() {
        let body = ModifyFilesystemBody {
            fs_parameters: Some(FsParameters { size: Some(1 << 31), ..FsParameters::default() }),
            ..ModifyFilesystemBody::default()
        };

        let json = serde_json::to_value(&body).expect("json");
        assert_eq!(json["fsParameters"]["size"], 1u64 << 31);
        assert!(json.get("nfsShareCreate").is_none());
        assert!(json.get("nfsShareModify").is_none());
    }
}
