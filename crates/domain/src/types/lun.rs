//! LUN (volume) records.

use serde::{Deserialize, Serialize};

use super::common::{Health, IdRef};

/// Tiering policy accepted on create when the pool reports FastVP support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieringPolicy {
    StartHighThenAuto,
    Auto,
    HighestAvailable,
    LowestAvailable,
}

impl TieringPolicy {
    /// Integer token the wire schema expects.
    pub fn token(self) -> i32 {
        match self {
            Self::StartHighThenAuto => 0,
            Self::Auto => 1,
            Self::HighestAvailable => 2,
            Self::LowestAvailable => 3,
        }
    }
}

/// Host access level granted when exporting a LUN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostLunAccess {
    /// Production LUN only. The historical default.
    Production,
    /// Snapshots only.
    Snapshot,
    /// Production LUN and its snapshots.
    Both,
}

impl HostLunAccess {
    /// Access mask token the wire schema expects.
    pub fn mask(self) -> i32 {
        match self {
            Self::Production => 1,
            Self::Snapshot => 2,
            Self::Both => 3,
        }
    }
}

/// LUN response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lun {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wwn: String,
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
    pub storage_resource: Option<IdRef>,
    #[serde(default)]
    pub host_access: Vec<BlockHostAccessResp>,
    #[serde(default)]
    pub health: Option<Health>,
}

/// One host-access grant as reported by the array.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHostAccessResp {
    #[serde(default)]
    pub host: Option<IdRef>,
    #[serde(default)]
    pub access_mask: i32,
}

/// One host-access grant as sent on export/unexport.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHostAccess {
    pub host: IdRef,
    pub access_mask: i32,
}

/// `lunParameters` block of the create/modify actions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_thin_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_data_reduction_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_vp_parameters: Option<FastVpParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub io_limit_parameters: Option<IdRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_access: Option<Vec<BlockHostAccess>>,
}

/// Tiering parameters, accepted only when the pool reports FastVP.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastVpParameters {
    pub tiering_policy: i32,
}

/// Body of the `createLun` type-level action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLunBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub lun_parameters: LunParameters,
}

/// Body of the `modifyLun` instance action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyLunBody {
    pub lun_parameters: LunParameters,
}
