//! Consistency group records. Consistency groups live under the
//! `storageResource` umbrella type.

use serde::{Deserialize, Serialize};

use super::common::{Health, IdRef};

/// Consistency group response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyGroup {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub luns: Vec<IdRef>,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Body of the `createConsistencyGroup` type-level action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsistencyGroupBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Entry referencing a LUN in the add/remove lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyGroupLun {
    pub lun: IdRef,
}

/// Body of the `modifyConsistencyGroup` instance action.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyConsistencyGroupBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lun_add: Option<Vec<ConsistencyGroupLun>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lun_remove: Option<Vec<ConsistencyGroupLun>>,
}
