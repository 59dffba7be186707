//! Array-level records: unauthenticated system info and license state.

use serde::Deserialize;

/// License feature id for thin provisioning.
pub const LICENSE_THIN_PROVISIONING: &str = "THIN_PROVISIONING";
/// License feature id for inline data reduction.
pub const LICENSE_DATA_REDUCTION: &str = "DATA_REDUCTION";

/// Response of `/api/types/basicSystemInfo/instances`, served without
/// authentication.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicSystemInfo {
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub software_version: String,
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub earliest_api_version: String,
}

/// License instance for a single feature.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_installed: bool,
    #[serde(default)]
    pub is_valid: bool,
}

impl License {
    /// A feature is usable only when its license is installed and valid.
    pub fn is_usable(&self) -> bool {
        self.is_installed && self.is_valid
    }
}
