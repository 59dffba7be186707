//! IP interface records.

use serde::Deserialize;

use super::common::IdRef;

/// Interface type token for iSCSI interfaces.
pub const IP_INTERFACE_TYPE_ISCSI: i32 = 2;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpInterface {
    pub id: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub netmask: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default, rename = "type")]
    pub interface_type: i32,
    #[serde(default)]
    pub ip_port: Option<IdRef>,
}

impl IpInterface {
    pub fn is_iscsi(&self) -> bool {
        self.interface_type == IP_INTERFACE_TYPE_ISCSI
    }
}
