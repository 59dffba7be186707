//! Host, host initiator and host IP port records.

use serde::{Deserialize, Serialize};

use super::common::{Health, IdRef};

/// Initiator protocol, derived from the initiator address format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiatorType {
    FibreChannel,
    Iscsi,
}

impl InitiatorType {
    /// Integer token the wire schema expects.
    pub fn token(self) -> i32 {
        match self {
            Self::FibreChannel => 1,
            Self::Iscsi => 2,
        }
    }

    /// IQN addresses are iSCSI; anything else is treated as an FC WWN.
    pub fn from_address(address: &str) -> Self {
        if address.to_ascii_lowercase().starts_with("iqn") {
            Self::Iscsi
        } else {
            Self::FibreChannel
        }
    }
}

/// Host response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub host_type: i32,
    #[serde(default)]
    pub fc_host_initiators: Vec<IdRef>,
    #[serde(default)]
    pub iscsi_host_initiators: Vec<IdRef>,
    #[serde(default)]
    pub host_ip_ports: Vec<IdRef>,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Host initiator response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInitiator {
    pub id: String,
    #[serde(default)]
    pub initiator_id: String,
    #[serde(default, rename = "type")]
    pub initiator_type: i32,
    #[serde(default)]
    pub parent_host: Option<IdRef>,
    #[serde(default)]
    pub is_ignored: bool,
    #[serde(default)]
    pub paths: Vec<IdRef>,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Host IP port response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostIpPort {
    pub id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub host: Option<IdRef>,
}

/// Body posted to `/api/types/host/instances`. Type token 1 is a manually
/// managed host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostBody {
    #[serde(rename = "type")]
    pub host_type: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body posted to `/api/types/hostInitiator/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostInitiatorBody {
    pub host: IdRef,
    pub initiator_type: i32,
    #[serde(rename = "initiatorWWNorIqn")]
    pub initiator_wwn_or_iqn: String,
}

/// Body of the host-initiator `modify` instance action, used to attach an
/// orphaned initiator to a host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyHostInitiatorBody {
    pub host: IdRef,
}

/// Body posted to `/api/types/hostIPPort/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostIpPortBody {
    pub host: IdRef,
    pub address: String,
}
