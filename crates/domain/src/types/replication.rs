//! Remote system and replication session records.

use serde::{Deserialize, Serialize};

use super::common::{Health, IdRef};

/// Remote array known to this one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSystem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub management_address: String,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Replication session response record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationSession {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub src_resource_id: String,
    #[serde(default)]
    pub dst_resource_id: String,
    #[serde(default)]
    pub max_time_out_of_sync: i32,
    #[serde(default)]
    pub remote_system: Option<IdRef>,
    #[serde(default)]
    pub status: i32,
    #[serde(default)]
    pub health: Option<Health>,
}

/// Body posted to `/api/types/replicationSession/instances`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplicationSessionBody {
    pub name: String,
    pub src_resource_id: String,
    pub dst_resource_id: String,
    pub max_time_out_of_sync: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_system: Option<IdRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_body_carries_both_resource_ids() {
        let body = CreateReplicationSessionBody {
            name: "rep1".into(),
            src_resource_id: "res_src".into(),
            dst_resource_id: "res_dst".into(),
            max_time_out_of_sync: 60,
            remote_system: Some(IdRef::new("RS_1")),
        };

        let json = serde_json::to_value(&body).expect("json");
        assert_eq!(json["srcResourceId"], "res_src");
        assert_eq!(json["dstResourceId"], "res_dst");
        assert_eq!(json["maxTimeOutOfSync"], 60);
        assert_eq!(json["remoteSystem"]["id"], "RS_1");
    }
}
