//! Storage pool adapter. Pools are read-only from this client.

use unisphere_domain::{Collection, Instance, Result, StoragePool};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const POOL_TYPE: &str = "pool";
const POOL_FIELDS: &str =
    "id,name,description,sizeTotal,sizeFree,sizeUsed,sizeSubscribed,poolFastVP,health";

#[derive(Debug)]
pub struct PoolApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> PoolApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<StoragePool> {
        let id = require_id(id, "pool id")?;
        let instance: Instance<StoragePool> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(POOL_TYPE, id, POOL_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "pool", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<StoragePool> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<StoragePool> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(POOL_TYPE, &name, POOL_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "pool", &name))?;
        Ok(instance.content)
    }

    pub async fn list(&self) -> Result<Vec<StoragePool>> {
        let collection: Collection<StoragePool> = self
            .client
            .session()
            .get(&uri::list_instances_with_fields(POOL_TYPE, POOL_FIELDS))
            .await?;
        Ok(collection.into_contents())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path, query_param_contains};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::authenticated_client;
    use unisphere_domain::UnisphereError;

    #[tokio::test]
    async fn find_by_id_unwraps_the_instance_envelope() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/pool/pool_1"))
            .and(query_param_contains("fields", "poolFastVP"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": {
                    "id": "pool_1",
                    "name": "perf",
                    "sizeTotal": 10_995_116_277_760u64,
                    "poolFastVP": {"status": 2}
                }
            })))
            .mount(&server)
            .await;

        let pool = client.pools().find_by_id("pool_1").await.expect("pool");
        assert_eq!(pool.name, "perf");
        assert!(pool.supports_fast_vp());
    }

    #[tokio::test]
    async fn missing_pool_maps_to_not_found() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/pool/name:ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"httpStatusCode": 404, "errorCode": 131_149_829,
                          "messages": [{"en-US": "The requested resource does not exist."}]}
            })))
            .mount(&server)
            .await;

        let err = client.pools().find_by_name("ghost").await.expect_err("404");
        match err {
            UnisphereError::NotFound { kind, identifier } => {
                assert_eq!(kind, "pool");
                assert_eq!(identifier, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn list_flattens_entries() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/types/pool/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entries": [
                    {"content": {"id": "pool_1", "name": "perf"}},
                    {"content": {"id": "pool_2", "name": "capacity"}}
                ]
            })))
            .mount(&server)
            .await;

        let pools = client.pools().list().await.expect("pools");
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[1].id, "pool_2");
    }
}
