//! Volume (LUN) adapter.

use tracing::debug;
use unisphere_domain::{
    BlockHostAccess, CreateLunBody, FastVpParameters, HostLunAccess, IdRef, Instance, Lun,
    LunParameters, ModifyLunBody, Result, StorageResourceCreated, TieringPolicy, UnisphereError,
    ValidationError,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const LUN_TYPE: &str = "lun";
const LUN_FIELDS: &str = "id,name,description,wwn,sizeTotal,sizeAllocated,pool,isThinEnabled,isDataReductionEnabled,hostAccess,storageResource,health";

/// Inputs for a LUN create.
#[derive(Debug, Clone)]
pub struct CreateVolumeRequest {
    pub name: String,
    pub description: Option<String>,
    pub pool_id: String,
    pub size: u64,
    pub thin: bool,
    pub data_reduction: bool,
    /// Host-IO-limit policy attached by id.
    pub host_io_limit_id: Option<String>,
    /// Applied only when the pool reports FastVP support.
    pub tiering_policy: Option<TieringPolicy>,
}

/// Adapter over LUNs and their storage-resource actions.
#[derive(Debug)]
pub struct VolumeApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> VolumeApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Create a LUN in the given pool.
    ///
    /// The pool is fetched first; a missing pool aborts the create before
    /// anything is written. Tiering parameters are attached only when the
    /// pool reports FastVP support.
    pub async fn create(&self, request: CreateVolumeRequest) -> Result<IdRef> {
        let name = validate_resource_name(&request.name, MAX_RESOURCE_NAME_LEN)?;
        let pool_id = require_id(&request.pool_id, "pool id")?;

        let pool = self.client.pools().find_by_id(pool_id).await?;

        let fast_vp_parameters = match request.tiering_policy {
            Some(policy) if pool.supports_fast_vp() => {
                Some(FastVpParameters { tiering_policy: policy.token() })
            }
            Some(_) => {
                debug!(pool = %pool.id, "pool has no FastVP support, dropping tiering policy");
                None
            }
            None => None,
        };

        let body = CreateLunBody {
            name,
            description: request.description,
            lun_parameters: LunParameters {
                pool: Some(IdRef::new(&pool.id)),
                size: Some(request.size),
                is_thin_enabled: Some(request.thin),
                is_data_reduction_enabled: Some(request.data_reduction),
                fast_vp_parameters,
                io_limit_parameters: request.host_io_limit_id.map(IdRef::new),
                host_access: None,
            },
        };

        let created: Instance<StorageResourceCreated> = self
            .client
            .session()
            .post(&uri::storage_resource_action("createLun"), &body)
            .await?;
        Ok(created.content.storage_resource)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Lun> {
        let id = require_id(id, "LUN id")?;
        let instance: Instance<Lun> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(LUN_TYPE, id, LUN_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "LUN", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Lun> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<Lun> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(LUN_TYPE, &name, LUN_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "LUN", &name))?;
        Ok(instance.content)
    }

    pub async fn list(&self) -> Result<Vec<Lun>> {
        let collection: unisphere_domain::Collection<Lun> = self
            .client
            .session()
            .get(&uri::list_instances_with_fields(LUN_TYPE, LUN_FIELDS))
            .await?;
        Ok(collection.into_contents())
    }

    /// Delete the storage resource backing the LUN.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id, "LUN id")?;
        let lun = self.find_by_id(id).await?;
        let resource_id = lun
            .storage_resource
            .map(|r| r.id)
            .ok_or_else(|| UnisphereError::Internal(format!("LUN '{id}' has no storage resource")))?;
        self.client
            .session()
            .delete(&uri::instance_by_id("storageResource", &resource_id))
            .await
            .map_err(|e| map_not_found(e, "LUN", id))
    }

    /// Grow the LUN to `new_size` bytes.
    ///
    /// Equal size is a no-op (no POST); a smaller size is rejected before
    /// any write.
    pub async fn expand(&self, id: &str, new_size: u64) -> Result<()> {
        let id = require_id(id, "LUN id")?;
        let lun = self.find_by_id(id).await?;

        if lun.size_total == new_size {
            debug!(%id, size = new_size, "LUN already at requested size");
            return Ok(());
        }
        if new_size < lun.size_total {
            return Err(ValidationError::SizeNotLarger {
                current: lun.size_total,
                requested: new_size,
            }
            .into());
        }

        let resource_id = lun
            .storage_resource
            .map(|r| r.id)
            .ok_or_else(|| UnisphereError::Internal(format!("LUN '{id}' has no storage resource")))?;
        let body = ModifyLunBody {
            lun_parameters: LunParameters { size: Some(new_size), ..LunParameters::default() },
        };
        self.client
            .session()
            .post(&uri::instance_action("storageResource", &resource_id, "modifyLun"), &body)
            .await
    }

    /// Grant a host access to the LUN. `access` defaults to the
    /// production-only mask.
    pub async fn export(
        &self,
        id: &str,
        host_id: &str,
        access: Option<HostLunAccess>,
    ) -> Result<()> {
        let id = require_id(id, "LUN id")?;
        let host_id = require_id(host_id, "host id")?;
        let mask = access.unwrap_or(HostLunAccess::Production).mask();
        let entries = vec![BlockHostAccess { host: IdRef::new(host_id), access_mask: mask }];
        self.modify_host_access(id, entries).await
    }

    /// Revoke all host access from the LUN.
    pub async fn unexport(&self, id: &str) -> Result<()> {
        let id = require_id(id, "LUN id")?;
        self.modify_host_access(id, Vec::new()).await
    }

    async fn modify_host_access(&self, id: &str, entries: Vec<BlockHostAccess>) -> Result<()> {
        let lun = self.find_by_id(id).await?;
        let resource_id = lun
            .storage_resource
            .map(|r| r.id)
            .ok_or_else(|| UnisphereError::Internal(format!("LUN '{id}' has no storage resource")))?;
        let body = ModifyLunBody {
            lun_parameters: LunParameters {
                host_access: Some(entries),
                ..LunParameters::default()
            },
        };
        self.client
            .session()
            .post(&uri::instance_action("storageResource", &resource_id, "modifyLun"), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{authenticated_client, non_login_requests};
    use super::*;

    fn lun_body(id: &str, size: u64) -> serde_json::Value {
        serde_json::json!({
            "content": {
                "id": id,
                "name": "vol1",
                "sizeTotal": size,
                "storageResource": {"id": "res_1"}
            }
        })
    }

    fn pool_body(fast_vp_status: i32) -> serde_json::Value {
        serde_json::json!({
            "content": {
                "id": "pool_1",
                "name": "pool1",
                "poolFastVP": {"status": fast_vp_status}
            }
        })
    }

    fn create_request() -> CreateVolumeRequest {
        CreateVolumeRequest {
            name: "vol1".into(),
            description: None,
            pool_id: "pool_1".into(),
            size: 1 << 30,
            thin: true,
            data_reduction: false,
            host_io_limit_id: None,
            tiering_policy: None,
        }
    }

    #[tokio::test]
    async fn create_with_empty_name_issues_no_request() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        let err = client
            .volumes()
            .create(CreateVolumeRequest { name: "  ".into(), ..create_request() })
            .await
            .expect_err("validation");

        assert!(matches!(
            err,
            UnisphereError::Validation(ValidationError::NameEmpty)
        ));
        assert!(non_login_requests(&server).await.is_empty());
    }

    #[tokio::test]
    async fn create_aborts_when_pool_is_missing() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/pool/pool_1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"httpStatusCode": 404, "errorCode": 131_149_829,
                          "messages": [{"en-US": "no such pool"}]}
            })))
            .mount(&server)
            .await;

        let err = client.volumes().create(create_request()).await.expect_err("missing pool");
        assert!(err.is_not_found());

        let posts: Vec<_> = non_login_requests(&server)
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .collect();
        assert!(posts.is_empty(), "missing pool must abort before the create POST");
    }

    #[tokio::test]
    async fn create_attaches_tiering_only_with_fast_vp_support() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/pool/pool_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pool_body(2)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/types/storageResource/action/createLun"))
            .and(body_partial_json(serde_json::json!({
                "lunParameters": {"fastVpParameters": {"tieringPolicy": 1}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": {"storageResource": {"id": "res_1"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client
            .volumes()
            .create(CreateVolumeRequest {
                tiering_policy: Some(TieringPolicy::Auto),
                ..create_request()
            })
            .await
            .expect("create");
        assert_eq!(created.id, "res_1");
    }

    #[tokio::test]
    async fn create_drops_tiering_without_fast_vp_support() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/pool/pool_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(pool_body(0)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/types/storageResource/action/createLun"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": {"storageResource": {"id": "res_1"}}
            })))
            .expect(1)
            .mount(&server)
            .await;

        client
            .volumes()
            .create(CreateVolumeRequest {
                tiering_policy: Some(TieringPolicy::Auto),
                ..create_request()
            })
            .await
            .expect("create");

        let posts: Vec<_> = non_login_requests(&server)
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .collect();
        let body: serde_json::Value = serde_json::from_slice(&posts[0].body).expect("json");
        assert!(body["lunParameters"].get("fastVpParameters").is_none());
    }

    #[tokio::test]
    async fn expand_to_current_size_is_a_no_op() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/lun/sv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lun_body("sv_1", 1 << 30)))
            .expect(1)
            .mount(&server)
            .await;

        client.volumes().expand("sv_1", 1 << 30).await.expect("no-op expand");

        let posts: Vec<_> = non_login_requests(&server)
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .collect();
        assert!(posts.is_empty(), "equal size must not POST");
    }

    #[tokio::test]
    async fn expand_to_smaller_size_is_rejected_without_a_post() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/lun/sv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lun_body("sv_1", 1 << 30)))
            .mount(&server)
            .await;

        let err = client.volumes().expand("sv_1", 1 << 20).await.expect_err("shrink");
        assert!(matches!(
            err,
            UnisphereError::Validation(ValidationError::SizeNotLarger { .. })
        ));

        let posts: Vec<_> = non_login_requests(&server)
            .await
            .into_iter()
            .filter(|r| r.method.as_str() == "POST")
            .collect();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn expand_posts_the_modify_action_for_larger_sizes() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/lun/sv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lun_body("sv_1", 1 << 30)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/instances/storageResource/res_1/action/modifyLun"))
            .and(body_partial_json(serde_json::json!({
                "lunParameters": {"size": (1u64 << 31)}
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.volumes().expand("sv_1", 1 << 31).await.expect("expand");
    }

    #[tokio::test]
    async fn export_defaults_to_the_production_mask() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/lun/sv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lun_body("sv_1", 1 << 30)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/instances/storageResource/res_1/action/modifyLun"))
            .and(body_partial_json(serde_json::json!({
                "lunParameters": {"hostAccess": [{"host": {"id": "Host_1"}, "accessMask": 1}]}
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.volumes().export("sv_1", "Host_1", None).await.expect("export");
    }

    #[tokio::test]
    async fn unexport_posts_an_empty_access_list() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/lun/sv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lun_body("sv_1", 1 << 30)))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/instances/storageResource/res_1/action/modifyLun"))
            .and(body_partial_json(serde_json::json!({
                "lunParameters": {"hostAccess": []}
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client.volumes().unexport("sv_1").await.expect("unexport");
    }
}
