//! Array-level queries: system info and license state.

use unisphere_domain::{
    BasicSystemInfo, Collection, Instance, License, Result, UnisphereError,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;

const LICENSE_FIELDS: &str = "id,name,isInstalled,isValid";

#[derive(Debug)]
pub struct SystemApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> SystemApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    /// Basic system info, served without authentication.
    pub async fn basic_system_info(&self) -> Result<BasicSystemInfo> {
        let collection: Collection<BasicSystemInfo> =
            self.client.session().get(uri::BASIC_SYSTEM_INFO).await?;
        collection
            .into_contents()
            .into_iter()
            .next()
            .ok_or_else(|| UnisphereError::Internal("empty basicSystemInfo collection".into()))
    }

    /// License state for a single feature id.
    pub async fn license(&self, feature: &str) -> Result<License> {
        let instance: Instance<License> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields("license", feature, LICENSE_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "license", feature))?;
        Ok(instance.content)
    }

    /// Fail with `UnlicensedFeature` unless `feature` is installed and valid.
    /// A missing license instance counts as unlicensed.
    pub async fn ensure_licensed(&self, feature: &'static str) -> Result<()> {
        match self.license(feature).await {
            Ok(license) if license.is_usable() => Ok(()),
            Ok(_) => Err(UnisphereError::UnlicensedFeature(feature)),
            Err(err) if err.is_not_found() => Err(UnisphereError::UnlicensedFeature(feature)),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::authenticated_client;
    use unisphere_domain::{UnisphereError, LICENSE_THIN_PROVISIONING};

    #[tokio::test]
    async fn basic_system_info_takes_the_first_entry() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/types/basicSystemInfo/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entries": [{"content": {
                    "id": "0",
                    "model": "Unity 480",
                    "softwareVersion": "5.3.0",
                    "apiVersion": "13.0"
                }}]
            })))
            .mount(&server)
            .await;

        let info = client.system().basic_system_info().await.expect("info");
        assert_eq!(info.model, "Unity 480");
    }

    #[tokio::test]
    async fn installed_invalid_license_is_unusable() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/license/THIN_PROVISIONING"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": {"id": "THIN_PROVISIONING", "isInstalled": true, "isValid": false}
            })))
            .mount(&server)
            .await;

        let err = client
            .system()
            .ensure_licensed(LICENSE_THIN_PROVISIONING)
            .await
            .expect_err("invalid license");
        assert!(matches!(err, UnisphereError::UnlicensedFeature("THIN_PROVISIONING")));
    }

    #[tokio::test]
    async fn missing_license_instance_counts_as_unlicensed() {
        let server = MockServer::start().await;
        let client = authenticated_client(&server).await;

        Mock::given(method("GET"))
            .and(path("/api/instances/license/THIN_PROVISIONING"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"httpStatusCode": 404, "errorCode": 131_149_829,
                          "messages": [{"en-US": "no such instance"}]}
            })))
            .mount(&server)
            .await;

        let err = client
            .system()
            .ensure_licensed(LICENSE_THIN_PROVISIONING)
            .await
            .expect_err("missing license");
        assert!(matches!(err, UnisphereError::UnlicensedFeature(_)));
    }
}
