//! IP interface adapter, used to discover iSCSI portals.

use unisphere_domain::{Collection, IpInterface, Result};

use super::UnisphereClient;
use crate::uri;

const IP_INTERFACE_TYPE: &str = "ipInterface";
const IP_INTERFACE_FIELDS: &str = "id,ipAddress,netmask,gateway,type,ipPort";

#[derive(Debug)]
pub struct IpInterfaceApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> IpInterfaceApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<IpInterface>> {
        let collection: Collection<IpInterface> = self
            .client
            .session()
            .get(&uri::list_instances_with_fields(IP_INTERFACE_TYPE, IP_INTERFACE_FIELDS))
            .await?;
        Ok(collection.into_contents())
    }

    /// List only interfaces serving iSCSI.
    pub async fn list_iscsi(&self) -> Result<Vec<IpInterface>> {
        Ok(self.list().await?.into_iter().filter(IpInterface::is_iscsi).collect())
    }
}
