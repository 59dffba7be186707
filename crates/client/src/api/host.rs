//! Host and host-initiator adapter.

use tracing::debug;
use unisphere_domain::{
    Collection, CreateHostBody, CreateHostInitiatorBody, CreateHostIpPortBody, Host, HostInitiator,
    HostIpPort, IdRef, InitiatorType, Instance, ModifyHostInitiatorBody, Result, UnisphereError,
};

use super::{map_not_found, UnisphereClient};
use crate::uri;
use crate::validation::{require_id, validate_resource_name, MAX_RESOURCE_NAME_LEN};

const HOST_TYPE: &str = "host";
const HOST_FIELDS: &str =
    "id,name,description,type,fcHostInitiators,iscsiHostInitiators,hostIPPorts,health";
const INITIATOR_TYPE: &str = "hostInitiator";
const INITIATOR_FIELDS: &str = "id,initiatorId,type,parentHost,isIgnored,paths,health";

/// Manually managed host, the only kind this client creates.
const HOST_TYPE_MANUAL: i32 = 1;

#[derive(Debug)]
pub struct HostApi<'a> {
    client: &'a UnisphereClient,
}

impl<'a> HostApi<'a> {
    pub(super) fn new(client: &'a UnisphereClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, name: &str, description: Option<String>) -> Result<Host> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let body = CreateHostBody { host_type: HOST_TYPE_MANUAL, name, description };
        let created: Instance<Host> = self
            .client
            .session()
            .post(&uri::list_instances(HOST_TYPE), &body)
            .await?;
        Ok(created.content)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Host> {
        let id = require_id(id, "host id")?;
        let instance: Instance<Host> = self
            .client
            .session()
            .get(&uri::instance_by_id_with_fields(HOST_TYPE, id, HOST_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "host", id))?;
        Ok(instance.content)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Host> {
        let name = validate_resource_name(name, MAX_RESOURCE_NAME_LEN)?;
        let instance: Instance<Host> = self
            .client
            .session()
            .get(&uri::instance_by_name_with_fields(HOST_TYPE, &name, HOST_FIELDS))
            .await
            .map_err(|e| map_not_found(e, "host", &name))?;
        Ok(instance.content)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = require_id(id, "host id")?;
        self.client
            .session()
            .delete(&uri::instance_by_id(HOST_TYPE, id))
            .await
            .map_err(|e| map_not_found(e, "host", id))
    }

    /// Register an IP address under the host.
    pub async fn create_ip_port(&self, host_id: &str, address: &str) -> Result<HostIpPort> {
        let host_id = require_id(host_id, "host id")?;
        let address = require_id(address, "IP address")?;
        let body = CreateHostIpPortBody { host: IdRef::new(host_id), address: address.to_string() };
        let created: Instance<HostIpPort> = self
            .client
            .session()
            .post(&uri::list_instances("hostIPPort"), &body)
            .await?;
        Ok(created.content)
    }

    /// Look up an initiator by its WWN or IQN. `Ok(None)` when the array has
    /// never seen the address.
    pub async fn find_initiator(&self, address: &str) -> Result<Option<HostInitiator>> {
        let address = require_id(address, "initiator address")?;
        let filter = format!(r#"initiatorId eq "{address}""#);
        let path = format!(
            "{}&fields={}",
            uri::list_instances_filtered(INITIATOR_TYPE, &filter),
            INITIATOR_FIELDS
        );
        let collection: Collection<HostInitiator> = self.client.session().get(&path).await?;
        Ok(collection.into_contents().into_iter().next())
    }

    /// Make sure `address` is an initiator bound to `host_id`.
    ///
    /// Unknown initiators are created on the host; orphaned ones are
    /// attached via the modify action; one already on the host is a no-op.
    /// An initiator bound to a different host is refused without a write.
    pub async fn ensure_initiator(&self, host_id: &str, address: &str) -> Result<()> {
        let host_id = require_id(host_id, "host id")?;
        let address = require_id(address, "initiator address")?;

        match self.find_initiator(address).await? {
            None => {
                let body = CreateHostInitiatorBody {
                    host: IdRef::new(host_id),
                    initiator_type: InitiatorType::from_address(address).token(),
                    initiator_wwn_or_iqn: address.to_string(),
                };
                self.client
                    .session()
                    .post::<_, ()>(&uri::list_instances(INITIATOR_TYPE), &body)
                    .await
            }
            Some(initiator) => match initiator.parent_host.as_ref() {
                None => {
                    let body = ModifyHostInitiatorBody { host: IdRef::new(host_id) };
                    self.client
                        .session()
                        .post(&uri::instance_action(INITIATOR_TYPE, &initiator.id, "modify"), &body)
                        .await
                }
                Some(parent) if parent.id == host_id => {
                    debug!(%host_id, %address, "initiator already bound to host");
                    Ok(())
                }
                Some(parent) => Err(UnisphereError::InitiatorOwnedElsewhere {
                    initiator: address.to_string(),
                    host_id: parent.id.clone(),
                }),
            },
        }
    }
}
