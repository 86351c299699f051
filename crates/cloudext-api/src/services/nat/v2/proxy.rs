// NAT gateway v2 proxy

use serde_json::Value;

use super::models::{DnatRule, NatGateway, SnatRule};
use crate::client::ServiceClient;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{ResourceRef, UriParams};

#[derive(Debug, Clone)]
pub struct NatProxy {
    client: ServiceClient,
}

impl Proxy for NatProxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}

impl NatProxy {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    // ── Gateways ─────────────────────────────────────────────────────

    /// `GET /nat_gateways`
    pub async fn list_gateways(&self, query: &[(&str, String)]) -> Result<Vec<NatGateway>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_gateway(&self, gateway: ResourceRef<'_, NatGateway>) -> Result<NatGateway, Error> {
        self.client.get_resource(&UriParams::new(), gateway).await
    }

    pub async fn create_gateway(&self, gateway: &NatGateway) -> Result<NatGateway, Error> {
        self.client.create_resource(&UriParams::new(), gateway).await
    }

    /// `PUT /nat_gateways/{id}` with the changed fields.
    pub async fn update_gateway(
        &self,
        gateway: ResourceRef<'_, NatGateway>,
        changes: &Value,
    ) -> Result<NatGateway, Error> {
        self.client
            .update_resource(&UriParams::new(), gateway, changes)
            .await
    }

    pub async fn delete_gateway(&self, gateway: ResourceRef<'_, NatGateway>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), gateway).await
    }

    pub async fn find_gateway(&self, name_or_id: &str) -> Result<Option<NatGateway>, Error> {
        self.client
            .find_resource(&UriParams::new(), name_or_id, |g: &NatGateway| {
                g.name.as_deref()
            })
            .await
    }

    // ── SNAT rules ───────────────────────────────────────────────────

    pub async fn list_snat_rules(&self, query: &[(&str, String)]) -> Result<Vec<SnatRule>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_snat_rule(&self, rule: ResourceRef<'_, SnatRule>) -> Result<SnatRule, Error> {
        self.client.get_resource(&UriParams::new(), rule).await
    }

    pub async fn create_snat_rule(&self, rule: &SnatRule) -> Result<SnatRule, Error> {
        self.client.create_resource(&UriParams::new(), rule).await
    }

    pub async fn delete_snat_rule(&self, rule: ResourceRef<'_, SnatRule>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), rule).await
    }

    // ── DNAT rules ───────────────────────────────────────────────────

    pub async fn list_dnat_rules(&self, query: &[(&str, String)]) -> Result<Vec<DnatRule>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_dnat_rule(&self, rule: ResourceRef<'_, DnatRule>) -> Result<DnatRule, Error> {
        self.client.get_resource(&UriParams::new(), rule).await
    }

    pub async fn create_dnat_rule(&self, rule: &DnatRule) -> Result<DnatRule, Error> {
        self.client.create_resource(&UriParams::new(), rule).await
    }

    pub async fn delete_dnat_rule(&self, rule: ResourceRef<'_, DnatRule>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), rule).await
    }
}
