// API Gateway: instances, API groups and environments

use serde_json::Value;
use tracing::debug;

use super::models::{ApiGroup, Environment, Gateway};
use super::proxy::ApigProxy;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{ResourceRef, UriParams};

impl ApigProxy {
    // ── Gateways ─────────────────────────────────────────────────────

    /// `GET /apigw/instances`
    pub async fn list_gateways(&self, query: &[(&str, String)]) -> Result<Vec<Gateway>, Error> {
        self.client()
            .list_resources(&UriParams::new(), query)
            .await
    }

    /// `GET /apigw/instances/{id}`
    pub async fn get_gateway(&self, gateway: ResourceRef<'_, Gateway>) -> Result<Gateway, Error> {
        self.client()
            .get_resource(&UriParams::new(), gateway)
            .await
    }

    /// `DELETE /apigw/instances/{id}`
    pub async fn delete_gateway(&self, gateway: ResourceRef<'_, Gateway>) -> Result<(), Error> {
        debug!(gateway = ?gateway.resolve().ok(), "deleting gateway");
        self.client()
            .delete_resource(&UriParams::new(), gateway)
            .await
    }

    // ── API groups ───────────────────────────────────────────────────

    pub async fn list_api_groups(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<ApiGroup>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn get_api_group(
        &self,
        gateway_id: &str,
        group: ResourceRef<'_, ApiGroup>,
    ) -> Result<ApiGroup, Error> {
        self.client()
            .get_resource(&Self::gateway_params(gateway_id), group)
            .await
    }

    pub async fn create_api_group(
        &self,
        gateway_id: &str,
        group: &ApiGroup,
    ) -> Result<ApiGroup, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), group)
            .await
    }

    /// `PUT /apigw/instances/{gateway_id}/api-groups/{id}` with the changed fields.
    pub async fn update_api_group(
        &self,
        gateway_id: &str,
        group: ResourceRef<'_, ApiGroup>,
        changes: &Value,
    ) -> Result<ApiGroup, Error> {
        self.client()
            .update_resource(&Self::gateway_params(gateway_id), group, changes)
            .await
    }

    pub async fn delete_api_group(
        &self,
        gateway_id: &str,
        group: ResourceRef<'_, ApiGroup>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), group)
            .await
    }

    /// Look up a group by id, then by name.
    pub async fn find_api_group(
        &self,
        gateway_id: &str,
        name_or_id: &str,
    ) -> Result<Option<ApiGroup>, Error> {
        self.client()
            .find_resource(&Self::gateway_params(gateway_id), name_or_id, |g: &ApiGroup| {
                Some(g.name.as_str())
            })
            .await
    }

    // ── Environments ─────────────────────────────────────────────────

    pub async fn list_environments(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Environment>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn create_environment(
        &self,
        gateway_id: &str,
        env: &Environment,
    ) -> Result<Environment, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), env)
            .await
    }

    pub async fn delete_environment(
        &self,
        gateway_id: &str,
        env: ResourceRef<'_, Environment>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), env)
            .await
    }
}
