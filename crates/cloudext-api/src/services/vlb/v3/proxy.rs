// Dedicated load balancer (ELB v3) proxy
//
// All paths are relative to the `/v3/{project_id}` endpoint.

use serde_json::Value;
use tracing::debug;

use super::models::{Listener, LoadBalancer, Member, Pool};
use crate::client::ServiceClient;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{ResourceRef, UriParams};

#[derive(Debug, Clone)]
pub struct VlbProxy {
    client: ServiceClient,
}

impl Proxy for VlbProxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}

impl VlbProxy {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    // ── Load balancers ───────────────────────────────────────────────

    /// `GET /elb/loadbalancers`
    pub async fn list_load_balancers(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<LoadBalancer>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_load_balancer(
        &self,
        lb: ResourceRef<'_, LoadBalancer>,
    ) -> Result<LoadBalancer, Error> {
        self.client.get_resource(&UriParams::new(), lb).await
    }

    /// `POST /elb/loadbalancers` with `{"loadbalancer": {...}}`
    pub async fn create_load_balancer(&self, lb: &LoadBalancer) -> Result<LoadBalancer, Error> {
        debug!(name = ?lb.name, "creating load balancer");
        self.client.create_resource(&UriParams::new(), lb).await
    }

    /// `PUT /elb/loadbalancers/{id}` with the changed fields.
    pub async fn update_load_balancer(
        &self,
        lb: ResourceRef<'_, LoadBalancer>,
        changes: &Value,
    ) -> Result<LoadBalancer, Error> {
        self.client
            .update_resource(&UriParams::new(), lb, changes)
            .await
    }

    pub async fn delete_load_balancer(&self, lb: ResourceRef<'_, LoadBalancer>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), lb).await
    }

    pub async fn find_load_balancer(&self, name_or_id: &str) -> Result<Option<LoadBalancer>, Error> {
        self.client
            .find_resource(&UriParams::new(), name_or_id, |lb: &LoadBalancer| {
                lb.name.as_deref()
            })
            .await
    }

    // ── Listeners ────────────────────────────────────────────────────

    pub async fn list_listeners(&self, query: &[(&str, String)]) -> Result<Vec<Listener>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_listener(&self, listener: ResourceRef<'_, Listener>) -> Result<Listener, Error> {
        self.client.get_resource(&UriParams::new(), listener).await
    }

    pub async fn create_listener(&self, listener: &Listener) -> Result<Listener, Error> {
        self.client.create_resource(&UriParams::new(), listener).await
    }

    pub async fn delete_listener(&self, listener: ResourceRef<'_, Listener>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), listener).await
    }

    // ── Pools ────────────────────────────────────────────────────────

    pub async fn list_pools(&self, query: &[(&str, String)]) -> Result<Vec<Pool>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    pub async fn get_pool(&self, pool: ResourceRef<'_, Pool>) -> Result<Pool, Error> {
        self.client.get_resource(&UriParams::new(), pool).await
    }

    pub async fn create_pool(&self, pool: &Pool) -> Result<Pool, Error> {
        self.client.create_resource(&UriParams::new(), pool).await
    }

    pub async fn delete_pool(&self, pool: ResourceRef<'_, Pool>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), pool).await
    }

    // ── Members ──────────────────────────────────────────────────────

    fn pool_params(pool: ResourceRef<'_, Pool>) -> Result<UriParams, Error> {
        Ok(UriParams::new().with("pool_id", pool.resolve()?))
    }

    /// `GET /elb/pools/{pool_id}/members`
    pub async fn list_members(
        &self,
        pool: ResourceRef<'_, Pool>,
        query: &[(&str, String)],
    ) -> Result<Vec<Member>, Error> {
        self.client
            .list_resources(&Self::pool_params(pool)?, query)
            .await
    }

    pub async fn add_member(&self, pool: ResourceRef<'_, Pool>, member: &Member) -> Result<Member, Error> {
        self.client
            .create_resource(&Self::pool_params(pool)?, member)
            .await
    }

    pub async fn remove_member(
        &self,
        pool: ResourceRef<'_, Pool>,
        member: ResourceRef<'_, Member>,
    ) -> Result<(), Error> {
        self.client
            .delete_resource(&Self::pool_params(pool)?, member)
            .await
    }
}
