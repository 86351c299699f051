// API Gateway: ACL policies and VPC channels

use super::models::{AclPolicy, VpcChannel};
use super::proxy::ApigProxy;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::ResourceRef;

impl ApigProxy {
    // ── ACL policies ─────────────────────────────────────────────────

    pub async fn list_acl_policies(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<AclPolicy>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn create_acl_policy(
        &self,
        gateway_id: &str,
        policy: &AclPolicy,
    ) -> Result<AclPolicy, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), policy)
            .await
    }

    pub async fn delete_acl_policy(
        &self,
        gateway_id: &str,
        policy: ResourceRef<'_, AclPolicy>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), policy)
            .await
    }

    // ── VPC channels ─────────────────────────────────────────────────

    pub async fn list_vpc_channels(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<VpcChannel>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn get_vpc_channel(
        &self,
        gateway_id: &str,
        channel: ResourceRef<'_, VpcChannel>,
    ) -> Result<VpcChannel, Error> {
        self.client()
            .get_resource(&Self::gateway_params(gateway_id), channel)
            .await
    }

    pub async fn create_vpc_channel(
        &self,
        gateway_id: &str,
        channel: &VpcChannel,
    ) -> Result<VpcChannel, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), channel)
            .await
    }

    pub async fn delete_vpc_channel(
        &self,
        gateway_id: &str,
        channel: ResourceRef<'_, VpcChannel>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), channel)
            .await
    }
}
