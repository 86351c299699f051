// API Gateway: throttling policies and their API bindings

use serde::Serialize;

use super::models::{BatchUnbindResult, ThrottleBoundApi, ThrottlingPolicy, ThrottlingPolicyBinding};
use super::proxy::ApigProxy;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{Resource, ResourceRef};

impl ApigProxy {
    pub async fn list_throttling_policies(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<ThrottlingPolicy>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn get_throttling_policy(
        &self,
        gateway_id: &str,
        policy: ResourceRef<'_, ThrottlingPolicy>,
    ) -> Result<ThrottlingPolicy, Error> {
        self.client()
            .get_resource(&Self::gateway_params(gateway_id), policy)
            .await
    }

    pub async fn create_throttling_policy(
        &self,
        gateway_id: &str,
        policy: &ThrottlingPolicy,
    ) -> Result<ThrottlingPolicy, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), policy)
            .await
    }

    pub async fn delete_throttling_policy(
        &self,
        gateway_id: &str,
        policy: ResourceRef<'_, ThrottlingPolicy>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), policy)
            .await
    }

    // ── Bindings ─────────────────────────────────────────────────────

    /// Apply a throttling policy to published APIs.
    ///
    /// `POST /apigw/instances/{gateway_id}/throttle-bindings`; one
    /// `ThrottleApply` per publish id comes back in `throttle_applys`.
    pub async fn bind_throttling_policy(
        &self,
        gateway_id: &str,
        policy: ResourceRef<'_, ThrottlingPolicy>,
        publish_ids: Vec<String>,
    ) -> Result<ThrottlingPolicyBinding, Error> {
        let request = ThrottlingPolicyBinding {
            strategy_id: policy.resolve()?,
            publish_ids,
            throttle_applys: Vec::new(),
        };
        self.client()
            .create_with_envelope(&Self::gateway_params(gateway_id), &request)
            .await
    }

    /// `GET /apigw/instances/{gateway_id}/throttle-bindings/binded-apis?throttle_id=`
    pub async fn list_throttling_policy_bindings(
        &self,
        gateway_id: &str,
        policy: ResourceRef<'_, ThrottlingPolicy>,
    ) -> Result<Vec<ThrottleBoundApi>, Error> {
        let query = [("throttle_id", policy.resolve()?)];
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), &query)
            .await
    }

    /// `DELETE /apigw/instances/{gateway_id}/throttle-bindings/{binding_id}`
    pub async fn unbind_throttling_policy(
        &self,
        gateway_id: &str,
        binding_id: &str,
    ) -> Result<(), Error> {
        let base = self.bindings_path(gateway_id)?;
        self.client().delete(&format!("{base}/{binding_id}")).await
    }

    /// Remove several bindings in one call.
    ///
    /// `PUT /apigw/instances/{gateway_id}/throttle-bindings?action=delete`.
    /// The success and failure lists are returned as the server reports them.
    pub async fn unbind_throttling_policies(
        &self,
        gateway_id: &str,
        binding_ids: &[String],
    ) -> Result<BatchUnbindResult, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            throttle_bindings: &'a [String],
        }

        let base = self.bindings_path(gateway_id)?;
        self.client()
            .put_with_params(
                &base,
                &[("action", "delete".to_owned())],
                &Body {
                    throttle_bindings: binding_ids,
                },
            )
            .await
    }

    fn bindings_path(&self, gateway_id: &str) -> Result<String, Error> {
        self.client().render_path(
            ThrottlingPolicyBinding::BASE_PATH,
            &Self::gateway_params(gateway_id),
        )
    }
}
