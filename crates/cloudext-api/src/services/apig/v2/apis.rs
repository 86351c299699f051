// API Gateway: APIs and their publication

use tracing::debug;

use super::models::{Api, ApiActionRequest, ApiPublication};
use super::proxy::ApigProxy;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::ResourceRef;

impl ApigProxy {
    /// `GET /apigw/instances/{gateway_id}/apis`
    ///
    /// Filters such as `group_id`, `name` or `env_id` go in `query`.
    pub async fn list_apis(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Api>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn get_api(&self, gateway_id: &str, api: ResourceRef<'_, Api>) -> Result<Api, Error> {
        self.client()
            .get_resource(&Self::gateway_params(gateway_id), api)
            .await
    }

    pub async fn create_api(&self, gateway_id: &str, api: &Api) -> Result<Api, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), api)
            .await
    }

    pub async fn delete_api(&self, gateway_id: &str, api: ResourceRef<'_, Api>) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), api)
            .await
    }

    /// Publish an API to an environment.
    ///
    /// `POST /apigw/instances/{gateway_id}/apis/action` with `action: online`
    pub async fn publish_api(
        &self,
        gateway_id: &str,
        api: ResourceRef<'_, Api>,
        env_id: &str,
        remark: Option<&str>,
    ) -> Result<ApiPublication, Error> {
        self.api_action(gateway_id, "online", api, env_id, remark)
            .await
    }

    /// Take an API offline in an environment.
    pub async fn offline_api(
        &self,
        gateway_id: &str,
        api: ResourceRef<'_, Api>,
        env_id: &str,
    ) -> Result<ApiPublication, Error> {
        self.api_action(gateway_id, "offline", api, env_id, None)
            .await
    }

    async fn api_action(
        &self,
        gateway_id: &str,
        action: &str,
        api: ResourceRef<'_, Api>,
        env_id: &str,
        remark: Option<&str>,
    ) -> Result<ApiPublication, Error> {
        let body = ApiActionRequest {
            action: action.to_owned(),
            env_id: env_id.to_owned(),
            api_id: api.resolve()?,
            remark: remark.map(String::from),
        };
        debug!(action, api_id = %body.api_id, env_id, "API action");
        let path = format!("apigw/instances/{gateway_id}/apis/action");
        self.client().post(&path, &body).await
    }
}
