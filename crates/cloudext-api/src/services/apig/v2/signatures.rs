// API Gateway: signature keys and their API bindings

use super::models::{SignBinding, Signature, SignatureBinding};
use super::proxy::ApigProxy;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{Resource, ResourceRef};

impl ApigProxy {
    pub async fn list_signatures(
        &self,
        gateway_id: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Signature>, Error> {
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), query)
            .await
    }

    pub async fn create_signature(
        &self,
        gateway_id: &str,
        signature: &Signature,
    ) -> Result<Signature, Error> {
        self.client()
            .create_resource(&Self::gateway_params(gateway_id), signature)
            .await
    }

    pub async fn delete_signature(
        &self,
        gateway_id: &str,
        signature: ResourceRef<'_, Signature>,
    ) -> Result<(), Error> {
        self.client()
            .delete_resource(&Self::gateway_params(gateway_id), signature)
            .await
    }

    /// Bind a signature key to published APIs.
    ///
    /// `POST /apigw/instances/{gateway_id}/sign-bindings`; one
    /// `SignBinding` per publish id comes back in `bindings`.
    pub async fn bind_signature(
        &self,
        gateway_id: &str,
        signature: ResourceRef<'_, Signature>,
        publish_ids: Vec<String>,
    ) -> Result<SignatureBinding, Error> {
        let request = SignatureBinding {
            sign_id: signature.resolve()?,
            publish_ids,
            bindings: Vec::new(),
        };
        self.client()
            .create_with_envelope(&Self::gateway_params(gateway_id), &request)
            .await
    }

    /// `GET /apigw/instances/{gateway_id}/sign-bindings/binded-apis?sign_id=`
    pub async fn list_signature_bindings(
        &self,
        gateway_id: &str,
        signature: ResourceRef<'_, Signature>,
    ) -> Result<Vec<SignBinding>, Error> {
        let query = [("sign_id", signature.resolve()?)];
        self.client()
            .list_resources(&Self::gateway_params(gateway_id), &query)
            .await
    }

    /// `DELETE /apigw/instances/{gateway_id}/sign-bindings/{binding_id}`
    pub async fn unbind_signature(&self, gateway_id: &str, binding_id: &str) -> Result<(), Error> {
        let base = self
            .client()
            .render_path(SignatureBinding::BASE_PATH, &Self::gateway_params(gateway_id))?;
        self.client().delete(&format!("{base}/{binding_id}")).await
    }
}
