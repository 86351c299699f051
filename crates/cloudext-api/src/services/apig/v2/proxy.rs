// API Gateway v2 proxy

use crate::client::ServiceClient;
use crate::proxy::Proxy;
use crate::resource::UriParams;

/// Typed access to the dedicated API Gateway v2 REST API.
///
/// Operations are grouped by resource in the sibling modules.
#[derive(Debug, Clone)]
pub struct ApigProxy {
    client: ServiceClient,
}

impl ApigProxy {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub(super) fn gateway_params(gateway_id: &str) -> UriParams {
        UriParams::new().with("gateway_id", gateway_id)
    }
}

impl Proxy for ApigProxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}
