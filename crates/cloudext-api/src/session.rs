// Authenticated session
//
// Holds the scoped token, the cached service catalog and the session-level
// endpoint overrides discovered while binding proxies. One session backs
// every service client of a connection.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::SecretString;
use tracing::{debug, info};
use url::Url;

use crate::auth::{self, AuthToken, Credentials};
use crate::catalog::{Interface, ServiceCatalog};
use crate::client::ServiceClient;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Placeholders Keystone catalogs use for the project id.
const PROJECT_PLACEHOLDERS: &[&str] = &[
    "{project_id}",
    "%(project_id)s",
    "$(project_id)s",
    "%(tenant_id)s",
    "$(tenant_id)s",
];

/// An authenticated session against one region of the cloud.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    token: SecretString,
    project_id: Option<String>,
    catalog: ServiceCatalog,
    region: String,
    interface: Interface,
    /// `<service_type>_endpoint_override` → resolved service URL.
    endpoint_overrides: RwLock<HashMap<String, Url>>,
}

impl Session {
    /// Authenticate and build a session for `region`.
    pub async fn connect(
        credentials: &Credentials,
        region: impl Into<String>,
        interface: Interface,
        transport: &TransportConfig,
    ) -> Result<Arc<Self>, Error> {
        let http = transport.build_client()?;
        let token = auth::authenticate(&http, credentials).await?;
        Ok(Arc::new(Self::from_token(http, token, region, interface)))
    }

    /// Build a session from an already-issued token.
    pub fn from_token(
        http: reqwest::Client,
        token: AuthToken,
        region: impl Into<String>,
        interface: Interface,
    ) -> Self {
        Self::new(
            http,
            token.value,
            token.project_id,
            token.catalog,
            region,
            interface,
        )
    }

    pub fn new(
        http: reqwest::Client,
        token: SecretString,
        project_id: Option<String>,
        catalog: ServiceCatalog,
        region: impl Into<String>,
        interface: Interface,
    ) -> Self {
        Self {
            http,
            token,
            project_id,
            catalog,
            region: region.into(),
            interface,
            endpoint_overrides: RwLock::new(HashMap::new()),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &SecretString {
        &self.token
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn interface(&self) -> Interface {
        self.interface
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Substitute the project id into a raw endpoint and parse it.
    pub fn expand_endpoint(&self, raw: &str) -> Result<Url, Error> {
        let mut expanded = raw.to_owned();
        for placeholder in PROJECT_PLACEHOLDERS {
            if expanded.contains(placeholder) {
                let project_id =
                    self.project_id
                        .as_deref()
                        .ok_or_else(|| Error::MissingUriParam {
                            name: "project_id".into(),
                            template: raw.to_owned(),
                        })?;
                expanded = expanded.replace(placeholder, project_id);
            }
        }
        Ok(Url::parse(&expanded)?)
    }

    /// The catalog endpoint for a service type in this session's region.
    pub fn catalog_endpoint(&self, service_type: &str) -> Result<Option<Url>, Error> {
        self.catalog
            .endpoint_for(service_type, &self.region, self.interface)
            .map(|raw| self.expand_endpoint(raw))
            .transpose()
    }

    /// The memoized service URL for a service type, if one was recorded.
    pub fn endpoint_override(&self, service_type: &str) -> Option<Url> {
        self.endpoint_overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&override_key(service_type))
            .cloned()
    }

    /// Record the true service URL for a service type.
    pub fn set_endpoint_override(&self, service_type: &str, url: Url) {
        info!(service = service_type, %url, "memoizing endpoint override");
        self.endpoint_overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(override_key(service_type), url);
    }

    // ── Clients ──────────────────────────────────────────────────────

    /// A typed-proxy client: fixed `Content-Type: application/json`.
    pub fn json_client(self: &Arc<Self>, endpoint: Url) -> ServiceClient {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        debug!(%endpoint, "building JSON service client");
        ServiceClient::new(Arc::clone(self), endpoint, headers)
    }

    /// A headerless pass-through client for raw REST access.
    pub fn raw_client(self: &Arc<Self>, endpoint: Url) -> ServiceClient {
        debug!(%endpoint, "building raw service client");
        ServiceClient::new(Arc::clone(self), endpoint, HeaderMap::new())
    }
}

fn override_key(service_type: &str) -> String {
    format!("{service_type}_endpoint_override")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEndpoint, CatalogEntry};

    fn session(project_id: Option<&str>) -> Session {
        let catalog = ServiceCatalog::new(vec![CatalogEntry {
            service_type: "nat".into(),
            name: None,
            endpoints: vec![CatalogEndpoint {
                id: None,
                interface: Interface::Public,
                region: Some("eu-de".into()),
                region_id: Some("eu-de".into()),
                url: "https://nat.eu-de.example.com/v2/$(tenant_id)s".into(),
            }],
        }]);
        Session::new(
            reqwest::Client::new(),
            SecretString::from("tok".to_owned()),
            project_id.map(String::from),
            catalog,
            "eu-de",
            Interface::Public,
        )
    }

    #[test]
    fn catalog_endpoint_expands_project() {
        let s = session(Some("p1"));
        let url = s.catalog_endpoint("nat").unwrap().unwrap();
        assert_eq!(url.as_str(), "https://nat.eu-de.example.com/v2/p1");
    }

    #[test]
    fn placeholder_without_project_is_an_error() {
        let s = session(None);
        let err = s.catalog_endpoint("nat").unwrap_err();
        assert!(matches!(err, Error::MissingUriParam { ref name, .. } if name == "project_id"));
    }

    #[test]
    fn override_is_memoized_per_service() {
        let s = session(Some("p1"));
        assert!(s.endpoint_override("vlb").is_none());
        let url = Url::parse("https://lb.internal/v3/p1/").unwrap();
        s.set_endpoint_override("vlb", url.clone());
        assert_eq!(s.endpoint_override("vlb"), Some(url));
        assert!(s.endpoint_override("nat").is_none());
    }

    #[test]
    fn json_client_carries_content_type() {
        let s = Arc::new(session(Some("p1")));
        let endpoint = Url::parse("https://nat.eu-de.example.com/v2/p1").unwrap();
        assert!(s.json_client(endpoint.clone()).has_json_content_type());
        assert!(!s.raw_client(endpoint).has_json_content_type());
    }
}
