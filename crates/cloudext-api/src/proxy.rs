// Endpoint/version resolver
//
// `ServiceProxy::create_proxy` decides which endpoint and API version a
// service proxy is bound to. Decision order:
//
//   1. configured version + endpoint override (a memoized session override
//      wins over configuration)
//   2. no override: synthesize one from the catalog entry of `base_service`,
//      swapping the host's service label for `target_service`
//   3. no version and a single supported one: use it
//   4. endpoint + version: bind, or degrade to a raw client when the version
//      is not supported
//   5. endpoint only: ask it for its major version, then as 4
//   6. nothing: range-constrained catalog discovery, `NotSupported` if empty
//   7. after 4/5, follow the service's self link when it lives on another
//      origin and memoize it on the session; only scheme, host and port are
//      compared, a self link that differs in path alone leaves the endpoint
//      as it is
//
// Runs once per proxy acquisition. No retries.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::catalog::rewrite_service_host;
use crate::client::ServiceClient;
use crate::discovery::{ApiVersion, Discovery, VersionedAdapter};
use crate::error::Error;
use crate::resource::UriParams;
use crate::session::Session;

/// Static identity of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Keys configuration and the memoized endpoint override.
    pub service_type: &'static str,
    /// Catalog entry the endpoint is derived from.
    pub base_service: &'static str,
    /// Host label written into the synthesized endpoint.
    pub target_service: &'static str,
    /// Path replacing the catalog path of a synthesized endpoint
    /// (`{project_id}` is expanded; `""` is the host root).
    pub endpoint_path: Option<&'static str>,
}

/// Per-service configuration read by the resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceOptions {
    pub api_version: Option<String>,
    pub endpoint_override: Option<String>,
}

/// A typed service proxy built around one `ServiceClient`.
pub trait Proxy: Send + Sync {
    fn client(&self) -> &ServiceClient;

    /// Skip the post-bind self-link lookup.
    fn skip_discovery(&self) -> bool {
        false
    }
}

pub type ProxyCtor<P> = fn(ServiceClient) -> P;

/// Supported API versions and the proxy each one builds.
pub struct SupportedVersions<P> {
    ctors: BTreeMap<ApiVersion, ProxyCtor<P>>,
}

impl<P> Default for SupportedVersions<P> {
    fn default() -> Self {
        Self {
            ctors: BTreeMap::new(),
        }
    }
}

impl<P> SupportedVersions<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(version: ApiVersion, ctor: ProxyCtor<P>) -> Self {
        Self::new().with(version, ctor)
    }

    #[must_use]
    pub fn with(mut self, version: ApiVersion, ctor: ProxyCtor<P>) -> Self {
        self.ctors.insert(version, ctor);
        self
    }

    pub fn versions(&self) -> impl Iterator<Item = ApiVersion> + '_ {
        self.ctors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.ctors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctors.is_empty()
    }

    /// The only supported version, if there is exactly one.
    pub fn only(&self) -> Option<ApiVersion> {
        match self.ctors.len() {
            1 => self.ctors.keys().next().copied(),
            _ => None,
        }
    }

    /// Lowest and highest supported versions.
    pub fn range(&self) -> Option<(ApiVersion, ApiVersion)> {
        let min = self.ctors.keys().next()?;
        let max = self.ctors.keys().next_back()?;
        Some((*min, *max))
    }

    /// Exact match first, then any entry with the same major version.
    pub fn resolve(&self, version: ApiVersion) -> Option<(ApiVersion, ProxyCtor<P>)> {
        self.ctors
            .get_key_value(&version)
            .or_else(|| self.ctors.iter().find(|(v, _)| v.major == version.major))
            .map(|(v, ctor)| (*v, *ctor))
    }
}

/// Why a binding carries no typed proxy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DegradedCapability {
    #[error("API version '{version}' of service '{service}' is not supported; raw REST access only")]
    UnsupportedVersion { service: String, version: String },

    #[error("Could not determine the API version of service '{service}' at {endpoint}; raw REST access only")]
    VersionUndetermined { service: String, endpoint: String },
}

/// Outcome of resolving a service proxy.
#[derive(Debug)]
pub enum ProxyBinding<P> {
    Bound {
        proxy: P,
        version: ApiVersion,
        endpoint: Url,
    },
    Degraded {
        adapter: ServiceClient,
        reason: DegradedCapability,
    },
}

impl<P: Proxy> ProxyBinding<P> {
    pub fn proxy(&self) -> Option<&P> {
        match self {
            Self::Bound { proxy, .. } => Some(proxy),
            Self::Degraded { .. } => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The client requests go through: the proxy's, or the raw adapter.
    pub fn client(&self) -> &ServiceClient {
        match self {
            Self::Bound { proxy, .. } => proxy.client(),
            Self::Degraded { adapter, .. } => adapter,
        }
    }

    pub fn version(&self) -> Option<ApiVersion> {
        match self {
            Self::Bound { version, .. } => Some(*version),
            Self::Degraded { .. } => None,
        }
    }

    pub fn degraded_reason(&self) -> Option<&DegradedCapability> {
        match self {
            Self::Bound { .. } => None,
            Self::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// A service descriptor plus its supported proxy versions.
pub struct ServiceProxy<P> {
    descriptor: ServiceDescriptor,
    supported: SupportedVersions<P>,
}

impl<P: Proxy> ServiceProxy<P> {
    pub fn new(descriptor: ServiceDescriptor, supported: SupportedVersions<P>) -> Self {
        Self {
            descriptor,
            supported,
        }
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn supported(&self) -> &SupportedVersions<P> {
        &self.supported
    }

    /// Resolve the proxy against the live session.
    pub async fn create_proxy(
        &self,
        session: &Arc<Session>,
        options: &ServiceOptions,
    ) -> Result<ProxyBinding<P>, Error> {
        self.create_proxy_with(session, session.as_ref(), options)
            .await
    }

    /// Resolve the proxy, sending remote queries through `discovery`.
    pub async fn create_proxy_with<D: Discovery>(
        &self,
        session: &Arc<Session>,
        discovery: &D,
        options: &ServiceOptions,
    ) -> Result<ProxyBinding<P>, Error> {
        let service = self.descriptor.service_type;

        let mut endpoint = match session.endpoint_override(service) {
            Some(memoized) => Some(memoized),
            None => options
                .endpoint_override
                .as_deref()
                .map(|raw| session.expand_endpoint(raw))
                .transpose()?,
        };
        if endpoint.is_none() {
            endpoint = self.synthesize_endpoint(session)?;
        }

        let configured = options.api_version.as_deref();
        let default_version = self.supported.only();

        let Some(endpoint) = endpoint else {
            return self.discover(session, discovery, configured).await;
        };

        let (requested, ctor) = match (configured, default_version) {
            (Some(raw), _) => {
                let found = raw
                    .parse::<ApiVersion>()
                    .ok()
                    .and_then(|v| self.supported.resolve(v));
                match found {
                    Some(found) => found,
                    None => return Ok(self.unsupported(session, endpoint, raw.to_owned())),
                }
            }
            (None, Some(version)) => match self.supported.resolve(version) {
                Some(found) => found,
                None => return Ok(self.unsupported(session, endpoint, version.to_string())),
            },
            (None, None) => match discovery.discover_major_version(&endpoint).await? {
                Some(version) => match self.supported.resolve(version) {
                    Some(found) => found,
                    None => {
                        return Ok(self.unsupported(session, endpoint, version.to_string()));
                    }
                },
                None => {
                    warn!(service, %endpoint, "could not determine API version, using raw client");
                    return Ok(ProxyBinding::Degraded {
                        reason: DegradedCapability::VersionUndetermined {
                            service: service.to_owned(),
                            endpoint: endpoint.to_string(),
                        },
                        adapter: session.raw_client(endpoint),
                    });
                }
            },
        };

        debug!(service, version = %requested, %endpoint, "binding proxy");
        let proxy = ctor(session.json_client(endpoint.clone()));
        Ok(self
            .follow_service_url(session, discovery, proxy, ctor, requested, endpoint)
            .await)
    }

    fn synthesize_endpoint(&self, session: &Session) -> Result<Option<Url>, Error> {
        let d = &self.descriptor;
        let Some(catalog_url) = session.catalog_endpoint(d.base_service)? else {
            debug!(service = d.service_type, base = d.base_service, "no catalog entry");
            return Ok(None);
        };
        let mut url = rewrite_service_host(&catalog_url, d.target_service)?;
        if let Some(template) = d.endpoint_path {
            apply_endpoint_path(session, &mut url, template)?;
        }
        debug!(service = d.service_type, %url, "synthesized endpoint from catalog");
        Ok(Some(url))
    }

    fn unsupported(&self, session: &Arc<Session>, endpoint: Url, version: String) -> ProxyBinding<P> {
        let service = self.descriptor.service_type;
        warn!(service, %version, %endpoint, "unsupported API version, using raw client");
        ProxyBinding::Degraded {
            adapter: session.raw_client(endpoint),
            reason: DegradedCapability::UnsupportedVersion {
                service: service.to_owned(),
                version,
            },
        }
    }

    async fn discover<D: Discovery>(
        &self,
        session: &Arc<Session>,
        discovery: &D,
        configured: Option<&str>,
    ) -> Result<ProxyBinding<P>, Error> {
        let d = &self.descriptor;
        let not_supported = || Error::NotSupported {
            service: d.service_type.to_owned(),
            region: session.region().to_owned(),
        };

        let (min_version, max_version) = match configured {
            Some(raw) => {
                let version = raw.parse::<ApiVersion>()?;
                (version, version)
            }
            None => self.supported.range().ok_or_else(not_supported)?,
        };

        let adapter = VersionedAdapter {
            service_type: d.target_service.to_owned(),
            region: session.region().to_owned(),
            interface: session.interface(),
            min_version,
            max_version,
        };
        debug!(service = d.service_type, min = %min_version, max = %max_version, "catalog discovery");

        let Some(data) = discovery.endpoint_data(&adapter).await? else {
            return Err(not_supported());
        };

        let endpoint = match d.endpoint_path {
            Some(template) => {
                let mut url = data.catalog_url.clone();
                apply_endpoint_path(session, &mut url, template)?;
                url
            }
            None => data.self_link.unwrap_or(data.catalog_url),
        };

        match self.supported.resolve(data.api_version) {
            Some((version, ctor)) => {
                let proxy = ctor(session.json_client(endpoint));
                Ok(ProxyBinding::Bound {
                    endpoint: proxy.client().endpoint().clone(),
                    proxy,
                    version,
                })
            }
            None => Ok(self.unsupported(session, endpoint, data.api_version.to_string())),
        }
    }

    async fn follow_service_url<D: Discovery>(
        &self,
        session: &Arc<Session>,
        discovery: &D,
        proxy: P,
        ctor: ProxyCtor<P>,
        version: ApiVersion,
        endpoint: Url,
    ) -> ProxyBinding<P> {
        let bound = |proxy: P| ProxyBinding::Bound {
            endpoint: proxy.client().endpoint().clone(),
            proxy,
            version,
        };
        if proxy.skip_discovery() {
            return bound(proxy);
        }

        match discovery.endpoint_metadata(&endpoint, version).await {
            Ok(Some(self_link)) if self_link.origin() != endpoint.origin() => {
                let service_url = crate::discovery::rebase_origin(&endpoint, &self_link);
                session.set_endpoint_override(self.descriptor.service_type, service_url.clone());
                bound(ctor(session.json_client(service_url)))
            }
            Ok(_) => bound(proxy),
            Err(e) => {
                debug!(error = %e, %endpoint, "endpoint metadata unavailable, keeping endpoint");
                bound(proxy)
            }
        }
    }
}

fn apply_endpoint_path(session: &Session, url: &mut Url, template: &str) -> Result<(), Error> {
    let path = UriParams::new().render(template, session.project_id())?;
    url.set_path(&format!("/{}", path.trim_start_matches('/')));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Dummy(ServiceClient);

    impl Proxy for Dummy {
        fn client(&self) -> &ServiceClient {
            &self.0
        }
    }

    fn versions() -> SupportedVersions<Dummy> {
        SupportedVersions::new()
            .with(ApiVersion::major(1), Dummy)
            .with(ApiVersion::major(2), Dummy)
    }

    #[test]
    fn resolve_falls_back_to_major() {
        let supported = versions();
        let (v, _) = supported.resolve(ApiVersion::new(2, 1)).unwrap();
        assert_eq!(v, ApiVersion::major(2));
        assert!(supported.resolve(ApiVersion::major(3)).is_none());
    }

    #[test]
    fn range_and_only() {
        let supported = versions();
        assert_eq!(
            supported.range(),
            Some((ApiVersion::major(1), ApiVersion::major(2)))
        );
        assert_eq!(supported.only(), None);

        let single = SupportedVersions::single(ApiVersion::major(3), Dummy);
        assert_eq!(single.only(), Some(ApiVersion::major(3)));
        assert!(SupportedVersions::<Dummy>::new().range().is_none());
    }

    #[test]
    fn degraded_reason_mentions_service() {
        let reason = DegradedCapability::UnsupportedVersion {
            service: "apig".into(),
            version: "v9".into(),
        };
        let text = reason.to_string();
        assert!(text.contains("apig") && text.contains("v9"));
    }
}
