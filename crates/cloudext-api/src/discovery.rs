// API version discovery
//
// Services publish a versions document either at their endpoint or at the
// root of their host. Three shapes are in use:
//
//   {"versions": [{"id": "v2", "status": "CURRENT", "links": [...]}]}
//   {"versions": {"values": [...]}}          (Keystone style)
//   {"version": {"id": "v2.0", ...}}         (single-version document)
//
// When nothing usable is published, a `/vN` segment in the endpoint path is
// taken as the major version.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use secrecy::ExposeSecret;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::catalog::Interface;
use crate::client::AUTH_TOKEN_HEADER;
use crate::error::Error;
use crate::session::Session;

// ── ApiVersion ───────────────────────────────────────────────────────

/// A `major.minor` API version. Parses `v2`, `2`, `2.0` and `v1.1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u32,
    pub minor: u32,
}

impl ApiVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    pub const fn major(major: u32) -> Self {
        Self { major, minor: 0 }
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidApiVersion {
            value: s.to_owned(),
        };
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
        let (major, minor) = match digits.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (digits, None),
        };
        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: match minor {
                Some(m) => m.parse().map_err(|_| invalid())?,
                None => 0,
            },
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.minor == 0 {
            write!(f, "v{}", self.major)
        } else {
            write!(f, "v{}.{}", self.major, self.minor)
        }
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── Versions document ────────────────────────────────────────────────

/// One entry of a versions document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: ApiVersion,
    pub status: Option<String>,
    pub self_link: Option<Url>,
}

impl VersionInfo {
    fn from_json(value: &Value) -> Option<Self> {
        let version = value.get("id")?.as_str()?.parse().ok()?;
        let status = value
            .get("status")
            .and_then(Value::as_str)
            .map(String::from);
        let self_link = value
            .get("links")
            .and_then(Value::as_array)
            .and_then(|links| {
                links
                    .iter()
                    .find(|l| l.get("rel").and_then(Value::as_str) == Some("self"))
            })
            .and_then(|l| l.get("href").and_then(Value::as_str))
            .and_then(|href| Url::parse(href).ok());

        Some(Self {
            version,
            status,
            self_link,
        })
    }

    fn is_current(&self) -> bool {
        self.status.as_deref().is_some_and(|s| {
            s.eq_ignore_ascii_case("current") || s.eq_ignore_ascii_case("stable")
        })
    }
}

/// Parse any of the known versions-document shapes. Entries without a
/// parseable `id` are skipped.
pub fn parse_versions(body: &Value) -> Vec<VersionInfo> {
    let entries: Vec<&Value> = match (body.get("versions"), body.get("version")) {
        (Some(Value::Array(list)), _) => list.iter().collect(),
        (Some(Value::Object(obj)), _) => obj
            .get("values")
            .and_then(Value::as_array)
            .map(|list| list.iter().collect())
            .unwrap_or_default(),
        (None, Some(single)) if single.is_object() => vec![single],
        _ => Vec::new(),
    };
    entries
        .into_iter()
        .filter_map(VersionInfo::from_json)
        .collect()
}

/// The CURRENT entry, or the highest version when none is marked.
pub fn pick_current(versions: &[VersionInfo]) -> Option<&VersionInfo> {
    versions
        .iter()
        .find(|v| v.is_current())
        .or_else(|| versions.iter().max_by_key(|v| v.version))
}

/// The entry matching the major version `endpoint` names in its path, or
/// the CURRENT entry when the path names none.
///
/// A root document describes every version on the host, so its CURRENT
/// entry says nothing about a `/v1/...` endpoint.
pub fn pick_for_endpoint<'a>(
    versions: &'a [VersionInfo],
    endpoint: &Url,
) -> Option<&'a VersionInfo> {
    match version_from_url(endpoint) {
        Some(named) => versions.iter().find(|v| v.version.major == named.major),
        None => pick_current(versions),
    }
}

/// Major version from a `/vN` (or `/vN.M`) path segment.
pub fn version_from_url(url: &Url) -> Option<ApiVersion> {
    url.path_segments()?.find_map(|seg| {
        let rest = seg.strip_prefix(['v', 'V'])?;
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            seg.parse().ok()
        } else {
            None
        }
    })
}

/// `endpoint` moved onto the scheme, host and port of `origin`, keeping
/// its own path.
pub fn rebase_origin(endpoint: &Url, origin: &Url) -> Url {
    let mut rebased = origin.clone();
    rebased.set_path(endpoint.path());
    rebased.set_query(endpoint.query());
    rebased.set_fragment(None);
    rebased
}

// ── Discovery ────────────────────────────────────────────────────────

/// Catalog-driven discovery constrained to a version range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedAdapter {
    pub service_type: String,
    pub region: String,
    pub interface: Interface,
    pub min_version: ApiVersion,
    pub max_version: ApiVersion,
}

impl VersionedAdapter {
    /// Whether a discovered version falls inside the major range.
    pub fn accepts(&self, version: ApiVersion) -> bool {
        (self.min_version.major..=self.max_version.major).contains(&version.major)
    }
}

/// What catalog discovery resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointData {
    pub catalog_url: Url,
    pub api_version: ApiVersion,
    pub self_link: Option<Url>,
}

/// The remote queries the resolver makes.
///
/// `Session` is the production implementation; tests substitute recorders.
pub trait Discovery: Send + Sync {
    /// Ask an endpoint which major API version it serves.
    fn discover_major_version(
        &self,
        endpoint: &Url,
    ) -> impl Future<Output = Result<Option<ApiVersion>, Error>> + Send;

    /// Resolve endpoint and version for `adapter.service_type` from the catalog.
    fn endpoint_data(
        &self,
        adapter: &VersionedAdapter,
    ) -> impl Future<Output = Result<Option<EndpointData>, Error>> + Send;

    /// The self link the endpoint publishes for `version`.
    fn endpoint_metadata(
        &self,
        endpoint: &Url,
        version: ApiVersion,
    ) -> impl Future<Output = Result<Option<Url>, Error>> + Send;
}

impl Session {
    /// Fetch the versions document from `endpoint`, then from its host root.
    pub async fn fetch_versions(&self, endpoint: &Url) -> Result<Vec<VersionInfo>, Error> {
        let mut root = endpoint.clone();
        root.set_path("/");
        root.set_query(None);

        let mut candidates = vec![endpoint.clone()];
        if root != *endpoint {
            candidates.push(root);
        }

        for url in candidates {
            debug!("GET {url} (version discovery)");
            let resp = self
                .http()
                .get(url.clone())
                .header(AUTH_TOKEN_HEADER, self.token().expose_secret())
                .send()
                .await?;
            let status = resp.status();
            if !status.is_success() {
                debug!(%status, "no versions document at {url}");
                continue;
            }
            let text = resp.text().await?;
            let Ok(body) = serde_json::from_str::<Value>(&text) else {
                debug!("non-JSON versions document at {url}");
                continue;
            };
            let versions = parse_versions(&body);
            if !versions.is_empty() {
                return Ok(versions);
            }
        }
        Ok(Vec::new())
    }
}

impl Discovery for Session {
    async fn discover_major_version(&self, endpoint: &Url) -> Result<Option<ApiVersion>, Error> {
        let versions = self.fetch_versions(endpoint).await?;
        if let Some(found) = pick_for_endpoint(&versions, endpoint) {
            return Ok(Some(found.version));
        }
        Ok(version_from_url(endpoint))
    }

    async fn endpoint_data(&self, adapter: &VersionedAdapter) -> Result<Option<EndpointData>, Error> {
        let Some(raw) =
            self.catalog()
                .endpoint_for(&adapter.service_type, &adapter.region, adapter.interface)
        else {
            debug!(service = %adapter.service_type, "service not in catalog");
            return Ok(None);
        };
        let catalog_url = self.expand_endpoint(raw)?;

        let versions: Vec<VersionInfo> = self
            .fetch_versions(&catalog_url)
            .await?
            .into_iter()
            .filter(|v| adapter.accepts(v.version))
            .collect();

        if let Some(found) = pick_for_endpoint(&versions, &catalog_url) {
            return Ok(Some(EndpointData {
                api_version: found.version,
                self_link: found.self_link.clone(),
                catalog_url,
            }));
        }

        let from_path = version_from_url(&catalog_url).filter(|v| adapter.accepts(*v));
        Ok(from_path.map(|api_version| EndpointData {
            catalog_url,
            api_version,
            self_link: None,
        }))
    }

    async fn endpoint_metadata(
        &self,
        endpoint: &Url,
        version: ApiVersion,
    ) -> Result<Option<Url>, Error> {
        let matching: Vec<VersionInfo> = self
            .fetch_versions(endpoint)
            .await?
            .into_iter()
            .filter(|v| v.version.major == version.major)
            .collect();
        Ok(pick_current(&matching).and_then(|v| v.self_link.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_version_parsing() {
        assert_eq!("v2".parse::<ApiVersion>().unwrap(), ApiVersion::major(2));
        assert_eq!("2".parse::<ApiVersion>().unwrap(), ApiVersion::major(2));
        assert_eq!("2.0".parse::<ApiVersion>().unwrap(), ApiVersion::major(2));
        assert_eq!("V1.1".parse::<ApiVersion>().unwrap(), ApiVersion::new(1, 1));
        assert!("latest".parse::<ApiVersion>().is_err());
        assert!("v".parse::<ApiVersion>().is_err());
        assert!("+2".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn api_version_display_and_order() {
        assert_eq!(ApiVersion::major(3).to_string(), "v3");
        assert_eq!(ApiVersion::new(1, 1).to_string(), "v1.1");
        assert!(ApiVersion::new(1, 1) < ApiVersion::major(2));
    }

    #[test]
    fn parses_list_shape() {
        let versions = parse_versions(&json!({
            "versions": [
                { "id": "v1", "status": "SUPPORTED",
                  "links": [{ "rel": "self", "href": "https://svc.example.com/v1/" }] },
                { "id": "v2", "status": "CURRENT",
                  "links": [{ "rel": "self", "href": "https://svc.example.com/v2/" }] },
                { "id": "beta" }
            ]
        }));
        assert_eq!(versions.len(), 2);
        let current = pick_current(&versions).unwrap();
        assert_eq!(current.version, ApiVersion::major(2));
        assert_eq!(
            current.self_link.as_ref().unwrap().as_str(),
            "https://svc.example.com/v2/"
        );
    }

    #[test]
    fn parses_values_and_single_shapes() {
        let values = parse_versions(&json!({
            "versions": { "values": [{ "id": "v3.0", "status": "stable" }] }
        }));
        assert_eq!(values[0].version, ApiVersion::major(3));

        let single = parse_versions(&json!({ "version": { "id": "v1.1" } }));
        assert_eq!(single[0].version, ApiVersion::new(1, 1));

        assert!(parse_versions(&json!({ "error": "nope" })).is_empty());
    }

    #[test]
    fn highest_wins_without_current() {
        let versions = parse_versions(&json!({
            "versions": [{ "id": "v1" }, { "id": "v3" }, { "id": "v2" }]
        }));
        assert_eq!(pick_current(&versions).unwrap().version, ApiVersion::major(3));
    }

    #[test]
    fn versioned_path_beats_current_entry() {
        let versions = parse_versions(&json!({
            "versions": [
                { "id": "v1.1", "status": "SUPPORTED" },
                { "id": "v2", "status": "CURRENT" }
            ]
        }));
        let pinned = Url::parse("https://modelarts.example.com/v1/p1/").unwrap();
        assert_eq!(
            pick_for_endpoint(&versions, &pinned).unwrap().version,
            ApiVersion::new(1, 1)
        );

        let root = Url::parse("https://modelarts.example.com/").unwrap();
        assert_eq!(
            pick_for_endpoint(&versions, &root).unwrap().version,
            ApiVersion::major(2)
        );

        let unlisted = Url::parse("https://modelarts.example.com/v3/p1/").unwrap();
        assert!(pick_for_endpoint(&versions, &unlisted).is_none());
    }

    #[test]
    fn version_from_path_segment() {
        let url = Url::parse("https://elb.example.com/v3/abc/").unwrap();
        assert_eq!(version_from_url(&url), Some(ApiVersion::major(3)));

        let url = Url::parse("https://vpc.example.com/vpcs/v1").unwrap();
        assert_eq!(version_from_url(&url), Some(ApiVersion::major(1)));

        let url = Url::parse("https://modelarts.example.com/").unwrap();
        assert_eq!(version_from_url(&url), None);
    }

    #[test]
    fn rebase_keeps_path() {
        let endpoint = Url::parse("https://apig.example.com/v2/p1/").unwrap();
        let origin = Url::parse("http://10.0.0.5:8443/v2/").unwrap();
        assert_eq!(
            rebase_origin(&endpoint, &origin).as_str(),
            "http://10.0.0.5:8443/v2/p1/"
        );
    }

    #[test]
    fn adapter_accepts_major_range() {
        let adapter = VersionedAdapter {
            service_type: "modelarts".into(),
            region: "eu-de".into(),
            interface: Interface::Public,
            min_version: ApiVersion::major(1),
            max_version: ApiVersion::major(2),
        };
        assert!(adapter.accepts(ApiVersion::new(2, 3)));
        assert!(!adapter.accepts(ApiVersion::major(3)));
    }
}
