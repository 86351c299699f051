// Keystone service catalog
//
// The catalog maps service type + region + interface to a base endpoint URL.
// It is captured once from the token response and never refreshed.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::{Host, Url};

use crate::error::Error;

/// Which catalog endpoint flavour to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

/// One endpoint of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEndpoint {
    #[serde(default)]
    pub id: Option<String>,
    pub interface: Interface,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub region_id: Option<String>,
    /// Raw URL; may still carry a `{project_id}`-style placeholder.
    pub url: String,
}

impl CatalogEndpoint {
    fn in_region(&self, region: &str) -> bool {
        self.region_id.as_deref() == Some(region) || self.region.as_deref() == Some(region)
    }
}

/// One service in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<CatalogEndpoint>,
}

/// The cached service catalog of an authenticated session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    entries: Vec<CatalogEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Raw endpoint URL for a service type in a region.
    ///
    /// An endpoint without region information matches any region.
    pub fn endpoint_for(
        &self,
        service_type: &str,
        region: &str,
        interface: Interface,
    ) -> Option<&str> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.service_type == service_type)?;

        let candidates = entry.endpoints.iter().filter(|ep| ep.interface == interface);
        let mut regionless = None;
        for ep in candidates {
            if ep.in_region(region) {
                return Some(ep.url.as_str());
            }
            if ep.region.is_none() && ep.region_id.is_none() && regionless.is_none() {
                regionless = Some(ep.url.as_str());
            }
        }
        regionless
    }
}

/// Replace the service-name label of a catalog URL's host.
///
/// `https://vpc.eu-de.example.com/v1` with target `elb` becomes
/// `https://elb.eu-de.example.com/v1`. IP-address and single-label hosts have
/// no service label and are returned unchanged.
pub fn rewrite_service_host(url: &Url, target_service: &str) -> Result<Url, Error> {
    let Some(Host::Domain(domain)) = url.host() else {
        return Ok(url.clone());
    };
    let Some((_, rest)) = domain.split_once('.') else {
        return Ok(url.clone());
    };

    let mut rewritten = url.clone();
    rewritten.set_host(Some(&format!("{target_service}.{rest}")))?;
    Ok(rewritten)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> ServiceCatalog {
        serde_json::from_value(json!([
            {
                "type": "vpc",
                "name": "vpc",
                "endpoints": [
                    { "interface": "public", "region": "eu-de", "region_id": "eu-de",
                      "url": "https://vpc.eu-de.example.com/v1/{project_id}" },
                    { "interface": "public", "region": "eu-nl", "region_id": "eu-nl",
                      "url": "https://vpc.eu-nl.example.com/v1/{project_id}" },
                    { "interface": "internal", "region_id": "eu-de",
                      "url": "http://vpc.internal:9696" }
                ]
            },
            {
                "type": "identity",
                "endpoints": [
                    { "interface": "public", "url": "https://iam.example.com/v3" }
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn endpoint_matches_region_and_interface() {
        let cat = catalog();
        assert_eq!(
            cat.endpoint_for("vpc", "eu-nl", Interface::Public),
            Some("https://vpc.eu-nl.example.com/v1/{project_id}")
        );
        assert_eq!(
            cat.endpoint_for("vpc", "eu-de", Interface::Internal),
            Some("http://vpc.internal:9696")
        );
    }

    #[test]
    fn regionless_endpoint_matches_any_region() {
        let cat = catalog();
        assert_eq!(
            cat.endpoint_for("identity", "eu-de", Interface::Public),
            Some("https://iam.example.com/v3")
        );
    }

    #[test]
    fn unknown_service_or_region() {
        let cat = catalog();
        assert!(cat.endpoint_for("apig", "eu-de", Interface::Public).is_none());
        assert!(cat.endpoint_for("vpc", "ap-south", Interface::Public).is_none());
    }

    #[test]
    fn interface_parses_case_insensitively() {
        assert_eq!("Internal".parse::<Interface>().unwrap(), Interface::Internal);
        assert_eq!(Interface::Admin.to_string(), "admin");
    }

    #[test]
    fn rewrite_replaces_leftmost_label() {
        let url = Url::parse("https://vpc.eu-de.example.com/v1/abc").unwrap();
        let out = rewrite_service_host(&url, "elb").unwrap();
        assert_eq!(out.as_str(), "https://elb.eu-de.example.com/v1/abc");
    }

    #[test]
    fn rewrite_leaves_ip_hosts_alone() {
        let url = Url::parse("http://127.0.0.1:8080/v2").unwrap();
        assert_eq!(rewrite_service_host(&url, "elb").unwrap(), url);

        let url = Url::parse("http://localhost:8080/").unwrap();
        assert_eq!(rewrite_service_host(&url, "elb").unwrap(), url);
    }
}
