#![allow(clippy::unwrap_used)]
// Resolver tests against a recording `Discovery`.
//
// The recorder answers discovery queries from canned values and logs every
// call, so each decision branch of `create_proxy_with` can be checked for
// both its outcome and the remote queries it made.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use url::Url;

use cloudext_api::catalog::{CatalogEndpoint, CatalogEntry};
use cloudext_api::{
    ApiVersion, DegradedCapability, Discovery, EndpointData, Error, Interface, Proxy,
    ProxyBinding, ServiceCatalog, ServiceClient, ServiceDescriptor, ServiceOptions, ServiceProxy,
    Session, SupportedVersions, VersionedAdapter,
};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Debug)]
struct TestProxy {
    client: ServiceClient,
    built_by: &'static str,
    skip: bool,
}

impl Proxy for TestProxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }

    fn skip_discovery(&self) -> bool {
        self.skip
    }
}

fn v1(client: ServiceClient) -> TestProxy {
    TestProxy {
        client,
        built_by: "v1",
        skip: false,
    }
}

fn v2(client: ServiceClient) -> TestProxy {
    TestProxy {
        client,
        built_by: "v2",
        skip: false,
    }
}

fn v3(client: ServiceClient) -> TestProxy {
    TestProxy {
        client,
        built_by: "v3",
        skip: false,
    }
}

fn v2_no_discovery(client: ServiceClient) -> TestProxy {
    TestProxy {
        client,
        built_by: "v2",
        skip: true,
    }
}

#[derive(Default)]
struct Recorder {
    major: Option<ApiVersion>,
    data: Option<EndpointData>,
    metadata: Option<Url>,
    metadata_fails: bool,
    calls: Mutex<Vec<&'static str>>,
    adapters: Mutex<Vec<VersionedAdapter>>,
}

impl Recorder {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl Discovery for Recorder {
    async fn discover_major_version(&self, _endpoint: &Url) -> Result<Option<ApiVersion>, Error> {
        self.calls.lock().unwrap().push("discover_major_version");
        Ok(self.major)
    }

    async fn endpoint_data(&self, adapter: &VersionedAdapter) -> Result<Option<EndpointData>, Error> {
        self.calls.lock().unwrap().push("endpoint_data");
        self.adapters.lock().unwrap().push(adapter.clone());
        Ok(self.data.clone())
    }

    async fn endpoint_metadata(
        &self,
        _endpoint: &Url,
        _version: ApiVersion,
    ) -> Result<Option<Url>, Error> {
        self.calls.lock().unwrap().push("endpoint_metadata");
        if self.metadata_fails {
            return Err(Error::Http {
                status: 503,
                message: "unavailable".into(),
                code: None,
                request_id: None,
                body: None,
            });
        }
        Ok(self.metadata.clone())
    }
}

const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    service_type: "svc",
    base_service: "vpc",
    target_service: "elb",
    endpoint_path: Some("v3/{project_id}"),
};

fn session(with_catalog_entry: bool) -> Arc<Session> {
    let entries = if with_catalog_entry {
        vec![CatalogEntry {
            service_type: "vpc".into(),
            name: None,
            endpoints: vec![CatalogEndpoint {
                id: None,
                interface: Interface::Public,
                region: Some("eu-de".into()),
                region_id: Some("eu-de".into()),
                url: "https://vpc.eu-de.example.com/v1/{project_id}".into(),
            }],
        }]
    } else {
        Vec::new()
    };
    Arc::new(Session::new(
        reqwest::Client::new(),
        SecretString::from("tok".to_owned()),
        Some("p1".into()),
        ServiceCatalog::new(entries),
        "eu-de",
        Interface::Public,
    ))
}

fn two_versions() -> ServiceProxy<TestProxy> {
    ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::new()
            .with(ApiVersion::major(1), v1)
            .with(ApiVersion::major(2), v2),
    )
}

fn options(version: Option<&str>, endpoint: Option<&str>) -> ServiceOptions {
    ServiceOptions {
        api_version: version.map(String::from),
        endpoint_override: endpoint.map(String::from),
    }
}

// ── Endpoint override + version ─────────────────────────────────────

#[tokio::test]
async fn override_with_supported_version_binds_that_constructor() {
    let session = session(false);
    let recorder = Recorder::default();

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(Some("2"), Some("https://gw.example.com/v2/{project_id}")),
        )
        .await
        .unwrap();

    let ProxyBinding::Bound {
        proxy,
        version,
        endpoint,
    } = binding
    else {
        panic!("expected a bound proxy");
    };
    assert_eq!(proxy.built_by, "v2");
    assert_eq!(version, ApiVersion::major(2));
    assert_eq!(endpoint.as_str(), "https://gw.example.com/v2/p1/");
    assert!(proxy.client().has_json_content_type());
    assert_eq!(recorder.calls(), vec!["endpoint_metadata"]);
}

#[tokio::test]
async fn override_with_unknown_version_degrades_without_error() {
    let session = session(false);
    let recorder = Recorder::default();

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(Some("v9"), Some("https://gw.example.com/v9")),
        )
        .await
        .unwrap();

    let ProxyBinding::Degraded { adapter, reason } = binding else {
        panic!("expected a degraded binding");
    };
    assert!(!adapter.has_json_content_type());
    assert_eq!(adapter.endpoint().as_str(), "https://gw.example.com/v9/");
    assert_eq!(
        reason,
        DegradedCapability::UnsupportedVersion {
            service: "svc".into(),
            version: "v9".into(),
        }
    );
    assert!(recorder.calls().is_empty());
}

#[tokio::test]
async fn unparseable_version_degrades_too() {
    let session = session(false);
    let binding = two_versions()
        .create_proxy_with(
            &session,
            &Recorder::default(),
            &options(Some("latest"), Some("https://gw.example.com/")),
        )
        .await
        .unwrap();
    assert!(binding.is_degraded());
}

#[tokio::test]
async fn memoized_override_wins_over_configuration() {
    let session = session(false);
    session.set_endpoint_override("svc", Url::parse("https://memo.example.com/v2/p1/").unwrap());

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &Recorder::default(),
            &options(Some("2"), Some("https://configured.example.com/v2/p1")),
        )
        .await
        .unwrap();

    assert_eq!(
        binding.client().endpoint().as_str(),
        "https://memo.example.com/v2/p1/"
    );
}

// ── Endpoint only ───────────────────────────────────────────────────

#[tokio::test]
async fn override_without_version_asks_the_endpoint() {
    let session = session(false);
    let recorder = Recorder {
        major: Some(ApiVersion::major(1)),
        ..Recorder::default()
    };

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(None, Some("https://gw.example.com/")),
        )
        .await
        .unwrap();

    assert_eq!(binding.proxy().unwrap().built_by, "v1");
    assert_eq!(
        recorder.calls(),
        vec!["discover_major_version", "endpoint_metadata"]
    );
}

#[tokio::test]
async fn undeterminable_version_degrades() {
    let session = session(false);
    let recorder = Recorder::default();

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(None, Some("https://gw.example.com/")),
        )
        .await
        .unwrap();

    assert!(matches!(
        binding.degraded_reason(),
        Some(DegradedCapability::VersionUndetermined { .. })
    ));
    assert!(!binding.client().has_json_content_type());
}

// ── Catalog-synthesized endpoint ────────────────────────────────────

#[tokio::test]
async fn single_version_defaults_without_discovering_twice() {
    let session = session(true);
    let recorder = Recorder::default();
    let service = ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::single(ApiVersion::major(3), v3),
    );

    let binding = service
        .create_proxy_with(&session, &recorder, &ServiceOptions::default())
        .await
        .unwrap();

    assert_eq!(binding.proxy().unwrap().built_by, "v3");
    assert_eq!(
        binding.client().endpoint().as_str(),
        "https://elb.eu-de.example.com/v3/p1/"
    );
    let calls = recorder.calls();
    assert!(calls.len() <= 1, "discovery queried more than once: {calls:?}");
    assert!(!calls.contains(&"endpoint_data"));
    assert!(!calls.contains(&"discover_major_version"));
}

// ── Catalog discovery ───────────────────────────────────────────────

#[tokio::test]
async fn discovery_adapter_spans_supported_range() {
    let session = session(false);
    let recorder = Recorder {
        data: Some(EndpointData {
            catalog_url: Url::parse("https://elb.eu-de.example.com/").unwrap(),
            api_version: ApiVersion::major(2),
            self_link: None,
        }),
        ..Recorder::default()
    };
    let service = ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::new()
            .with(ApiVersion::major(1), v1)
            .with(ApiVersion::major(2), v2)
            .with(ApiVersion::major(3), v3),
    );

    let binding = service
        .create_proxy_with(&session, &recorder, &ServiceOptions::default())
        .await
        .unwrap();

    let adapters = recorder.adapters.lock().unwrap().clone();
    assert_eq!(adapters.len(), 1);
    assert_eq!(adapters[0].service_type, "elb");
    assert_eq!(adapters[0].region, "eu-de");
    assert_eq!(adapters[0].min_version, ApiVersion::major(1));
    assert_eq!(adapters[0].max_version, ApiVersion::major(3));

    assert_eq!(binding.proxy().unwrap().built_by, "v2");
    assert_eq!(
        binding.client().endpoint().as_str(),
        "https://elb.eu-de.example.com/v3/p1/"
    );
}

#[tokio::test]
async fn configured_version_pins_the_range() {
    let session = session(false);
    let recorder = Recorder::default();

    let _ = two_versions()
        .create_proxy_with(&session, &recorder, &options(Some("2"), None))
        .await;

    let adapters = recorder.adapters.lock().unwrap().clone();
    assert_eq!(adapters[0].min_version, ApiVersion::major(2));
    assert_eq!(adapters[0].max_version, ApiVersion::major(2));
}

#[tokio::test]
async fn nothing_discovered_is_not_supported() {
    let session = session(false);
    let err = two_versions()
        .create_proxy_with(&session, &Recorder::default(), &ServiceOptions::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, Error::NotSupported { ref service, ref region } if service == "svc" && region == "eu-de"),
        "got {err:?}"
    );
    assert!(err.to_string().contains("svc"));
}

#[tokio::test]
async fn discovered_version_outside_map_degrades() {
    let session = session(false);
    let recorder = Recorder {
        data: Some(EndpointData {
            catalog_url: Url::parse("https://elb.eu-de.example.com/").unwrap(),
            api_version: ApiVersion::major(4),
            self_link: None,
        }),
        ..Recorder::default()
    };

    let binding = two_versions()
        .create_proxy_with(&session, &recorder, &ServiceOptions::default())
        .await
        .unwrap();
    assert!(matches!(
        binding.degraded_reason(),
        Some(DegradedCapability::UnsupportedVersion { version, .. }) if version == "v4"
    ));
}

// ── Service URL follow-up ───────────────────────────────────────────

#[tokio::test]
async fn self_link_on_other_origin_is_memoized() {
    let session = session(false);
    let recorder = Recorder {
        metadata: Some(Url::parse("http://10.0.0.5:8080/v2/").unwrap()),
        ..Recorder::default()
    };

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(Some("2"), Some("https://gw.example.com/v2/p1")),
        )
        .await
        .unwrap();

    assert_eq!(
        binding.client().endpoint().as_str(),
        "http://10.0.0.5:8080/v2/p1/"
    );
    assert!(binding.client().has_json_content_type());
    assert_eq!(
        session.endpoint_override("svc").unwrap().as_str(),
        "http://10.0.0.5:8080/v2/p1"
    );
}

#[tokio::test]
async fn self_link_on_same_origin_keeps_endpoint() {
    let session = session(false);
    let recorder = Recorder {
        metadata: Some(Url::parse("https://gw.example.com/v2/").unwrap()),
        ..Recorder::default()
    };

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(Some("2"), Some("https://gw.example.com/v2/p1")),
        )
        .await
        .unwrap();

    assert_eq!(
        binding.client().endpoint().as_str(),
        "https://gw.example.com/v2/p1/"
    );
    assert!(session.endpoint_override("svc").is_none());
}

#[tokio::test]
async fn failed_metadata_fetch_keeps_proxy() {
    let session = session(false);
    let recorder = Recorder {
        metadata_fails: true,
        ..Recorder::default()
    };

    let binding = two_versions()
        .create_proxy_with(
            &session,
            &recorder,
            &options(Some("1"), Some("https://gw.example.com/v1")),
        )
        .await
        .unwrap();

    assert_eq!(binding.proxy().unwrap().built_by, "v1");
    assert_eq!(binding.version(), Some(ApiVersion::major(1)));
}

#[tokio::test]
async fn skip_discovery_proxies_make_no_metadata_call() {
    let session = session(false);
    let recorder = Recorder {
        metadata: Some(Url::parse("http://10.0.0.5:8080/").unwrap()),
        ..Recorder::default()
    };
    let service = ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::single(ApiVersion::major(2), v2_no_discovery),
    );

    let binding = service
        .create_proxy_with(
            &session,
            &recorder,
            &options(None, Some("https://gw.example.com/v2")),
        )
        .await
        .unwrap();

    assert!(recorder.calls().is_empty());
    assert_eq!(
        binding.client().endpoint().as_str(),
        "https://gw.example.com/v2/"
    );
}
