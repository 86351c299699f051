#![allow(clippy::unwrap_used)]
// Integration tests for authentication, live resolution and the service
// proxies, against wiremock.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudext_api::catalog::{CatalogEndpoint, CatalogEntry};
use cloudext_api::services::apig::v2::ApigProxy;
use cloudext_api::services::apig::v2::models::ApiGroup;
use cloudext_api::services::modelarts::{ModelArtsProxy, TrainingJobQuery};
use cloudext_api::services::vlb::v3::VlbProxy;
use cloudext_api::services::vlb::v3::models::LoadBalancer;
use cloudext_api::services::{apig, modelarts, nat};
use cloudext_api::{
    ApiVersion, Credentials, Error, Interface, ProjectScope, ProxyBinding, ResourceRef,
    ServiceCatalog, ServiceOptions, Session, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn entry(service_type: &str, url: String) -> CatalogEntry {
    CatalogEntry {
        service_type: service_type.into(),
        name: None,
        endpoints: vec![CatalogEndpoint {
            id: None,
            interface: Interface::Public,
            region: Some("eu-de".into()),
            region_id: Some("eu-de".into()),
            url,
        }],
    }
}

async fn setup(catalog: impl FnOnce(&str) -> Vec<CatalogEntry>) -> (MockServer, Arc<Session>) {
    let server = MockServer::start().await;
    let entries = catalog(&server.uri());
    let session = Session::new(
        reqwest::Client::new(),
        SecretString::from("test-token".to_owned()),
        Some("p1".into()),
        ServiceCatalog::new(entries),
        "eu-de",
        Interface::Public,
    );
    (server, Arc::new(session))
}

fn endpoint(server: &MockServer, suffix: &str) -> Url {
    Url::parse(&format!("{}/{suffix}", server.uri())).unwrap()
}

async fn apig_proxy() -> (MockServer, ApigProxy) {
    let (server, session) = setup(|_| Vec::new()).await;
    let client = session.json_client(endpoint(&server, "v2/p1"));
    (server, ApigProxy::new(client))
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_password_auth_captures_token_and_catalog() {
    let server = MockServer::start().await;
    let uri = server.uri();

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .and(body_partial_json(json!({
            "auth": {
                "identity": {
                    "methods": ["password"],
                    "password": { "user": { "name": "alice", "domain": { "name": "acme" } } }
                },
                "scope": { "project": { "name": "eu-de_acme", "domain": { "name": "acme" } } }
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", "issued-token")
                .set_body_json(json!({
                    "token": {
                        "expires_at": "2030-01-01T00:00:00.000000Z",
                        "project": { "id": "p1", "name": "eu-de_acme" },
                        "catalog": [{
                            "type": "nat",
                            "endpoints": [{
                                "interface": "public",
                                "region": "eu-de",
                                "region_id": "eu-de",
                                "url": format!("{uri}/v2/$(tenant_id)s")
                            }]
                        }]
                    }
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/p1/nat_gateways"))
        .and(header("X-Auth-Token", "issued-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "nat_gateways": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials::Password {
        auth_url: Url::parse(&format!("{uri}/v3")).unwrap(),
        username: "alice".into(),
        password: SecretString::from("s3cret".to_owned()),
        user_domain_name: "acme".into(),
        project: ProjectScope::Name {
            name: "eu-de_acme".into(),
            domain_name: "acme".into(),
        },
    };
    let session = Session::connect(
        &credentials,
        "eu-de",
        Interface::Public,
        &TransportConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(session.project_id(), Some("p1"));
    assert_eq!(
        session.catalog_endpoint("nat").unwrap().unwrap().as_str(),
        format!("{uri}/v2/p1")
    );

    let binding = nat::service()
        .create_proxy(&session, &ServiceOptions::default())
        .await
        .unwrap();
    let gateways = binding.proxy().unwrap().list_gateways(&[]).await.unwrap();
    assert!(gateways.is_empty());
}

#[tokio::test]
async fn test_rejected_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "The request you have made requires authentication.", "title": "Unauthorized" }
        })))
        .mount(&server)
        .await;

    let credentials = Credentials::Token {
        auth_url: Url::parse(&format!("{}/v3", server.uri())).unwrap(),
        token: SecretString::from("stale".to_owned()),
        project: ProjectScope::Id("p1".into()),
    };
    let result = Session::connect(
        &credentials,
        "eu-de",
        Interface::Public,
        &TransportConfig::default(),
    )
    .await;

    match result {
        Err(Error::Authentication { message }) => {
            assert!(message.contains("requires authentication"), "{message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

// ── Live resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn test_self_link_on_other_host_is_followed_and_memoized() {
    let (server, session) =
        setup(|uri| vec![entry("nat", format!("{uri}/v2/{{project_id}}"))]).await;
    let port = Url::parse(&server.uri()).unwrap().port().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versions": [{
                "id": "v2.0",
                "status": "CURRENT",
                "links": [{ "rel": "self", "href": format!("http://localhost:{port}/v2/") }]
            }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let binding = nat::service()
        .create_proxy(&session, &ServiceOptions::default())
        .await
        .unwrap();

    let expected = format!("http://localhost:{port}/v2/p1/");
    let ProxyBinding::Bound { endpoint, version, .. } = &binding else {
        panic!("expected a bound proxy");
    };
    assert_eq!(endpoint.as_str(), expected);
    assert_eq!(*version, ApiVersion::major(2));
    assert_eq!(
        session.endpoint_override("nat").unwrap().as_str(),
        format!("http://localhost:{port}/v2/p1")
    );

    // A second resolution starts from the memoized override; its self link
    // now matches, so nothing is rebased.
    let again = nat::service()
        .create_proxy(&session, &ServiceOptions::default())
        .await
        .unwrap();
    assert_eq!(again.client().endpoint().as_str(), expected);
}

#[tokio::test]
async fn test_version_discovered_from_root_document() {
    let (server, session) = setup(|uri| vec![entry("modelarts", format!("{uri}/v1/{{project_id}}"))]).await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versions": [
                { "id": "v1", "status": "SUPPORTED", "links": [{ "rel": "self", "href": format!("{uri}/v1/") }] },
                { "id": "v2", "status": "CURRENT", "links": [{ "rel": "self", "href": format!("{uri}/v2/") }] }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/training-job-searches"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [{
                "kind": "job",
                "metadata": { "id": "job-1", "name": "resnet", "create_time": 1_700_000_000_000_i64 },
                "status": { "phase": "Running" }
            }]
        })))
        .mount(&server)
        .await;

    let binding = modelarts::service()
        .create_proxy(&session, &ServiceOptions::default())
        .await
        .unwrap();

    let proxy = binding.proxy().unwrap();
    assert!(matches!(proxy, ModelArtsProxy::V2(_)));
    assert_eq!(binding.client().endpoint().as_str(), format!("{uri}/"));

    let jobs = proxy.list_training_jobs(&TrainingJobQuery::default()).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "job-1");
    assert_eq!(jobs[0].status, "Running");
}

#[tokio::test]
async fn test_pinned_v1_lists_through_job_collection() {
    let (server, session) = setup(|_| Vec::new()).await;

    Mock::given(method("GET"))
        .and(path("/v1/p1/training-jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_success": true,
            "job_total_count": 1,
            "jobs": [{ "job_id": 10, "job_name": "legacy", "status": 8 }]
        })))
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: Some("1".into()),
        endpoint_override: Some(server.uri()),
    };
    let binding = modelarts::service().create_proxy(&session, &options).await.unwrap();

    let jobs = binding
        .proxy()
        .unwrap()
        .list_training_jobs(&TrainingJobQuery::default())
        .await
        .unwrap();
    assert_eq!(jobs[0].id, "10");
    assert_eq!(jobs[0].name, "legacy");
}

#[tokio::test]
async fn test_v1_list_sends_filters_and_page_size() {
    let (server, session) = setup(|_| Vec::new()).await;

    Mock::given(method("GET"))
        .and(path("/v1/p1/training-jobs"))
        .and(query_param("status", "8"))
        .and(query_param("per_page", "20"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_success": true,
            "job_total_count": 21,
            "jobs": [{ "job_id": 30, "job_name": "late", "status": 8 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: Some("1".into()),
        endpoint_override: Some(server.uri()),
    };
    let binding = modelarts::service().create_proxy(&session, &options).await.unwrap();
    let query = TrainingJobQuery {
        filters: vec![("status".into(), "8".into())],
        offset: Some(20),
        limit: Some(20),
    };

    let jobs = binding.proxy().unwrap().list_training_jobs(&query).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "30");
}

#[tokio::test]
async fn test_v2_search_carries_filters() {
    let (server, session) = setup(|_| Vec::new()).await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/training-job-searches"))
        .and(body_partial_json(json!({
            "offset": 5,
            "limit": 10,
            "filters": [{ "key": "phase", "operator": "in", "value": ["Running"] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1,
            "items": [{
                "kind": "job",
                "metadata": { "id": "job-7", "name": "bert" },
                "status": { "phase": "Running" }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: Some("v2".into()),
        endpoint_override: Some(server.uri()),
    };
    let binding = modelarts::service().create_proxy(&session, &options).await.unwrap();
    let query = TrainingJobQuery {
        filters: vec![("phase".into(), "Running".into())],
        offset: Some(5),
        limit: Some(10),
    };

    let jobs = binding.proxy().unwrap().list_training_jobs(&query).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "job-7");
}

#[tokio::test]
async fn test_versioned_override_binds_the_version_it_names() {
    let (server, session) = setup(|_| Vec::new()).await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versions": [
                { "id": "v1", "status": "SUPPORTED", "links": [{ "rel": "self", "href": format!("{uri}/v1/") }] },
                { "id": "v2", "status": "CURRENT", "links": [{ "rel": "self", "href": format!("{uri}/v2/") }] }
            ]
        })))
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: None,
        endpoint_override: Some(format!("{uri}/v1/p1")),
    };
    let binding = modelarts::service().create_proxy(&session, &options).await.unwrap();

    assert_eq!(binding.version().map(|v| v.major), Some(1));
    assert!(matches!(binding.proxy().unwrap(), ModelArtsProxy::V1(_)));
    assert_eq!(binding.client().endpoint().as_str(), format!("{uri}/v1/p1/"));
}

#[tokio::test]
async fn test_same_origin_self_link_keeps_endpoint_path() {
    let (server, session) = setup(|_| Vec::new()).await;
    let uri = server.uri();

    // Same origin, different path: the configured path stays.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "versions": [{
                "id": "v2.0",
                "status": "CURRENT",
                "links": [{ "rel": "self", "href": format!("{uri}/gateway/v2/") }]
            }]
        })))
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: Some("v2".into()),
        endpoint_override: Some(format!("{uri}/v2/{{project_id}}")),
    };
    let binding = nat::service().create_proxy(&session, &options).await.unwrap();

    assert_eq!(binding.client().endpoint().as_str(), format!("{uri}/v2/p1/"));
    assert!(session.endpoint_override("nat").is_none());
}

#[tokio::test]
async fn test_degraded_binding_still_serves_raw_requests() {
    let (server, session) = setup(|_| Vec::new()).await;

    Mock::given(method("GET"))
        .and(path("/v9/p1/apigw/instances"))
        .and(header("X-Auth-Token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "instances": [] })))
        .mount(&server)
        .await;

    let options = ServiceOptions {
        api_version: Some("v9".into()),
        endpoint_override: Some(format!("{}/v9/{{project_id}}", server.uri())),
    };
    let binding = apig::service().create_proxy(&session, &options).await.unwrap();
    assert!(binding.is_degraded());

    let body = binding
        .client()
        .send_raw(reqwest::Method::GET, "apigw/instances", &[], None)
        .await
        .unwrap();
    assert_eq!(body, json!({ "instances": [] }));
}

// ── API Gateway ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_group_crud() {
    let (server, proxy) = apig_proxy().await;
    let base = "/v2/p1/apigw/instances/gw1/api-groups";

    Mock::given(method("POST"))
        .and(path(base))
        .and(body_partial_json(json!({ "name": "shop", "remark": "storefront" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "g1", "name": "shop", "remark": "storefront", "status": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(base))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1, "size": 1, "groups": [{ "id": "g1", "name": "shop" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{base}/g1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let created = proxy
        .create_api_group(
            "gw1",
            &ApiGroup {
                name: "shop".into(),
                remark: Some("storefront".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("g1"));
    assert_eq!(created.status, Some(1));

    let groups = proxy.list_api_groups("gw1", &[]).await.unwrap();
    assert_eq!(groups.len(), 1);

    proxy
        .delete_api_group("gw1", ResourceRef::Instance(&created))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_find_api_group_falls_back_to_name() {
    let (server, proxy) = apig_proxy().await;
    let base = "/v2/p1/apigw/instances/gw1/api-groups";

    Mock::given(method("GET"))
        .and(path(format!("{base}/shop")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error_code": "APIG.3001", "error_msg": "API group shop does not exist"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(base))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [{ "id": "g1", "name": "shop" }, { "id": "g2", "name": "blog" }]
        })))
        .mount(&server)
        .await;

    let found = proxy.find_api_group("gw1", "shop").await.unwrap().unwrap();
    assert_eq!(found.id.as_deref(), Some("g1"));
    assert!(proxy.find_api_group("gw1", "wiki").await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_api_posts_action() {
    let (server, proxy) = apig_proxy().await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/apigw/instances/gw1/apis/action"))
        .and(body_partial_json(json!({ "action": "online", "env_id": "env1", "api_id": "a1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "publish_id": "pub1", "api_id": "a1", "env_id": "env1", "publish_time": "2024-06-15T10:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let publication = proxy
        .publish_api("gw1", ResourceRef::Id("a1"), "env1", None)
        .await
        .unwrap();
    assert_eq!(publication.publish_id.as_deref(), Some("pub1"));
}

#[tokio::test]
async fn test_batch_unbind_reports_failures() {
    let (server, proxy) = apig_proxy().await;

    Mock::given(method("PUT"))
        .and(path("/v2/p1/apigw/instances/gw1/throttle-bindings"))
        .and(query_param("action", "delete"))
        .and(body_partial_json(json!({ "throttle_bindings": ["b1", "b2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success_throttles": [{ "id": "b1" }],
            "failure": [{ "bind_id": "b2", "error_code": "APIG.3010", "error_msg": "not found" }]
        })))
        .mount(&server)
        .await;

    let result = proxy
        .unbind_throttling_policies("gw1", &["b1".to_owned(), "b2".to_owned()])
        .await
        .unwrap();
    assert_eq!(result.success_throttles.len(), 1);
    assert_eq!(result.failure.len(), 1);
}

// ── Batch envelopes ─────────────────────────────────────────────────

#[tokio::test]
async fn test_signature_binding_envelope_populates_entries() {
    let (server, proxy) = apig_proxy().await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/apigw/instances/gw1/sign-bindings"))
        .and(body_partial_json(json!({ "sign_id": "s1", "publish_ids": ["pub1", "pub2"] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "bindings": [
                { "id": "b1", "sign_id": "s1", "publish_id": "pub1", "api_id": "a1" },
                { "id": "b2", "sign_id": "s1", "publish_id": "pub2", "api_id": "a2" }
            ]
        })))
        .mount(&server)
        .await;

    let binding = proxy
        .bind_signature(
            "gw1",
            ResourceRef::Id("s1"),
            vec!["pub1".into(), "pub2".into()],
        )
        .await
        .unwrap();

    assert_eq!(binding.sign_id, "s1");
    assert_eq!(binding.publish_ids, vec!["pub1", "pub2"]);
    assert_eq!(binding.bindings.len(), 2);
    assert_eq!(binding.bindings[1].id.as_deref(), Some("b2"));
}

#[tokio::test]
async fn test_throttle_binding_without_envelope_key_is_empty() {
    let (server, proxy) = apig_proxy().await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/apigw/instances/gw1/throttle-bindings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let binding = proxy
        .bind_throttling_policy("gw1", ResourceRef::Id("t1"), vec!["pub1".into()])
        .await
        .unwrap();

    assert_eq!(binding.strategy_id, "t1");
    assert!(binding.throttle_applys.is_empty());
}

#[tokio::test]
async fn test_envelope_error_is_raised_before_parsing() {
    let (server, proxy) = apig_proxy().await;

    Mock::given(method("POST"))
        .and(path("/v2/p1/apigw/instances/gw1/sign-bindings"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("X-Request-Id", "req-42")
                .set_body_json(json!({
                    "error_code": "APIG.2012", "error_msg": "Invalid parameter value: publish_ids"
                })),
        )
        .mount(&server)
        .await;

    let err = proxy
        .bind_signature("gw1", ResourceRef::Id("s1"), vec!["bogus".into()])
        .await
        .unwrap_err();

    match err {
        Error::Http {
            status,
            code,
            request_id,
            ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(code.as_deref(), Some("APIG.2012"));
            assert_eq!(request_id.as_deref(), Some("req-42"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

// ── Load balancer ───────────────────────────────────────────────────

#[tokio::test]
async fn test_load_balancer_bodies_are_wrapped() {
    let (server, session) = setup(|_| Vec::new()).await;
    let proxy = VlbProxy::new(session.json_client(endpoint(&server, "v3/p1")));

    Mock::given(method("POST"))
        .and(path("/v3/p1/elb/loadbalancers"))
        .and(body_partial_json(json!({
            "loadbalancer": { "name": "web", "vip_subnet_cidr_id": "sub1" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "loadbalancer": { "id": "lb1", "name": "web", "provisioning_status": "ACTIVE" },
            "request_id": "r1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/p1/elb/loadbalancers"))
        .and(query_param("name", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loadbalancers": [{ "id": "lb1", "name": "web" }],
            "page_info": { "current_count": 1 }
        })))
        .mount(&server)
        .await;

    let created = proxy
        .create_load_balancer(&LoadBalancer {
            name: Some("web".into()),
            vip_subnet_cidr_id: Some("sub1".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.id.as_deref(), Some("lb1"));
    assert_eq!(created.provisioning_status.as_deref(), Some("ACTIVE"));

    let listed = proxy
        .list_load_balancers(&[("name", "web".to_owned())])
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_unsaved_instance_cannot_be_deleted() {
    let (_server, session) = setup(|_| Vec::new()).await;
    let proxy = VlbProxy::new(session.json_client(Url::parse("http://127.0.0.1:1/v3/p1").unwrap()));

    let err = proxy
        .delete_load_balancer(ResourceRef::Instance(&LoadBalancer::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingId { .. }));
}

// ── NAT gateway ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_nat_gateway_update_and_not_found() {
    let (server, session) = setup(|_| Vec::new()).await;
    let proxy = cloudext_api::services::nat::v2::NatProxy::new(
        session.json_client(endpoint(&server, "v2/p1")),
    );

    Mock::given(method("PUT"))
        .and(path("/v2/p1/nat_gateways/n1"))
        .and(body_partial_json(json!({ "nat_gateway": { "spec": "2" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nat_gateway": { "id": "n1", "name": "edge", "spec": "2", "status": "ACTIVE" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/p1/nat_gateways/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "NeutronError": { "message": "NAT gateway missing could not be found", "type": "NatGatewayNotFound" }
        })))
        .mount(&server)
        .await;

    let updated = proxy
        .update_gateway(
            ResourceRef::Id("n1"),
            &json!({ "spec": "2" }),
        )
        .await
        .unwrap();
    assert_eq!(updated.spec.as_deref(), Some("2"));

    let err = proxy
        .get_gateway(ResourceRef::Id("missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.api_error_code(), Some("NatGatewayNotFound"));
}
