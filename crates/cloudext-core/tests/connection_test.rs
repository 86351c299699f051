#![allow(clippy::unwrap_used)]
// Integration tests for `Connection` against a wiremock identity service
// and service endpoints.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cloudext_core::{
    AuthCredentials, Connection, ConnectionConfig, CoreError, Method, ProjectScope,
    ResolutionStatus, ServiceKind, ServiceOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn mount_identity(server: &MockServer, expected_calls: u64) {
    let uri = server.uri();
    let endpoint = |url: String| {
        json!([{ "interface": "public", "region": "eu-de", "region_id": "eu-de", "url": url }])
    };

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("X-Subject-Token", "tok")
                .set_body_json(json!({
                    "token": {
                        "project": { "id": "p1" },
                        "catalog": [
                            { "type": "nat", "endpoints": endpoint(format!("{uri}/v2/{{project_id}}")) },
                            { "type": "vpc", "endpoints": endpoint(format!("{uri}/v1/{{project_id}}")) }
                        ]
                    }
                })),
        )
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn config(server: &MockServer) -> ConnectionConfig {
    ConnectionConfig::new(
        Url::parse(&format!("{}/v3", server.uri())).unwrap(),
        AuthCredentials::Password {
            username: "alice".into(),
            password: SecretString::from("s3cret".to_owned()),
            user_domain: "acme".into(),
        },
        ProjectScope::Id("p1".into()),
        "eu-de",
    )
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_is_shared_across_services() {
    let server = MockServer::start().await;
    mount_identity(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v2/p1/nat_gateways"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "nat_gateways": [{ "id": "n1", "name": "edge", "status": "ACTIVE" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v3/p1/elb/loadbalancers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "loadbalancers": [] })))
        .mount(&server)
        .await;

    let conn = Connection::new(config(&server));
    let gateways = conn.nat().await.unwrap().list_gateways(&[]).await.unwrap();
    assert_eq!(gateways.len(), 1);
    assert_eq!(gateways[0].name.as_deref(), Some("edge"));

    let lbs = conn
        .vlb()
        .await
        .unwrap()
        .list_load_balancers(&[])
        .await
        .unwrap();
    assert!(lbs.is_empty());

    // Bindings are cached: same endpoint, no further identity calls.
    let a = conn.nat_binding().await.unwrap().client().endpoint().clone();
    let b = conn.nat_binding().await.unwrap().client().endpoint().clone();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_resolution_report_covers_every_service() {
    let server = MockServer::start().await;
    mount_identity(&server, 1).await;

    let mut cfg = config(&server);
    cfg.services.insert(
        "modelarts".into(),
        ServiceOptions {
            api_version: Some("v9".into()),
            endpoint_override: Some(format!("{}/v9", server.uri())),
        },
    );
    let conn = Connection::new(cfg);

    let report = conn.resolution_report().await.unwrap();
    let status = |kind: ServiceKind| {
        report
            .iter()
            .find(|r| r.service == kind)
            .map(|r| r.status)
            .unwrap()
    };

    assert_eq!(report.len(), 4);
    assert_eq!(status(ServiceKind::Nat), ResolutionStatus::Bound);
    assert_eq!(status(ServiceKind::Vlb), ResolutionStatus::Bound);
    assert_eq!(status(ServiceKind::Modelarts), ResolutionStatus::Degraded);
    assert_eq!(status(ServiceKind::Apig), ResolutionStatus::Unavailable);

    let apig = report.iter().find(|r| r.service == ServiceKind::Apig).unwrap();
    assert!(apig.reason.as_deref().unwrap().contains("apig"));

    let vlb = report.iter().find(|r| r.service == ServiceKind::Vlb).unwrap();
    assert_eq!(
        vlb.endpoint.as_ref().unwrap().as_str(),
        format!("{}/v3/p1/", server.uri())
    );
    assert_eq!(vlb.version.unwrap().to_string(), "v3");
}

#[tokio::test]
async fn test_degraded_service_refuses_typed_access_but_serves_raw() {
    let server = MockServer::start().await;
    mount_identity(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/v9/whatever"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .mount(&server)
        .await;

    let mut cfg = config(&server);
    cfg.services.insert(
        "modelarts".into(),
        ServiceOptions {
            api_version: Some("9".into()),
            endpoint_override: Some(format!("{}/v9", server.uri())),
        },
    );
    let conn = Connection::new(cfg);

    let err = conn.modelarts().await.unwrap_err();
    assert!(
        matches!(err, CoreError::Degraded { ref service, .. } if service == "modelarts"),
        "got {err:?}"
    );

    let raw = conn.raw_client(ServiceKind::Modelarts).await.unwrap();
    assert!(!raw.has_json_content_type());
    let body = raw
        .send_raw(Method::GET, "whatever", &[], None)
        .await
        .unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn test_rejected_credentials_fail_the_report() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/auth/tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "Invalid credentials" }
        })))
        .mount(&server)
        .await;

    let conn = Connection::new(config(&server));
    let err = conn.resolution_report().await.unwrap_err();
    assert!(
        matches!(err, CoreError::AuthenticationFailed { ref message } if message == "Invalid credentials"),
        "got {err:?}"
    );
}
