// Service HTTP client
//
// One `ServiceClient` is bound to one service endpoint. It injects the
// session token, the client's fixed headers, and turns non-2xx responses
// into `Error::Http` with the decoded server error payload. Resource CRUD
// verbs (resource.rs) and envelope unpacking (envelope.rs) are inherent
// methods built on the verbs here.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::session::Session;

pub(crate) const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";
const REQUEST_ID_HEADERS: &[&str] = &["X-Request-Id", "X-Openstack-Request-Id"];

/// HTTP client bound to one service endpoint.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    session: Arc<Session>,
    endpoint: Url,
    headers: HeaderMap,
}

impl ServiceClient {
    pub(crate) fn new(session: Arc<Session>, mut endpoint: Url, headers: HeaderMap) -> Self {
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }
        Self {
            session,
            endpoint,
            headers,
        }
    }

    /// The endpoint every relative path is joined onto (always ends in `/`).
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Fixed headers sent with every request.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn has_json_content_type(&self) -> bool {
        self.headers
            .get(CONTENT_TYPE)
            .is_some_and(|v| v.as_bytes() == b"application/json")
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"elb/loadbalancers"`) onto the endpoint.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.endpoint.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        Ok(self
            .session
            .http()
            .request(method, url)
            .headers(self.headers.clone())
            .header(AUTH_TOKEN_HEADER, self.session.token().expose_secret()))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self.request(Method::GET, path)?.send().await?;
        handle_response(resp).await
    }

    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!(?params, "query");
        let resp = self.request(Method::GET, path)?.query(params).send().await?;
        handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.request(Method::POST, path)?.json(body).send().await?;
        handle_response(resp).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.request(Method::PUT, path)?.json(body).send().await?;
        handle_response(resp).await
    }

    pub async fn put_with_params<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        let resp = self
            .request(Method::PUT, path)?
            .query(params)
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let resp = self.request(Method::DELETE, path)?.send().await?;
        handle_empty(resp).await
    }

    /// Issue any request and return the JSON body (`Null` when empty).
    ///
    /// This is the whole surface of a degraded binding.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let mut builder = self.request(method, path)?.query(params);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(parse_error(status, resp).await);
        }
        let text = resp.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        decode(&text)
    }
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        return Err(parse_error(status, resp).await);
    }
    let body = resp.text().await?;
    decode(&body)
}

async fn handle_empty(resp: Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

pub(crate) async fn parse_error(status: StatusCode, resp: Response) -> Error {
    let request_id = REQUEST_ID_HEADERS
        .iter()
        .find_map(|h| resp.headers().get(*h))
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let raw = resp.text().await.unwrap_or_default();
    let body = serde_json::from_str::<Value>(&raw).ok();
    let (message, code) = body.as_ref().map(server_error_fields).unwrap_or_default();

    let message = message.unwrap_or_else(|| {
        if raw.is_empty() {
            status.to_string()
        } else {
            raw.chars().take(200).collect()
        }
    });

    Error::Http {
        status: status.as_u16(),
        message,
        code,
        request_id,
        body,
    }
}

/// Pull `(message, code)` out of the error shapes the services use:
/// `{"error_msg", "error_code"}`, `{"message", "code"}`, and single-key
/// wrappers such as `{"error": {...}}` or `{"NeutronError": {...}}`.
fn server_error_fields(body: &Value) -> (Option<String>, Option<String>) {
    let Some(obj) = body.as_object() else {
        return (None, None);
    };

    let text = |keys: &[&str]| {
        keys.iter().find_map(|k| match obj.get(*k) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
    };

    let message = text(&["error_msg", "message", "errorMsg", "faultstring"]);
    let code = text(&["error_code", "code", "errorCode", "type"]);
    if message.is_some() {
        return (message, code);
    }

    if obj.len() == 1 {
        if let Some(inner) = obj.values().next().filter(|v| v.is_object()) {
            return server_error_fields(inner);
        }
    }
    (None, code)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_error_shape() {
        let (msg, code) = server_error_fields(&json!({
            "error_code": "APIG.3002",
            "error_msg": "API group not found",
            "request_id": "abc"
        }));
        assert_eq!(msg.as_deref(), Some("API group not found"));
        assert_eq!(code.as_deref(), Some("APIG.3002"));
    }

    #[test]
    fn wrapped_error_shape() {
        let (msg, code) = server_error_fields(&json!({
            "NeutronError": { "message": "Router not found", "type": "RouterNotFound" }
        }));
        assert_eq!(msg.as_deref(), Some("Router not found"));
        assert_eq!(code.as_deref(), Some("RouterNotFound"));

        let (msg, code) = server_error_fields(&json!({
            "error": { "message": "quota exceeded", "code": 413 }
        }));
        assert_eq!(msg.as_deref(), Some("quota exceeded"));
        assert_eq!(code.as_deref(), Some("413"));
    }

    #[test]
    fn unknown_shape_yields_nothing() {
        assert_eq!(server_error_fields(&json!(["x"])), (None, None));
        assert_eq!(server_error_fields(&json!({"a": 1, "b": 2})), (None, None));
    }

    #[test]
    fn decode_reports_preview() {
        let err = decode::<Value>("not json").unwrap_err();
        assert!(matches!(err, Error::Deserialization { ref body, .. } if body == "not json"));
    }
}
