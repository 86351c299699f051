// Batch-creation envelopes
//
// Some create calls bind one policy to many APIs at once. The response is an
// envelope with one result per item under a named key:
//
//   POST .../throttle-bindings  ->  {"throttle_applys": [{...}, {...}]}
//
// The primary record is the request body overlaid with whatever top-level
// fields the response carries; the per-item results are attached as typed
// entries. Errors are returned before anything is parsed.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::Error;
use crate::resource::{Resource, UriParams, from_value};

/// A resource whose create response is a list envelope.
pub trait EnvelopeResource: Resource {
    type Item: DeserializeOwned;

    /// Key of the per-item result list.
    const ENVELOPE_KEY: &'static str;

    fn attach(&mut self, items: Vec<Self::Item>);
}

impl ServiceClient {
    /// `POST {base}`, then unpack `R::ENVELOPE_KEY` into `R::attach`.
    pub async fn create_with_envelope<R: EnvelopeResource>(
        &self,
        params: &UriParams,
        body: &R,
    ) -> Result<R, Error> {
        let path = self.render_path(R::BASE_PATH, params)?;
        let request = serde_json::to_value(body).map_err(|e| Error::Deserialization {
            message: format!("failed to serialize {}: {e}", R::NAME),
            body: String::new(),
        })?;

        let mut response: Value = self.post(&path, &request).await?;
        let items = take_items::<R::Item>(&mut response, R::ENVELOPE_KEY)?;
        debug!(
            resource = R::NAME,
            key = R::ENVELOPE_KEY,
            items = items.len(),
            "unpacked batch envelope"
        );

        let mut record: R = from_value(merge(request, response))?;
        record.attach(items);
        Ok(record)
    }
}

/// Remove the envelope list; a missing or null key is an empty list.
fn take_items<T: DeserializeOwned>(response: &mut Value, key: &str) -> Result<Vec<T>, Error> {
    let raw = response
        .as_object_mut()
        .and_then(|obj| obj.remove(key))
        .unwrap_or(Value::Null);
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(from_value).collect(),
        other => Err(Error::Deserialization {
            message: format!("expected a list under '{key}'"),
            body: other.to_string(),
        }),
    }
}

/// Response fields win over the request body.
fn merge(mut base: Value, overlay: Value) -> Value {
    if let (Some(base_obj), Value::Object(overlay_obj)) = (base.as_object_mut(), overlay) {
        base_obj.extend(overlay_obj);
    }
    base
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_is_empty() {
        let mut response = json!({ "total": 0 });
        let items: Vec<Value> = take_items(&mut response, "bindings").unwrap();
        assert!(items.is_empty());

        let mut response = json!({ "bindings": null });
        let items: Vec<Value> = take_items(&mut response, "bindings").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn key_is_removed_from_response() {
        let mut response = json!({ "bindings": [{ "id": "b1" }], "total": 1 });
        let items: Vec<Value> = take_items(&mut response, "bindings").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(response, json!({ "total": 1 }));
    }

    #[test]
    fn non_list_envelope_is_an_error() {
        let mut response = json!({ "bindings": "oops" });
        assert!(take_items::<Value>(&mut response, "bindings").is_err());
    }

    #[test]
    fn merge_prefers_response() {
        let merged = merge(
            json!({ "sign_id": "s1", "publish_ids": ["p1"] }),
            json!({ "sign_id": "s1-server", "total": 1 }),
        );
        assert_eq!(
            merged,
            json!({ "sign_id": "s1-server", "publish_ids": ["p1"], "total": 1 })
        );
    }
}
