// Generic resource CRUD
//
// A `Resource` declares where it lives (`BASE_PATH` with `{placeholder}` URI
// parameters) and how its JSON is wrapped. The single-request CRUD verbs here
// are what every service proxy forwards to. No pagination: `list_resources`
// issues one request and passes query parameters through.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::ServiceClient;
use crate::error::Error;

/// A REST entity with a flat JSON representation.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Human-readable name used in errors ("load balancer").
    const NAME: &'static str;
    /// Path relative to the service endpoint, e.g. `apigw/instances/{gateway_id}/apis`.
    const BASE_PATH: &'static str;
    /// Wrapper key of single-object bodies (`{"listener": {...}}`).
    const RESOURCE_KEY: Option<&'static str> = None;
    /// Wrapper key of list bodies (`{"listeners": [...]}`).
    const RESOURCES_KEY: Option<&'static str> = None;

    /// Server-assigned identifier, once known.
    fn id(&self) -> Option<String>;
}

/// Either an identifier or an already-fetched instance.
#[derive(Debug)]
pub enum ResourceRef<'a, R> {
    Id(&'a str),
    Instance(&'a R),
}

impl<R> Clone for ResourceRef<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceRef<'_, R> {}

impl<R: Resource> ResourceRef<'_, R> {
    /// The identifier to put in the URL.
    pub fn resolve(&self) -> Result<String, Error> {
        match self {
            Self::Id(id) => Ok((*id).to_owned()),
            Self::Instance(r) => r.id().ok_or(Error::MissingId { resource: R::NAME }),
        }
    }
}

impl<'a, R> From<&'a str> for ResourceRef<'a, R> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a, R> From<&'a String> for ResourceRef<'a, R> {
    fn from(id: &'a String) -> Self {
        Self::Id(id.as_str())
    }
}

/// Values for the `{placeholder}` segments of a path template.
#[derive(Debug, Clone, Default)]
pub struct UriParams {
    values: Vec<(&'static str, String)>,
}

impl UriParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.values.push((name, value.into()));
        self
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Substitute every `{name}` in `template`.
    ///
    /// `project_id` falls back to `default_project` when not set explicitly.
    pub fn render(&self, template: &str, default_project: Option<&str>) -> Result<String, Error> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| Error::MissingUriParam {
                name: after.to_owned(),
                template: template.to_owned(),
            })?;
            let name = &after[..end];
            let value = self
                .get(name)
                .or(if name == "project_id" {
                    default_project
                } else {
                    None
                })
                .ok_or_else(|| Error::MissingUriParam {
                    name: name.to_owned(),
                    template: template.to_owned(),
                })?;
            out.push_str(value);
            rest = &after[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

// ── Body wrapping ────────────────────────────────────────────────────

pub(crate) fn wrap_body<R: Resource, B: Serialize + ?Sized>(body: &B) -> Result<Value, Error> {
    let value = serde_json::to_value(body).map_err(|e| Error::Deserialization {
        message: format!("failed to serialize {}: {e}", R::NAME),
        body: String::new(),
    })?;
    Ok(match R::RESOURCE_KEY {
        Some(key) => {
            let mut map = Map::new();
            map.insert(key.to_owned(), value);
            Value::Object(map)
        }
        None => value,
    })
}

pub(crate) fn unwrap_one<R: Resource>(mut value: Value) -> Result<R, Error> {
    if let Some(key) = R::RESOURCE_KEY {
        if let Some(inner) = value.get_mut(key).map(Value::take) {
            value = inner;
        }
    }
    from_value(value)
}

fn unwrap_many<R: Resource>(mut value: Value) -> Result<Vec<R>, Error> {
    if let Some(key) = R::RESOURCES_KEY {
        value = value.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    }
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(from_value).collect(),
        other => Err(Error::Deserialization {
            message: format!("expected a list of {}", R::NAME),
            body: other.to_string(),
        }),
    }
}

pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, Error> {
    serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: value.to_string(),
    })
}

// ── CRUD verbs ───────────────────────────────────────────────────────

impl ServiceClient {
    /// Render a path template against this client's project.
    pub fn render_path(&self, template: &str, params: &UriParams) -> Result<String, Error> {
        params.render(template, self.session().project_id())
    }

    fn item_path<R: Resource>(
        &self,
        params: &UriParams,
        id: ResourceRef<'_, R>,
    ) -> Result<String, Error> {
        let base = self.render_path(R::BASE_PATH, params)?;
        Ok(format!("{base}/{}", id.resolve()?))
    }

    /// `POST {base}` and return the created resource.
    pub async fn create_resource<R: Resource, B: Serialize + Sync + ?Sized>(
        &self,
        params: &UriParams,
        body: &B,
    ) -> Result<R, Error> {
        let path = self.render_path(R::BASE_PATH, params)?;
        debug!(resource = R::NAME, "create");
        let value: Value = self.post(&path, &wrap_body::<R, B>(body)?).await?;
        unwrap_one(value)
    }

    /// `GET {base}/{id}`.
    pub async fn get_resource<R: Resource>(
        &self,
        params: &UriParams,
        id: ResourceRef<'_, R>,
    ) -> Result<R, Error> {
        let path = self.item_path(params, id)?;
        let value: Value = self.get(&path).await?;
        unwrap_one(value)
    }

    /// `GET {base}?query`: one page, as the server returns it.
    pub async fn list_resources<R: Resource>(
        &self,
        params: &UriParams,
        query: &[(&str, String)],
    ) -> Result<Vec<R>, Error> {
        let path = self.render_path(R::BASE_PATH, params)?;
        let value: Value = self.get_with_params(&path, query).await?;
        unwrap_many(value)
    }

    /// `PUT {base}/{id}` with a partial body.
    pub async fn update_resource<R: Resource, B: Serialize + Sync + ?Sized>(
        &self,
        params: &UriParams,
        id: ResourceRef<'_, R>,
        body: &B,
    ) -> Result<R, Error> {
        let path = self.item_path(params, id)?;
        let value: Value = self.put(&path, &wrap_body::<R, B>(body)?).await?;
        unwrap_one(value)
    }

    /// `DELETE {base}/{id}`.
    pub async fn delete_resource<R: Resource>(
        &self,
        params: &UriParams,
        id: ResourceRef<'_, R>,
    ) -> Result<(), Error> {
        let path = self.item_path(params, id)?;
        self.delete(&path).await
    }

    /// Find a resource by id, falling back to a name match in the list.
    pub async fn find_resource<R: Resource>(
        &self,
        params: &UriParams,
        name_or_id: &str,
        name_of: fn(&R) -> Option<&str>,
    ) -> Result<Option<R>, Error> {
        match self
            .get_resource::<R>(params, ResourceRef::Id(name_or_id))
            .await
        {
            Ok(found) => return Ok(Some(found)),
            Err(e) if e.is_not_found() || e.status() == Some(400) => {}
            Err(e) => return Err(e),
        }
        let all: Vec<R> = self.list_resources(params, &[]).await?;
        Ok(all.into_iter().find(|r| name_of(r) == Some(name_or_id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Widget {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        name: String,
    }

    impl Resource for Widget {
        const NAME: &'static str = "widget";
        const BASE_PATH: &'static str = "projects/{project_id}/widgets";
        const RESOURCE_KEY: Option<&'static str> = Some("widget");
        const RESOURCES_KEY: Option<&'static str> = Some("widgets");

        fn id(&self) -> Option<String> {
            self.id.clone()
        }
    }

    #[test]
    fn render_fills_params_and_project() {
        let params = UriParams::new().with("gateway_id", "gw1");
        let out = params
            .render("v2/{project_id}/apigw/instances/{gateway_id}/apis", Some("p1"))
            .unwrap();
        assert_eq!(out, "v2/p1/apigw/instances/gw1/apis");
    }

    #[test]
    fn render_reports_missing_param() {
        let err = UriParams::new()
            .render("apigw/instances/{gateway_id}/apis", None)
            .unwrap_err();
        assert!(matches!(err, Error::MissingUriParam { ref name, .. } if name == "gateway_id"));
    }

    #[test]
    fn explicit_project_beats_default() {
        let params = UriParams::new().with("project_id", "other");
        assert_eq!(params.render("{project_id}/x", Some("p1")).unwrap(), "other/x");
    }

    #[test]
    fn resource_ref_resolution() {
        let w = Widget {
            id: Some("w1".into()),
            name: "a".into(),
        };
        assert_eq!(ResourceRef::Instance(&w).resolve().unwrap(), "w1");
        assert_eq!(ResourceRef::<Widget>::from("w2").resolve().unwrap(), "w2");

        let unsaved = Widget {
            id: None,
            name: "b".into(),
        };
        let err = ResourceRef::Instance(&unsaved).resolve().unwrap_err();
        assert!(matches!(err, Error::MissingId { resource: "widget" }));
    }

    #[test]
    fn wrapping_uses_resource_keys() {
        let w = Widget {
            id: None,
            name: "a".into(),
        };
        assert_eq!(
            wrap_body::<Widget, _>(&w).unwrap(),
            json!({ "widget": { "name": "a" } })
        );

        let one: Widget = unwrap_one(json!({ "widget": { "id": "w1", "name": "a" } })).unwrap();
        assert_eq!(one.id.as_deref(), Some("w1"));

        let many: Vec<Widget> =
            unwrap_many(json!({ "widgets": [{ "name": "a" }, { "name": "b" }], "count": 2 }))
                .unwrap();
        assert_eq!(many.len(), 2);

        let none: Vec<Widget> = unwrap_many(json!({ "count": 0 })).unwrap();
        assert!(none.is_empty());
    }
}
