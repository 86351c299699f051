// ModelArts training jobs
//
// Two API generations are served side by side. Which one a connection gets
// is decided at resolution time; `ModelArtsProxy` wraps either and exposes
// a version-neutral surface built on `TrainingJobSpec` / `TrainingJobSummary`.

pub mod v1;
pub mod v2;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::client::ServiceClient;
use crate::discovery::ApiVersion;
use crate::error::Error;
use crate::proxy::{Proxy, ServiceDescriptor, ServiceProxy, SupportedVersions};
use crate::resource::ResourceRef;

pub const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    service_type: "modelarts",
    base_service: "modelarts",
    target_service: "modelarts",
    endpoint_path: Some(""),
};

pub fn service() -> ServiceProxy<ModelArtsProxy> {
    ServiceProxy::new(
        DESCRIPTOR,
        SupportedVersions::new()
            .with(ApiVersion::major(1), ModelArtsProxy::v1)
            .with(ApiVersion::major(2), ModelArtsProxy::v2),
    )
}

/// A training job request, independent of API version.
#[derive(Debug, Clone, Default)]
pub struct TrainingJobSpec {
    pub name: String,
    pub description: Option<String>,
    /// Resource flavor; numeric spec id on v1.
    pub flavor: String,
    pub node_count: i32,
    pub code_dir: Option<String>,
    pub boot_file: Option<String>,
    /// Engine name on v2, numeric engine id on v1.
    pub engine: Option<String>,
    pub engine_version: Option<String>,
    pub image_url: Option<String>,
    pub command: Option<String>,
    pub data_url: Option<String>,
    pub train_url: Option<String>,
    pub parameters: Vec<(String, String)>,
}

/// List filters and paging, independent of API version.
///
/// v1 sends filters as query parameters and pages with `per_page`/`page`;
/// v2 turns each filter into an `in` condition of the search body.
#[derive(Debug, Clone, Default)]
pub struct TrainingJobQuery {
    pub filters: Vec<(String, String)>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// v2 search page size when no limit is given.
const DEFAULT_SEARCH_LIMIT: i64 = 50;

/// One row of training-job output, independent of API version.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingJobSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    pub created: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ModelArtsProxy {
    V1(v1::ModelArtsV1Proxy),
    V2(v2::ModelArtsV2Proxy),
}

impl Proxy for ModelArtsProxy {
    fn client(&self) -> &ServiceClient {
        match self {
            Self::V1(p) => p.client(),
            Self::V2(p) => p.client(),
        }
    }
}

impl ModelArtsProxy {
    pub fn v1(client: ServiceClient) -> Self {
        Self::V1(v1::ModelArtsV1Proxy::new(client))
    }

    pub fn v2(client: ServiceClient) -> Self {
        Self::V2(v2::ModelArtsV2Proxy::new(client))
    }

    pub fn api_version(&self) -> ApiVersion {
        match self {
            Self::V1(_) => ApiVersion::major(1),
            Self::V2(_) => ApiVersion::major(2),
        }
    }

    pub async fn list_training_jobs(
        &self,
        query: &TrainingJobQuery,
    ) -> Result<Vec<TrainingJobSummary>, Error> {
        match self {
            Self::V1(p) => Ok(p
                .list_training_jobs(&v1_query(query)?)
                .await?
                .into_iter()
                .map(summarize_v1)
                .collect()),
            Self::V2(p) => {
                Ok(p.list_training_jobs(&v2_search(query))
                    .await?
                    .into_iter()
                    .map(summarize_v2)
                    .collect())
            }
        }
    }

    pub async fn get_training_job(&self, id: &str) -> Result<TrainingJobSummary, Error> {
        match self {
            Self::V1(p) => {
                let job = p.get_training_job(ResourceRef::Id(id)).await?;
                let latest = job.versions.first();
                Ok(TrainingJobSummary {
                    id: job.job_id.map_or_else(|| id.to_owned(), |j| j.to_string()),
                    name: job.job_name.unwrap_or_default(),
                    status: latest
                        .and_then(|v| v.status)
                        .map_or("unknown", v1::models::status_name)
                        .to_owned(),
                    created: latest
                        .and_then(|v| v.create_time)
                        .and_then(DateTime::from_timestamp_millis),
                    description: job.job_desc,
                })
            }
            Self::V2(p) => Ok(summarize_v2(p.get_training_job(ResourceRef::Id(id)).await?)),
        }
    }

    pub async fn create_training_job(
        &self,
        spec: &TrainingJobSpec,
    ) -> Result<TrainingJobSummary, Error> {
        match self {
            Self::V1(p) => Ok(summarize_v1(p.create_training_job(&v1_job(spec)?).await?)),
            Self::V2(p) => Ok(summarize_v2(p.create_training_job(&v2_job(spec)).await?)),
        }
    }

    pub async fn delete_training_job(&self, id: &str) -> Result<(), Error> {
        match self {
            Self::V1(p) => p.delete_training_job(ResourceRef::Id(id)).await,
            Self::V2(p) => p.delete_training_job(ResourceRef::Id(id)).await,
        }
    }
}

// ── Version mapping ──────────────────────────────────────────────────

fn parse_numeric(field: &str, value: &str) -> Result<i64, Error> {
    value.parse().map_err(|_| Error::InvalidArgument {
        message: format!("{field} must be numeric for the v1 API, got '{value}'"),
    })
}

fn v1_query(query: &TrainingJobQuery) -> Result<Vec<(&str, String)>, Error> {
    let mut pairs: Vec<(&str, String)> = query
        .filters
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    match (query.limit, query.offset) {
        (Some(limit), offset) if limit > 0 => {
            pairs.push(("per_page", limit.to_string()));
            pairs.push(("page", (offset.unwrap_or(0) / limit + 1).to_string()));
        }
        (Some(_), _) => {
            return Err(Error::InvalidArgument {
                message: "limit must be positive".into(),
            });
        }
        (None, Some(_)) => {
            return Err(Error::InvalidArgument {
                message: "the v1 API pages by page size; set a limit with the offset".into(),
            });
        }
        (None, None) => {}
    }
    Ok(pairs)
}

fn v2_search(query: &TrainingJobQuery) -> v2::models::JobSearch {
    v2::models::JobSearch {
        offset: query.offset.unwrap_or(0),
        limit: query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
        filters: query
            .filters
            .iter()
            .map(|(key, value)| v2::models::SearchFilter {
                key: key.clone(),
                operator: "in".to_owned(),
                value: vec![value.clone()],
            })
            .collect(),
    }
}

fn v1_job(spec: &TrainingJobSpec) -> Result<v1::models::TrainingJob, Error> {
    let engine_id = spec
        .engine
        .as_deref()
        .map(|e| parse_numeric("engine", e))
        .transpose()?;

    Ok(v1::models::TrainingJob {
        job_name: spec.name.clone(),
        job_desc: spec.description.clone(),
        config: Some(v1::models::JobConfig {
            worker_server_num: spec.node_count,
            spec_id: parse_numeric("flavor", &spec.flavor)?,
            engine_id,
            app_url: spec.code_dir.clone(),
            boot_file_url: spec.boot_file.clone(),
            data_url: spec.data_url.clone(),
            train_url: spec.train_url.clone(),
            user_image_url: spec.image_url.clone(),
            user_command: spec.command.clone(),
            parameter: spec
                .parameters
                .iter()
                .map(|(label, value)| v1::models::JobParameter {
                    label: label.clone(),
                    value: value.clone(),
                })
                .collect(),
            ..Default::default()
        }),
        ..Default::default()
    })
}

fn obs_channel(name: &str, url: &str) -> v2::models::DataChannel {
    v2::models::DataChannel {
        name: name.to_owned(),
        remote: v2::models::ObsRemote {
            obs: v2::models::ObsUrl {
                obs_url: url.to_owned(),
            },
        },
    }
}

fn v2_job(spec: &TrainingJobSpec) -> v2::models::TrainingJob {
    let engine = (spec.engine.is_some() || spec.image_url.is_some()).then(|| v2::models::Engine {
        engine_name: spec.engine.clone(),
        engine_version: spec.engine_version.clone(),
        image_url: spec.image_url.clone(),
        ..Default::default()
    });

    v2::models::TrainingJob {
        kind: "job".to_owned(),
        metadata: v2::models::JobMetadata {
            name: spec.name.clone(),
            description: spec.description.clone(),
            ..Default::default()
        },
        algorithm: Some(v2::models::Algorithm {
            code_dir: spec.code_dir.clone(),
            boot_file: spec.boot_file.clone(),
            command: spec.command.clone(),
            engine,
            parameters: spec
                .parameters
                .iter()
                .map(|(name, value)| v2::models::Parameter {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            inputs: spec
                .data_url
                .as_deref()
                .map(|u| vec![obs_channel("data_url", u)])
                .unwrap_or_default(),
            outputs: spec
                .train_url
                .as_deref()
                .map(|u| vec![obs_channel("train_url", u)])
                .unwrap_or_default(),
            ..Default::default()
        }),
        spec: Some(v2::models::JobSpec {
            resource: v2::models::JobResource {
                flavor_id: spec.flavor.clone(),
                node_count: spec.node_count,
                pool_id: None,
            },
            log_export_path: None,
        }),
        status: None,
    }
}

fn summarize_v1(job: v1::models::TrainingJob) -> TrainingJobSummary {
    TrainingJobSummary {
        id: job.job_id.map(|id| id.to_string()).unwrap_or_default(),
        name: job.job_name,
        status: job
            .status
            .map_or("unknown", v1::models::status_name)
            .to_owned(),
        created: job.create_time.and_then(DateTime::from_timestamp_millis),
        description: job.job_desc,
    }
}

fn summarize_v2(job: v2::models::TrainingJob) -> TrainingJobSummary {
    TrainingJobSummary {
        id: job.metadata.id.unwrap_or_default(),
        name: job.metadata.name,
        status: job
            .status
            .and_then(|s| s.phase)
            .unwrap_or_else(|| "Unknown".to_owned()),
        created: job
            .metadata
            .create_time
            .and_then(DateTime::from_timestamp_millis),
        description: job.metadata.description,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> TrainingJobSpec {
        TrainingJobSpec {
            name: "resnet".into(),
            flavor: "1".into(),
            node_count: 2,
            code_dir: Some("obs://bucket/code/".into()),
            boot_file: Some("obs://bucket/code/train.py".into()),
            engine: Some("5".into()),
            data_url: Some("obs://bucket/data/".into()),
            train_url: Some("obs://bucket/out/".into()),
            parameters: vec![("epochs".into(), "10".into())],
            ..Default::default()
        }
    }

    #[test]
    fn v1_body_uses_numeric_ids() {
        let body = serde_json::to_value(v1_job(&spec()).unwrap()).unwrap();
        assert_eq!(body["job_name"], "resnet");
        assert_eq!(body["config"]["spec_id"], 1);
        assert_eq!(body["config"]["engine_id"], 5);
        assert_eq!(body["config"]["worker_server_num"], 2);
        assert_eq!(body["config"]["parameter"][0], json!({"label": "epochs", "value": "10"}));
    }

    #[test]
    fn v1_query_pages_by_size() {
        let query = TrainingJobQuery {
            filters: vec![("status".into(), "8".into())],
            offset: Some(40),
            limit: Some(20),
        };
        assert_eq!(
            v1_query(&query).unwrap(),
            vec![
                ("status", "8".to_owned()),
                ("per_page", "20".to_owned()),
                ("page", "3".to_owned())
            ]
        );

        let offset_only = TrainingJobQuery {
            offset: Some(10),
            ..Default::default()
        };
        assert!(matches!(v1_query(&offset_only), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn v2_search_turns_filters_into_conditions() {
        let query = TrainingJobQuery {
            filters: vec![("phase".into(), "Running".into())],
            offset: None,
            limit: Some(10),
        };
        let body = serde_json::to_value(v2_search(&query)).unwrap();
        assert_eq!(
            body,
            json!({
                "offset": 0,
                "limit": 10,
                "filters": [{ "key": "phase", "operator": "in", "value": ["Running"] }]
            })
        );

        let body = serde_json::to_value(v2_search(&TrainingJobQuery::default())).unwrap();
        assert_eq!(body, json!({ "offset": 0, "limit": 50 }));
    }

    #[test]
    fn v1_rejects_non_numeric_flavor() {
        let mut s = spec();
        s.flavor = "modelarts.vm.gpu.p100".into();
        assert!(matches!(v1_job(&s), Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn v2_body_nests_algorithm_and_spec() {
        let body = serde_json::to_value(v2_job(&spec())).unwrap();
        assert_eq!(body["kind"], "job");
        assert_eq!(body["metadata"]["name"], "resnet");
        assert_eq!(body["algorithm"]["engine"]["engine_name"], "5");
        assert_eq!(
            body["algorithm"]["inputs"][0]["remote"]["obs"]["obs_url"],
            "obs://bucket/data/"
        );
        assert_eq!(body["spec"]["resource"]["node_count"], 2);
        assert!(body.get("status").is_none());
    }

    #[test]
    fn summaries_normalize_status() {
        let v1: v1::models::TrainingJob = serde_json::from_value(json!({
            "job_id": 10, "job_name": "a", "status": 7, "create_time": 1_700_000_000_000_i64
        }))
        .unwrap();
        let s = summarize_v1(v1);
        assert_eq!(s.id, "10");
        assert_eq!(s.status, "completed");
        assert!(s.created.is_some());

        let v2: v2::models::TrainingJob = serde_json::from_value(json!({
            "kind": "job",
            "metadata": { "id": "uuid-1", "name": "b" },
            "status": { "phase": "Running" }
        }))
        .unwrap();
        let s = summarize_v2(v2);
        assert_eq!(s.id, "uuid-1");
        assert_eq!(s.status, "Running");
    }
}
