// ModelArts v2 training-job types
//
// v2 jobs are nested documents (`metadata`, `algorithm`, `spec`, `status`)
// keyed by a UUID in `metadata.id`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::Resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    /// Milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Engine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// An OBS location for job input or output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataChannel {
    pub name: String,
    pub remote: ObsRemote,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObsRemote {
    pub obs: ObsUrl,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObsUrl {
    pub obs_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Algorithm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<Engine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<DataChannel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<DataChannel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobResource {
    pub flavor_id: String,
    pub node_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobSpec {
    pub resource: JobResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_export_path: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobStatus {
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub secondary_phase: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub start_time: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingJob {
    #[serde(default = "default_kind")]
    pub kind: String,
    pub metadata: JobMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<JobSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

fn default_kind() -> String {
    "job".to_owned()
}

impl Resource for TrainingJob {
    const NAME: &'static str = "training job";
    const BASE_PATH: &'static str = "v2/{project_id}/training-jobs";

    fn id(&self) -> Option<String> {
        self.metadata.id.clone()
    }
}

/// Body of `POST .../training-job-searches`.
#[derive(Debug, Clone, Serialize)]
pub struct JobSearch {
    pub offset: i64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<SearchFilter>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchFilter {
    pub key: String,
    pub operator: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchResult {
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub items: Vec<TrainingJob>,
}
