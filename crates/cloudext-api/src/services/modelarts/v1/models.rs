// ModelArts v1 training-job types
//
// v1 identifies jobs by a numeric `job_id`; each job has numbered versions
// and the status is an integer code.

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobParameter {
    pub label: String,
    pub value: String,
}

/// Training configuration of a v1 job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    pub worker_server_num: i32,
    pub spec_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter: Vec<JobParameter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingJob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<i64>,
    pub job_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<JobConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl Resource for TrainingJob {
    const NAME: &'static str = "training job";
    const BASE_PATH: &'static str = "v1/{project_id}/training-jobs";
    const RESOURCES_KEY: Option<&'static str> = Some("jobs");

    fn id(&self) -> Option<String> {
        self.job_id.map(|id| id.to_string())
    }
}

/// One version of a v1 job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobVersion {
    #[serde(default)]
    pub version_id: Option<i64>,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default)]
    pub status: Option<i32>,
    #[serde(default)]
    pub create_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<i64>,
}

/// `GET .../training-jobs/{job_id}/versions`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobVersions {
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub job_name: Option<String>,
    #[serde(default)]
    pub job_desc: Option<String>,
    #[serde(default)]
    pub version_count: Option<i64>,
    #[serde(default)]
    pub versions: Vec<JobVersion>,
}

/// Human-readable v1 status code.
pub fn status_name(code: i32) -> &'static str {
    match code {
        0 => "creating",
        1 => "initializing",
        2 => "waiting",
        3 => "create-failed",
        4 => "running",
        5 => "deploying",
        6 => "stopped",
        7 => "completed",
        8 => "running-failed",
        9 => "deleted",
        10 => "deploy-failed",
        11 => "upload-failed",
        12 => "canceled",
        _ => "unknown",
    }
}
