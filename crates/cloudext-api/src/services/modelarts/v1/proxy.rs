// ModelArts v1 proxy

use super::models::{JobVersions, TrainingJob};
use crate::client::ServiceClient;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{Resource, ResourceRef, UriParams};

#[derive(Debug, Clone)]
pub struct ModelArtsV1Proxy {
    client: ServiceClient,
}

impl Proxy for ModelArtsV1Proxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}

impl ModelArtsV1Proxy {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// `GET /v1/{project_id}/training-jobs`
    pub async fn list_training_jobs(
        &self,
        query: &[(&str, String)],
    ) -> Result<Vec<TrainingJob>, Error> {
        self.client.list_resources(&UriParams::new(), query).await
    }

    /// `GET /v1/{project_id}/training-jobs/{job_id}/versions`
    pub async fn get_training_job(
        &self,
        job: ResourceRef<'_, TrainingJob>,
    ) -> Result<JobVersions, Error> {
        let base = self
            .client
            .render_path(TrainingJob::BASE_PATH, &UriParams::new())?;
        self.client
            .get(&format!("{base}/{}/versions", job.resolve()?))
            .await
    }

    pub async fn create_training_job(&self, job: &TrainingJob) -> Result<TrainingJob, Error> {
        self.client.create_resource(&UriParams::new(), job).await
    }

    pub async fn delete_training_job(&self, job: ResourceRef<'_, TrainingJob>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), job).await
    }
}
