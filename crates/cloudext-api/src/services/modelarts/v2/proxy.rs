// ModelArts v2 proxy

use tracing::warn;

use super::models::{JobSearch, JobSearchResult, TrainingJob};
use crate::client::ServiceClient;
use crate::error::Error;
use crate::proxy::Proxy;
use crate::resource::{ResourceRef, UriParams};

const SEARCH_PATH: &str = "v2/{project_id}/training-job-searches";

#[derive(Debug, Clone)]
pub struct ModelArtsV2Proxy {
    client: ServiceClient,
}

impl Proxy for ModelArtsV2Proxy {
    fn client(&self) -> &ServiceClient {
        &self.client
    }
}

impl ModelArtsV2Proxy {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    /// v2 lists through a search call.
    ///
    /// `POST /v2/{project_id}/training-job-searches`
    pub async fn list_training_jobs(&self, search: &JobSearch) -> Result<Vec<TrainingJob>, Error> {
        let path = self.client.render_path(SEARCH_PATH, &UriParams::new())?;
        let result: JobSearchResult = self.client.post(&path, search).await?;
        let shown = i64::try_from(result.items.len()).unwrap_or(i64::MAX);
        if let Some(total) = result.total.filter(|t| *t > search.offset.saturating_add(shown)) {
            warn!(total, shown, "training job search truncated; raise the limit or page with offset");
        }
        Ok(result.items)
    }

    pub async fn get_training_job(
        &self,
        job: ResourceRef<'_, TrainingJob>,
    ) -> Result<TrainingJob, Error> {
        self.client.get_resource(&UriParams::new(), job).await
    }

    pub async fn create_training_job(&self, job: &TrainingJob) -> Result<TrainingJob, Error> {
        self.client.create_resource(&UriParams::new(), job).await
    }

    pub async fn delete_training_job(&self, job: ResourceRef<'_, TrainingJob>) -> Result<(), Error> {
        self.client.delete_resource(&UriParams::new(), job).await
    }
}
