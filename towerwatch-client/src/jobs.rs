//! Job-related API endpoints

use crate::TowerClient;
use crate::error::Result;
use towerwatch_core::domain::job::JobRecord;

impl TowerClient {
    /// List all jobs known to the controller
    ///
    /// # Returns
    /// Jobs in the order the controller delivered them
    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        let url = format!("{}/jobs", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response("jobs", response).await
    }
}
