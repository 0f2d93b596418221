//! Runner-related API endpoints

use crate::TowerClient;
use crate::error::Result;
use towerwatch_core::domain::snapshot::RunnerMap;

impl TowerClient {
    /// List all registered runners
    ///
    /// The controller answers with an object keyed by runner ID.
    ///
    /// # Example
    /// ```no_run
    /// # use towerwatch_client::TowerClient;
    /// # async fn example() -> towerwatch_client::Result<()> {
    /// let client = TowerClient::new("http://localhost:8080");
    /// for (id, runner) in client.list_runners().await? {
    ///     println!("{} busy={}", id, runner.is_busy);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_runners(&self) -> Result<RunnerMap> {
        let url = format!("{}/runners", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_response("runners", response).await
    }
}
