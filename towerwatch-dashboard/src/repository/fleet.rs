//! Fleet repository
//!
//! Fetches the two collections the dashboard shows:
//! - Jobs, as an ordered list
//! - Runners, as a map keyed by runner ID

use async_trait::async_trait;
use towerwatch_client::{ClientError, TowerClient};
use towerwatch_core::domain::job::JobRecord;
use towerwatch_core::domain::snapshot::RunnerMap;

/// Repository trait for reading fleet state from the tower controller
#[async_trait]
pub trait FleetRepository: Send + Sync {
    /// Fetches all jobs in the order the controller holds them
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, ClientError>;

    /// Fetches all registered runners keyed by ID
    async fn fetch_runners(&self) -> Result<RunnerMap, ClientError>;
}

/// HTTP implementation of FleetRepository
pub struct HttpFleetRepository {
    client: TowerClient,
}

impl HttpFleetRepository {
    /// Creates a repository backed by `client`
    pub fn new(client: TowerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FleetRepository for HttpFleetRepository {
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, ClientError> {
        self.client.list_jobs().await
    }

    async fn fetch_runners(&self) -> Result<RunnerMap, ClientError> {
        self.client.list_runners().await
    }
}
