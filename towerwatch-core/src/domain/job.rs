//! Job domain types

use serde::{Deserialize, Serialize};

/// A unit of work submitted against a repository
///
/// `status` and `created_at` are kept exactly as the controller sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    pub repo_owner: String,
    pub repo_name: String,
    pub job_name: String,
    pub status: String,
    pub created_at: String,
}

impl JobRecord {
    /// `owner/name` of the repository the job belongs to
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }

    /// Classifies the raw status string
    pub fn status_kind(&self) -> JobStatus {
        JobStatus::parse(&self.status)
    }
}

/// Known job states, used for display only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    Dispatched,
    Running,
    Success,
    Failed,
    /// Anything the controller reports that we don't recognise
    Other(String),
}

impl JobStatus {
    /// Case-insensitive parse; also accepts GitHub workflow spellings
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" | "waiting" => JobStatus::Queued,
            "dispatched" => JobStatus::Dispatched,
            "running" | "in_progress" => JobStatus::Running,
            "success" | "succeeded" | "completed" => JobStatus::Success,
            "failed" | "failure" => JobStatus::Failed,
            _ => JobStatus::Other(raw.to_string()),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Dispatched => write!(f, "dispatched"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Success => write!(f, "success"),
            JobStatus::Failed => write!(f, "failed"),
            JobStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}
