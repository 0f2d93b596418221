//! Snapshot of fleet state
//!
//! A snapshot pairs the jobs and runners observed in one poll cycle. It is
//! only ever built whole and replaced whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::job::JobRecord;
use super::runner::RunnerRecord;

/// Runners keyed by their `ID`
pub type RunnerMap = BTreeMap<String, RunnerRecord>;

/// Jobs and runners from a single successful poll cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Jobs in the order the controller delivered them
    pub jobs: Vec<JobRecord>,

    /// Runners keyed by runner ID
    pub runners: RunnerMap,
}

/// A runner map entry whose key disagrees with the record's own ID
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("runner keyed as '{key}' reports ID '{id}'")]
pub struct KeyMismatch {
    pub key: String,
    pub id: String,
}

impl Snapshot {
    /// The snapshot visible before any poll has succeeded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot, checking that every runner is keyed by its own ID
    pub fn new(jobs: Vec<JobRecord>, runners: RunnerMap) -> Result<Self, KeyMismatch> {
        if let Some((key, runner)) = runners.iter().find(|(key, runner)| **key != runner.id) {
            return Err(KeyMismatch {
                key: key.clone(),
                id: runner.id.clone(),
            });
        }

        Ok(Self { jobs, runners })
    }

    /// Number of runners currently executing a job
    pub fn busy_runners(&self) -> usize {
        self.runners.values().filter(|r| r.is_busy).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner(id: &str) -> RunnerRecord {
        RunnerRecord {
            id: id.to_string(),
            address: "10.0.0.1".to_string(),
            port: 9000,
            last_seen: "t2".to_string(),
            is_busy: id == "r1",
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Snapshot::empty();
        assert!(snapshot.jobs.is_empty());
        assert!(snapshot.runners.is_empty());
    }

    #[test]
    fn test_new_accepts_matching_keys() {
        let mut runners = RunnerMap::new();
        runners.insert("r1".to_string(), runner("r1"));
        runners.insert("r2".to_string(), runner("r2"));

        let snapshot = Snapshot::new(Vec::new(), runners).unwrap();
        assert_eq!(snapshot.runners.len(), 2);
        assert_eq!(snapshot.busy_runners(), 1);
    }

    #[test]
    fn test_new_rejects_mismatched_key() {
        let mut runners = RunnerMap::new();
        runners.insert("r1".to_string(), runner("r9"));

        let err = Snapshot::new(Vec::new(), runners).unwrap_err();
        assert_eq!(err.key, "r1");
        assert_eq!(err.id, "r9");
        assert_eq!(err.to_string(), "runner keyed as 'r1' reports ID 'r9'");
    }

    #[test]
    fn test_runner_map_decodes_from_object() {
        let json = r#"{"r1":{"ID":"r1","Address":"10.0.0.1","Port":9000,"LastSeen":"t2","IsBusy":true}}"#;
        let runners: RunnerMap = serde_json::from_str(json).unwrap();
        assert_eq!(runners["r1"], runner("r1"));
    }
}
