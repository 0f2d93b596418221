//! Runner domain model
//!
//! Represents one fleet worker as last reported to the tower controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fleet worker that executes jobs
///
/// Field names follow the controller's wire format (`ID`, `Address`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerRecord {
    /// Unique identifier for the runner
    #[serde(rename = "ID")]
    pub id: String,

    /// Host the runner heartbeats from
    #[serde(rename = "Address")]
    pub address: String,

    /// Port the runner accepts jobs on
    #[serde(rename = "Port")]
    pub port: u16,

    /// Last heartbeat time, verbatim as reported
    #[serde(rename = "LastSeen")]
    pub last_seen: String,

    /// Whether the runner is currently executing a job
    #[serde(rename = "IsBusy")]
    pub is_busy: bool,
}

impl RunnerRecord {
    /// Parses `last_seen` as an RFC 3339 timestamp
    ///
    /// Returns `None` when the controller reported something else; the raw
    /// string is still what gets displayed.
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_seen)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}
