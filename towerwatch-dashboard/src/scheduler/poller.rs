//! Fleet poller
//!
//! Fetches jobs and runners from the tower controller on a fixed interval and
//! installs each complete result in the snapshot store. Every tick runs in its
//! own task, so a slow controller never holds back the next tick.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use tracing::{debug, info, warn};
use towerwatch_core::domain::snapshot::Snapshot;

use crate::repository::FleetRepository;
use crate::scheduler::PollError;
use crate::store::SnapshotStore;

/// Sizes of the collections installed by a successful poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSummary {
    pub jobs: usize,
    pub runners: usize,
}

impl PollSummary {
    fn of(snapshot: &Snapshot) -> Self {
        Self {
            jobs: snapshot.jobs.len(),
            runners: snapshot.runners.len(),
        }
    }
}

/// Polls the controller and keeps the snapshot store current
#[derive(Clone)]
pub struct Poller {
    repository: Arc<dyn FleetRepository>,
    store: SnapshotStore,
    failures: Arc<AtomicU32>,
}

impl Poller {
    /// Creates a new poller writing into `store`
    pub fn new(repository: Arc<dyn FleetRepository>, store: SnapshotStore) -> Self {
        Self {
            repository,
            store,
            failures: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Failed cycles since the last successful one
    pub fn consecutive_failures(&self) -> u32 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Performs a single poll cycle
    ///
    /// Both collections are requested together and the store is only touched
    /// when both arrive intact. Failures are logged and returned.
    pub async fn poll_once(&self) -> Result<PollSummary, PollError> {
        self.tick(None).await
    }

    /// Starts polling every `interval`, beginning immediately
    ///
    /// Must be called from within a Tokio runtime. Polling continues until
    /// the returned handle is stopped or dropped.
    pub fn start(&self, interval: Duration) -> Result<PollerHandle, PollError> {
        if interval.is_zero() {
            return Err(PollError::InvalidInterval);
        }

        info!("Starting fleet poller (interval: {:?})", interval);

        let gate = Arc::new(ApplyGate::new());
        let poller = self.clone();
        let loop_gate = Arc::clone(&gate);
        let task = tokio::spawn(async move { poller.run(interval, loop_gate).await });

        Ok(PollerHandle {
            gate,
            task: Some(task),
        })
    }

    /// Timer loop; fires a detached tick task per interval
    async fn run(self, interval: Duration, gate: Arc<ApplyGate>) {
        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = gate.cancelled() => break,
                _ = ticker.tick() => {}
            }

            if gate.is_closed() {
                break;
            }

            debug!("Polling tower controller");

            let poller = self.clone();
            let gate = Arc::clone(&gate);
            tokio::spawn(async move {
                // Outcome is already reported by tick()
                let _ = poller.tick(Some(&gate)).await;
            });
        }

        debug!("Poller loop exited");
    }

    async fn tick(&self, gate: Option<&ApplyGate>) -> Result<PollSummary, PollError> {
        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                let summary = PollSummary::of(&snapshot);
                let install = || self.store.replace(snapshot);
                let applied = match gate {
                    Some(gate) => gate.apply(install),
                    None => {
                        install();
                        true
                    }
                };

                if applied {
                    self.record_success(summary);
                } else {
                    debug!(
                        "Poller stopped, discarding {} job(s) and {} runner(s)",
                        summary.jobs, summary.runners
                    );
                }
                Ok(summary)
            }
            Err(e) => {
                if gate.is_none_or(|gate| !gate.is_closed()) {
                    self.record_failure(&e);
                } else {
                    debug!("Poller stopped, ignoring failed cycle: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Requests both collections concurrently and waits for both to settle
    async fn fetch_snapshot(&self) -> Result<Snapshot, PollError> {
        let (jobs, runners) = tokio::join!(
            self.repository.fetch_jobs(),
            self.repository.fetch_runners()
        );

        let jobs = jobs.map_err(|e| PollError::from_client("jobs", e));
        let runners = runners.map_err(|e| PollError::from_client("runners", e));

        match (jobs, runners) {
            (Ok(jobs), Ok(runners)) => Ok(Snapshot::new(jobs, runners)?),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(jobs_err), Err(runners_err)) => {
                debug!("Runners request failed as well: {}", runners_err);
                Err(jobs_err)
            }
        }
    }

    fn record_success(&self, summary: PollSummary) {
        let previous = self.failures.swap(0, Ordering::Relaxed);
        if previous > 0 {
            info!("Poll recovered after {} failed cycle(s)", previous);
        }
        debug!(
            "Installed snapshot with {} job(s) and {} runner(s)",
            summary.jobs, summary.runners
        );
    }

    fn record_failure(&self, error: &PollError) {
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        let kind = if error.is_decode() {
            "malformed response"
        } else {
            "fetch failed"
        };
        warn!(
            "Poll cycle failed ({}, {} in a row), keeping last snapshot: {}",
            kind, failures, error
        );
    }
}

/// Serializes snapshot installs against `stop`
///
/// Once closed, no install goes through, even for ticks that were already
/// in flight when the poller was stopped.
struct ApplyGate {
    closed: Mutex<bool>,
    token: CancellationToken,
}

impl ApplyGate {
    fn new() -> Self {
        Self {
            closed: Mutex::new(false),
            token: CancellationToken::new(),
        }
    }

    /// Runs `install` unless the gate is closed; returns whether it ran
    fn apply(&self, install: impl FnOnce()) -> bool {
        let closed = self.closed.lock().unwrap_or_else(PoisonError::into_inner);
        if *closed {
            return false;
        }
        install();
        true
    }

    /// Closes the gate and cancels the timer; returns false if already closed
    fn close(&self) -> bool {
        let mut closed = self.closed.lock().unwrap_or_else(PoisonError::into_inner);
        let was_open = !*closed;
        *closed = true;
        self.token.cancel();
        was_open
    }

    fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Owns a running poll loop
///
/// Stopping (or dropping) the handle cancels the timer. Results of ticks
/// still in flight are discarded when they arrive.
pub struct PollerHandle {
    gate: Arc<ApplyGate>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Stops polling; no snapshot is installed after this returns
    pub fn stop(&mut self) {
        if self.gate.close() {
            info!("Fleet poller stopped");
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.gate.is_closed()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
