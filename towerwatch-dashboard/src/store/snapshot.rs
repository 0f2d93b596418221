//! Snapshot store
//!
//! Single source of truth for the last known good fleet state. The current
//! snapshot is swapped as a whole, so a reader never sees jobs from one poll
//! cycle paired with runners from another.

use std::sync::Arc;

use tokio::sync::watch;
use towerwatch_core::domain::snapshot::Snapshot;

#[derive(Debug)]
struct StoreState {
    generation: u64,
    snapshot: Arc<Snapshot>,
}

/// Shared handle to the current snapshot
///
/// Cloning the store yields another handle to the same state.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<StoreState>>,
}

impl SnapshotStore {
    /// Creates a store holding the empty snapshot
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreState {
            generation: 0,
            snapshot: Arc::new(Snapshot::empty()),
        });
        Self { tx: Arc::new(tx) }
    }

    /// Returns the current snapshot
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.tx.borrow().snapshot)
    }

    /// Number of snapshots installed so far
    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    /// Installs `snapshot` in place of the current one and wakes watchers
    ///
    /// Takes jobs and runners already paired in a [`Snapshot`], so the
    /// runner key check in `Snapshot::new` has run before anything is
    /// installed.
    pub fn replace(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        self.tx.send_modify(|state| {
            state.generation += 1;
            state.snapshot = snapshot;
        });
    }

    /// Watches for replacements
    pub fn subscribe(&self) -> SnapshotWatcher {
        SnapshotWatcher {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives a notification each time the store is replaced
///
/// Replacements that land between two `changed` calls are coalesced; the
/// watcher always yields the newest snapshot.
pub struct SnapshotWatcher {
    rx: watch::Receiver<StoreState>,
}

impl SnapshotWatcher {
    /// The snapshot current at the time of the call
    pub fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.rx.borrow().snapshot)
    }

    /// Waits for the next replacement
    ///
    /// Returns `None` once every store handle has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<Snapshot>> {
        self.rx.changed().await.ok()?;
        Some(Arc::clone(&self.rx.borrow_and_update().snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use towerwatch_core::domain::job::JobRecord;

    fn job(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            repo_owner: "acme".to_string(),
            repo_name: "x".to_string(),
            job_name: "build".to_string(),
            status: "queued".to_string(),
            created_at: "t1".to_string(),
        }
    }

    fn snapshot_of(ids: &[&str]) -> Snapshot {
        Snapshot {
            jobs: ids.iter().map(|id| job(id)).collect(),
            runners: Default::default(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let store = SnapshotStore::new();
        assert_eq!(*store.current(), Snapshot::empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_replace_is_last_write_wins() {
        let store = SnapshotStore::new();
        store.replace(snapshot_of(&["1"]));
        store.replace(snapshot_of(&["2", "3"]));

        assert_eq!(*store.current(), snapshot_of(&["2", "3"]));
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn test_readers_keep_their_snapshot() {
        let store = SnapshotStore::new();
        store.replace(snapshot_of(&["1"]));
        let held = store.current();

        store.replace(snapshot_of(&["2"]));
        assert_eq!(*held, snapshot_of(&["1"]));
        assert_eq!(*store.current(), snapshot_of(&["2"]));
    }

    #[test]
    fn test_clones_share_state() {
        let store = SnapshotStore::new();
        let other = store.clone();
        other.replace(snapshot_of(&["7"]));
        assert_eq!(*store.current(), snapshot_of(&["7"]));
    }

    #[tokio::test]
    async fn test_watcher_sees_latest() {
        let store = SnapshotStore::new();
        let mut watcher = store.subscribe();

        store.replace(snapshot_of(&["1"]));
        store.replace(snapshot_of(&["2"]));

        let seen = watcher.changed().await.unwrap();
        assert_eq!(*seen, snapshot_of(&["2"]));
        assert_eq!(*watcher.current(), snapshot_of(&["2"]));
    }

    #[tokio::test]
    async fn test_watcher_ends_when_store_dropped() {
        let store = SnapshotStore::new();
        let mut watcher = store.subscribe();
        drop(store);

        assert!(watcher.changed().await.is_none());
    }
}
