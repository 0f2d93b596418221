//! Store layer
//!
//! Holds the last successfully observed fleet state.

mod snapshot;

pub use snapshot::SnapshotStore;
