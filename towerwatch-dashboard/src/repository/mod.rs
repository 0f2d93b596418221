//! Repository layer
//!
//! Repositories abstract the network I/O the poller depends on. They fetch
//! and decode; they hold no state and apply no business rules.
//!
//! The trait seam lets the poller be driven by scripted doubles in tests.

mod fleet;

pub use fleet::FleetRepository;
pub use fleet::HttpFleetRepository;
