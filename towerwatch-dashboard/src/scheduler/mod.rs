//! Scheduler layer
//!
//! Drives periodic synchronization with the tower controller. The poller
//! owns the repeating timer; the handle it returns is the only way to
//! release it.

pub mod error;
pub mod poller;

pub use error::PollError;
pub use poller::Poller;
