//! Core domain types
//!
//! These types mirror the JSON payloads served by the tower controller.
//! They are shared between the client (for decoding) and the dashboard
//! (for storage and rendering).

pub mod job;
pub mod runner;
pub mod snapshot;
