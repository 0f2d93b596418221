//! Towerwatch Core
//!
//! Data contracts shared by the Towerwatch dashboard and its HTTP client.
//!
//! This crate contains:
//! - Domain types: the runner and job records reported by the tower controller
//! - Snapshot: the paired, internally consistent view of both collections

pub mod domain;
