//! telemetry/mod.rs
//! Per-receiver counters and immutable snapshots.
//!
//! - Counters are atomics written by the decode loop only.
//! - Snapshots are plain values, serialisable for logs or dashboards.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
