//! telemetry/snapshot.rs
//!
//! Immutable view over a receiver's counters.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;

/// Counters plus elapsed time and throughput at the moment of capture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub frames_decoded: u64,
    pub frames_delivered: u64,
    pub frames_skipped: u64,
    pub frames_overwritten: u64,
    pub truncated_frames: u64,
    pub bytes_header: u64,
    pub bytes_payload: u64,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
}

impl TelemetrySnapshot {
    /// `started` is when the receiver began streaming; `None` before `start()`.
    pub fn from(counters: &TelemetryCounters, started: Option<Instant>) -> Self {
        let elapsed = started.map(|t| t.elapsed()).unwrap_or(Duration::ZERO);
        let bytes_total = counters.bytes_total();

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            bytes_total as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            frames_decoded: counters.frames_decoded.load(Ordering::Relaxed),
            frames_delivered: counters.frames_delivered.load(Ordering::Relaxed),
            frames_skipped: counters.frames_skipped.load(Ordering::Relaxed),
            frames_overwritten: counters.frames_overwritten.load(Ordering::Relaxed),
            truncated_frames: counters.truncated_frames.load(Ordering::Relaxed),
            bytes_header: counters.bytes_header.load(Ordering::Relaxed),
            bytes_payload: counters.bytes_payload.load(Ordering::Relaxed),
            throughput_bytes_per_sec: throughput,
            elapsed,
        }
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_header + self.bytes_payload
    }

    /// Every decoded frame is either delivered or skipped.
    pub fn sanity_check(&self) -> bool {
        self.frames_delivered + self.frames_skipped <= self.frames_decoded
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
