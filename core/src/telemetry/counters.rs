//! telemetry/counters.rs
//! Counters bumped by the decode loop and read by any thread.
//!
//! Summary: frame and byte counts per receiver, converted into an immutable
//! TelemetrySnapshot on request.
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters for one receiver. Relaxed ordering is enough: every
/// field is an independent monotonic count.
#[derive(Default, Debug)]
pub struct TelemetryCounters {
    pub frames_decoded: AtomicU64,
    pub frames_delivered: AtomicU64,
    pub frames_skipped: AtomicU64,
    pub frames_overwritten: AtomicU64,
    pub truncated_frames: AtomicU64,
    pub bytes_header: AtomicU64,
    pub bytes_payload: AtomicU64,
}

impl TelemetryCounters {
    /// Record one fully read frame (headers + payload).
    pub fn add_frame(&self, header_len: usize, payload_len: usize) {
        self.frames_decoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_header.fetch_add(header_len as u64, Ordering::Relaxed);
        self.bytes_payload.fetch_add(payload_len as u64, Ordering::Relaxed);
    }

    /// Frame handed to the consumer structure.
    pub fn add_delivered(&self) {
        self.frames_delivered.fetch_add(1, Ordering::Relaxed);
    }

    /// Frame read but rejected (e.g. bad image dimensions).
    pub fn add_skipped(&self) {
        self.frames_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// An unread video frame was replaced by a newer one.
    pub fn add_overwritten(&self) {
        self.frames_overwritten.fetch_add(1, Ordering::Relaxed);
    }

    /// Peer closed the connection in the middle of a frame.
    pub fn add_truncated(&self) {
        self.truncated_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_header.load(Ordering::Relaxed) + self.bytes_payload.load(Ordering::Relaxed)
    }
}
