//! media-core
//!
//! Client-side receiver for length-prefixed audio and NV12 video streams
//! pushed over plain TCP. No rendering, no CLI, no async runtime.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Wire layers
pub mod transport;
pub mod framing;
pub mod decoder;

// Streams
pub mod audio;
pub mod video;
pub mod receiver;

pub mod telemetry;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::audio::AudioFrame;
    pub use crate::config::ReceiverConfig;
    pub use crate::receiver::{AudioReceiver, ReceiverState, VideoReceiver};
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::StreamError;
    pub use crate::video::{RgbImage, VideoFrame};
}
