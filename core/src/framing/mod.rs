//! Wire framing for the audio and video streams.
//!
//! Responsibilities:
//! - Define the fixed-size headers and their declared payload lengths
//! - Decode headers/payloads from little-endian bytes
//! - Encode frames into the same layout (loopback senders, tests)
//!
//! Non-responsibilities:
//! - Socket I/O
//! - Colour conversion
//! - Threading

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{
    AudioHeader,
    OpticsHeader,
    GeometryHeader,
    FrameError,
};
