use std::fmt;

use crate::constants::{AUDIO_HEADER_LEN, AUDIO_SAMPLE_LEN, GEOMETRY_HEADER_LEN, OPTICS_HEADER_LEN};

/// Audio frame header (fixed size)
///
/// All fields are little-endian u32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioHeader {
    pub channels: u32,
    pub samples: u32,
    pub sample_rate: u32,
}

impl AudioHeader {
    pub const LEN: usize = AUDIO_HEADER_LEN;

    pub fn new(channels: u32, samples: u32, sample_rate: u32) -> Self {
        Self { channels, samples, sample_rate }
    }

    /// Number of f32 values in the payload.
    pub fn value_count(&self) -> Result<usize, FrameError> {
        (self.channels as usize)
            .checked_mul(self.samples as usize)
            .ok_or(FrameError::LengthOverflow {
                what: "audio payload",
                dims: [self.channels as u64, self.samples as u64],
            })
    }

    /// Declared payload length in bytes (`channels * samples * 4`).
    pub fn payload_len(&self) -> Result<usize, FrameError> {
        self.value_count()?
            .checked_mul(AUDIO_SAMPLE_LEN)
            .ok_or(FrameError::LengthOverflow {
                what: "audio payload",
                dims: [self.channels as u64, self.samples as u64],
            })
    }

    /// A frame with no channels or no samples carries nothing to deliver.
    pub fn is_empty(&self) -> bool {
        self.channels == 0 || self.samples == 0
    }
}

/// Camera optics sent ahead of every video frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OpticsHeader {
    pub focal_x: f32,
    pub focal_y: f32,
}

impl OpticsHeader {
    pub const LEN: usize = OPTICS_HEADER_LEN;
}

/// Image geometry of the NV12 payload that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GeometryHeader {
    pub width: u32,
    pub height: u32,
}

impl GeometryHeader {
    pub const LEN: usize = GEOMETRY_HEADER_LEN;

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Declared NV12 payload length: `width * height * 3 / 2` (integer division).
    pub fn payload_len(&self) -> Result<usize, FrameError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(3))
            .map(|n| n / 2)
            .ok_or(FrameError::LengthOverflow {
                what: "nv12 payload",
                dims: [self.width as u64, self.height as u64],
            })
    }
}

#[derive(Debug)]
pub enum FrameError {
    /// Header buffer shorter than the fixed header length.
    Truncated {
        need: usize,
        have: usize,
    },
    /// Declared dimensions overflow the address space.
    LengthOverflow {
        what: &'static str,
        dims: [u64; 2],
    },
    /// Declared payload exceeds the configured sanity cap.
    PayloadTooLarge {
        len: usize,
        max: usize,
    },
    /// Payload length disagrees with its header.
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            Truncated { need, have } =>
                write!(f, "truncated header: need {} bytes, have {}", need, have),
            LengthOverflow { what, dims } =>
                write!(f, "{} length overflows: {} x {}", what, dims[0], dims[1]),
            PayloadTooLarge { len, max } =>
                write!(f, "declared payload too large: {} > {}", len, max),
            LengthMismatch { expected, actual } =>
                write!(f, "length mismatch: expected {}, got {}", expected, actual),
        }
    }
}

impl std::error::Error for FrameError {}

/// Reject a declared payload above `max` before anything is allocated.
#[inline]
pub fn check_payload_cap(len: usize, max: Option<usize>) -> Result<(), FrameError> {
    match max {
        Some(max) if len > max => Err(FrameError::PayloadTooLarge { len, max }),
        _ => Ok(()),
    }
}
