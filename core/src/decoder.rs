//! Shared decoder seam between the transport and the receive loop.

use std::io::Read;

use crate::config::ReceiverConfig;
use crate::constants::READ_CHUNK_SIZE;
use crate::framing::types::check_payload_cap;
use crate::transport::{read_exact_chunked, ReadOutcome};
use crate::types::StreamError;

/// What one decode cycle produced.
#[derive(Debug)]
pub enum DecodeStep<T> {
    /// A complete frame ready for hand-off.
    Frame(T),
    /// A frame was consumed but carries nothing to deliver.
    Empty,
    /// A frame was consumed but rejected; the stream is still in sync.
    Skipped(StreamError),
    /// Peer closed the connection. `received > 0` means it cut a frame short.
    EndOfStream { received: usize },
}

/// One per stream type. Pulls exactly one frame per call.
pub trait FrameDecoder: Send + 'static {
    type Output: Send + Sync + 'static;

    /// Short label for log lines.
    fn name(&self) -> &'static str;

    fn next_frame<R: Read>(&mut self, r: &mut R) -> Result<DecodeStep<Self::Output>, StreamError>;
}

/// Transport knobs a decoder needs from the receiver config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    pub chunk_size: usize,
    pub max_payload_bytes: Option<usize>,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self { chunk_size: READ_CHUNK_SIZE, max_payload_bytes: None }
    }
}

impl From<&ReceiverConfig> for ReadLimits {
    fn from(cfg: &ReceiverConfig) -> Self {
        Self {
            chunk_size: cfg.effective_chunk_size(),
            max_payload_bytes: cfg.max_payload_bytes,
        }
    }
}

impl ReadLimits {
    pub(crate) fn read<R: Read>(&self, r: &mut R, len: usize) -> Result<ReadOutcome, StreamError> {
        read_exact_chunked(r, len, self.chunk_size)
    }

    /// Cap check first, then read; never allocates an oversized declaration.
    pub(crate) fn read_payload<R: Read>(&self, r: &mut R, len: usize) -> Result<ReadOutcome, StreamError> {
        check_payload_cap(len, self.max_payload_bytes)?;
        self.read(r, len)
    }
}

/// `Some(bytes)` or early-return `EndOfStream` from the enclosing decode step.
macro_rules! complete_or_eof {
    ($outcome:expr, $offset:expr) => {
        match $outcome {
            $crate::transport::ReadOutcome::Complete(bytes) => bytes,
            $crate::transport::ReadOutcome::EndOfStream { received } => {
                return Ok($crate::decoder::DecodeStep::EndOfStream { received: $offset + received });
            }
        }
    };
}
pub(crate) use complete_or_eof;
