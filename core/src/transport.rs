// ## 📂 File: `src/transport.rs`
// ## Exact-byte reads off a blocking stream

use std::io::{ErrorKind, Read};

use bytes::{Bytes, BytesMut};

use crate::constants::READ_CHUNK_SIZE;
use crate::types::StreamError;

/// Result of an exact read.
///
/// `EndOfStream` is a normal outcome, not an error: the peer closed the
/// connection before `n` bytes accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Complete(Bytes),
    EndOfStream {
        /// Bytes of the partial unit that arrived before closure.
        received: usize,
    },
}

impl ReadOutcome {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReadOutcome::EndOfStream { .. })
    }

    /// Unwrap into the payload, `None` on end-of-stream.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            ReadOutcome::Complete(b) => Some(b),
            ReadOutcome::EndOfStream { .. } => None,
        }
    }
}

/// Read exactly `len` bytes, or report `EndOfStream` if the stream closes first.
///
/// Reads are issued in chunks of at most [`READ_CHUNK_SIZE`] bytes. Closure is
/// the read primitive's `Ok(0)`; `Interrupted` is retried and every other I/O
/// error propagates.
pub fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> Result<ReadOutcome, StreamError> {
    read_exact_chunked(r, len, READ_CHUNK_SIZE)
}

/// Same as [`read_exact_or_eof`] with an explicit chunk bound (clamped to `1..=READ_CHUNK_SIZE`).
pub fn read_exact_chunked<R: Read>(
    r: &mut R,
    len: usize,
    chunk: usize,
) -> Result<ReadOutcome, StreamError> {
    if len == 0 {
        return Ok(ReadOutcome::Complete(Bytes::new()));
    }

    let chunk = chunk.clamp(1, READ_CHUNK_SIZE);
    // Grows with what actually arrives, never with what the header declared.
    let mut buf = BytesMut::with_capacity(chunk.min(len));

    while buf.len() < len {
        let off = buf.len();
        let want = chunk.min(len - off);
        buf.resize(off + want, 0);
        match r.read(&mut buf[off..]) {
            Ok(0) => return Ok(ReadOutcome::EndOfStream { received: off }),
            Ok(n) => buf.truncate(off + n),
            Err(e) if e.kind() == ErrorKind::Interrupted => buf.truncate(off),
            Err(e) => return Err(StreamError::Io(e)),
        }
    }

    Ok(ReadOutcome::Complete(buf.freeze()))
}
