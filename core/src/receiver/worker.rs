// ## 📂 File: `src/receiver/worker.rs`
// ## Decode loop: transport → decoder → hand-off, until EOF / stop / fatal error

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam::channel::Receiver;

use crate::decoder::{DecodeStep, FrameDecoder};
use crate::receiver::sink::{Delivery, FrameSink};
use crate::telemetry::TelemetryCounters;
use crate::types::StreamError;

/// Why the loop ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// Peer closed the connection.
    EndOfStream,
    /// `stop()` was requested.
    Stopped,
}

/// Everything the loop shares with the owning receiver.
#[derive(Debug, Clone)]
pub struct LoopContext {
    pub stop: Arc<AtomicBool>,
    pub cancel: Receiver<()>,
    pub telemetry: Arc<TelemetryCounters>,
}

impl LoopContext {
    fn stopping(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }
}

/// Run until the stream ends, a stop is requested, or decoding fails.
///
/// Frames reach `sink` in wire order. Skipped frames are logged and
/// counted; the loop keeps going.
pub fn run_receive_loop<R, D, S>(
    mut stream: R,
    decoder: &mut D,
    sink: &S,
    ctx: &LoopContext,
) -> Result<LoopExit, StreamError>
where
    R: Read,
    D: FrameDecoder,
    S: FrameSink<D::Output> + ?Sized,
{
    let tag = decoder.name();
    log::debug!("[{tag}] receive loop started");

    loop {
        if ctx.stopping() {
            return Ok(LoopExit::Stopped);
        }

        let step = match decoder.next_frame(&mut stream) {
            Ok(step) => step,
            // Shutting the socket down can surface as an error on some platforms.
            Err(e) if ctx.stopping() => {
                log::debug!("[{tag}] read aborted by stop: {e}");
                return Ok(LoopExit::Stopped);
            }
            Err(e) => return Err(e),
        };

        match step {
            DecodeStep::Frame(frame) => match sink.deliver(frame, &ctx.cancel) {
                Delivery::Delivered => ctx.telemetry.add_delivered(),
                Delivery::Overwrote => {
                    ctx.telemetry.add_delivered();
                    ctx.telemetry.add_overwritten();
                }
                Delivery::Cancelled => {
                    log::debug!("[{tag}] hand-off cancelled by stop");
                    return Ok(LoopExit::Stopped);
                }
            },
            DecodeStep::Empty => {}
            DecodeStep::Skipped(e) => {
                log::warn!("[{tag}] frame skipped: {e}");
                ctx.telemetry.add_skipped();
            }
            DecodeStep::EndOfStream { received } => {
                if ctx.stopping() {
                    return Ok(LoopExit::Stopped);
                }
                if received > 0 {
                    log::warn!("[{tag}] connection closed mid-frame after {received} bytes");
                    ctx.telemetry.add_truncated();
                }
                return Ok(LoopExit::EndOfStream);
            }
        }
    }
}
