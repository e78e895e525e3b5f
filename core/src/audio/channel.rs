// ## 📂 File: `src/audio/channel.rs`
// ## Bounded hand-off between the network thread and the polling consumer

use std::sync::Mutex;

use crossbeam::channel::{bounded, Receiver, Select, Sender, TryRecvError, TrySendError};

use crate::audio::frame::AudioFrame;

/// Outcome of a cancellable push.
#[derive(Debug, PartialEq)]
pub enum PushOutcome {
    Pushed,
    /// Stop was requested while the channel was full; the frame is handed back.
    Cancelled(AudioFrame),
}

/// Bounded FIFO of decoded audio frames.
///
/// - `push` blocks when full (backpressure reaches the socket).
/// - `drain_available` never blocks.
/// - Frames leave in arrival order; a frame is never split.
#[derive(Debug)]
pub struct FrameChannel {
    tx: Sender<AudioFrame>,
    rx: Receiver<AudioFrame>,
    capacity: usize,
    // First frame of a new channel layout, held back for the next drain.
    carry: Mutex<Option<AudioFrame>>,
}

impl FrameChannel {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, rx) = bounded(capacity);
        Self { tx, rx, capacity, carry: Mutex::new(None) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Frames currently queued (including a held-back layout change).
    pub fn len(&self) -> usize {
        self.rx.len() + usize::from(self.lock_carry().is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Block until there is room.
    pub fn push(&self, frame: AudioFrame) {
        // Both ends live in `self`, so the channel cannot disconnect.
        let _ = self.tx.send(frame);
    }

    /// Non-blocking push; the frame comes back when the channel is full.
    pub fn try_push(&self, frame: AudioFrame) -> Result<(), AudioFrame> {
        match self.tx.try_send(frame) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(f)) | Err(TrySendError::Disconnected(f)) => Err(f),
        }
    }

    /// Block until there is room or `cancel` fires (message or disconnect).
    pub fn push_or_cancel(&self, frame: AudioFrame, cancel: &Receiver<()>) -> PushOutcome {
        let frame = match self.try_push(frame) {
            Ok(()) => return PushOutcome::Pushed,
            Err(f) => f,
        };

        log::trace!("[AUDIO] channel full ({}), producer waiting", self.capacity);
        let mut sel = Select::new();
        let send_op = sel.send(&self.tx);
        let cancel_op = sel.recv(cancel);
        let oper = sel.select();

        match oper.index() {
            i if i == send_op => match oper.send(&self.tx, frame) {
                Ok(()) => PushOutcome::Pushed,
                Err(e) => PushOutcome::Cancelled(e.into_inner()),
            },
            i if i == cancel_op => {
                let _ = oper.recv(cancel);
                PushOutcome::Cancelled(frame)
            }
            _ => unreachable!("select returned an unregistered operation"),
        }
    }

    /// Remove every queued frame and concatenate along the time axis.
    ///
    /// `None` when nothing was queued. A change of channel count or sample
    /// rate ends the block; the first frame of the new layout leads the next drain.
    pub fn drain_available(&self) -> Option<AudioFrame> {
        let mut carry = self.lock_carry();
        let mut out = match carry.take() {
            Some(f) => f,
            None => match self.rx.try_recv() {
                Ok(f) => f,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            },
        };

        while let Ok(next) = self.rx.try_recv() {
            if !out.same_layout(&next) {
                log::debug!(
                    "[AUDIO] layout changed {}ch@{} -> {}ch@{}, splitting drain",
                    out.channels, out.sample_rate, next.channels, next.sample_rate
                );
                *carry = Some(next);
                break;
            }
            out.append(next);
        }

        Some(out)
    }

    /// Remove every queued frame without concatenating.
    pub fn drain_frames(&self) -> Vec<AudioFrame> {
        let mut carry = self.lock_carry();
        let mut out: Vec<AudioFrame> = carry.take().into_iter().collect();
        out.extend(self.rx.try_iter());
        out
    }

    fn lock_carry(&self) -> std::sync::MutexGuard<'_, Option<AudioFrame>> {
        // A poisoned carry only means a consumer panicked mid-drain; the Option is still valid.
        self.carry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FrameChannel {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_QUEUE_CAPACITY)
    }
}
