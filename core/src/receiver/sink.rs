//! Hand-off targets for decoded frames.

use crossbeam::channel::Receiver;

use crate::audio::{AudioFrame, FrameChannel, PushOutcome};
use crate::video::LastFrameSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// Delivered, and an unread older frame was dropped.
    Overwrote,
    /// Stop was requested before the frame could be handed off.
    Cancelled,
}

/// Where the decode loop puts finished frames. Shared with the consumer thread.
pub trait FrameSink<T>: Send + Sync + 'static {
    /// May block (backpressure) until `cancel` fires.
    fn deliver(&self, frame: T, cancel: &Receiver<()>) -> Delivery;
}

impl FrameSink<AudioFrame> for FrameChannel {
    fn deliver(&self, frame: AudioFrame, cancel: &Receiver<()>) -> Delivery {
        match self.push_or_cancel(frame, cancel) {
            PushOutcome::Pushed => Delivery::Delivered,
            PushOutcome::Cancelled(_) => Delivery::Cancelled,
        }
    }
}

impl<T: Send + Sync + 'static> FrameSink<T> for LastFrameSlot<T> {
    fn deliver(&self, frame: T, _cancel: &Receiver<()>) -> Delivery {
        if self.set(frame) {
            Delivery::Overwrote
        } else {
            Delivery::Delivered
        }
    }
}
