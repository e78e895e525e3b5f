use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use num_enum::TryFromPrimitive;

use crate::types::StreamError;

/// Receiver lifecycle: `Idle → Connected → Streaming → {Closed, Failed}`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
pub enum ReceiverState {
    Idle      = 0,
    Connected = 1,
    Streaming = 2,
    Closed    = 3,
    Failed    = 4,
}

impl ReceiverState {
    /// `Closed` or `Failed`; no more frames will arrive.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReceiverState::Closed | ReceiverState::Failed)
    }

    pub fn is_running(self) -> bool {
        matches!(self, ReceiverState::Connected | ReceiverState::Streaming)
    }
}

impl fmt::Display for ReceiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReceiverState::Idle      => "idle",
            ReceiverState::Connected => "connected",
            ReceiverState::Streaming => "streaming",
            ReceiverState::Closed    => "closed",
            ReceiverState::Failed    => "failed",
        };
        f.write_str(name)
    }
}

/// Lifecycle state plus the error that ended the stream, shared with the decode thread.
#[derive(Debug)]
pub struct StatusCell {
    state: AtomicU8,
    failure: Mutex<Option<Arc<StreamError>>>,
}

impl StatusCell {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ReceiverState::Idle as u8),
            failure: Mutex::new(None),
        }
    }

    pub fn state(&self) -> ReceiverState {
        let raw = self.state.load(Ordering::Acquire);
        // Only this module stores into `state`, always from a ReceiverState.
        ReceiverState::try_from_primitive(raw).unwrap_or(ReceiverState::Failed)
    }

    pub fn set(&self, state: ReceiverState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Move `from → to` only if nobody moved the state in between.
    pub fn advance(&self, from: ReceiverState, to: ReceiverState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Record `err` and enter `Failed`. The first recorded failure wins.
    pub fn fail(&self, err: StreamError) {
        {
            let mut slot = self.failure.lock().unwrap_or_else(|e| e.into_inner());
            if slot.is_none() {
                *slot = Some(Arc::new(err));
            }
        }
        self.set(ReceiverState::Failed);
    }

    pub fn failure(&self) -> Option<Arc<StreamError>> {
        self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}
