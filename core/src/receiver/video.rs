use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ReceiverConfig;
use crate::constants::thread_names;
use crate::receiver::state::ReceiverState;
use crate::receiver::stream::StreamReceiver;
use crate::telemetry::TelemetrySnapshot;
use crate::types::StreamError;
use crate::video::{LastFrameSlot, VideoDecoder, VideoFrame};

/// Receives the video stream and keeps only the newest converted frame.
pub struct VideoReceiver {
    inner: StreamReceiver<VideoDecoder, LastFrameSlot<VideoFrame>>,
}

impl VideoReceiver {
    pub fn new(config: ReceiverConfig) -> Self {
        Self {
            inner: StreamReceiver::new(config, thread_names::VIDEO, LastFrameSlot::new(), VideoDecoder::new),
        }
    }

    pub fn start(&mut self) -> Result<(), StreamError> {
        self.inner.start()
    }

    pub fn stop(&mut self) {
        self.inner.stop()
    }

    /// Latest decoded frame, `None` until the first one arrives.
    pub fn last_frame(&self) -> Option<Arc<VideoFrame>> {
        self.inner.sink().get()
    }

    /// Latest frame only if it arrived after `seen` (a previous version).
    pub fn last_frame_if_newer(&self, seen: u64) -> Option<(u64, Arc<VideoFrame>)> {
        self.inner.sink().get_if_newer(seen)
    }

    /// Frames written to the slot so far.
    pub fn frame_version(&self) -> u64 {
        self.inner.sink().version()
    }

    pub fn state(&self) -> ReceiverState {
        self.inner.state()
    }

    pub fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    pub fn failure(&self) -> Option<Arc<StreamError>> {
        self.inner.failure()
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.inner.peer()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.inner.telemetry()
    }

    pub fn wait_finished(&self, timeout: Duration) -> ReceiverState {
        self.inner.wait_finished(timeout)
    }
}
