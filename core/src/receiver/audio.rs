use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::{AudioDecoder, AudioFrame, FrameChannel};
use crate::config::ReceiverConfig;
use crate::constants::thread_names;
use crate::receiver::state::ReceiverState;
use crate::receiver::stream::StreamReceiver;
use crate::telemetry::TelemetrySnapshot;
use crate::types::StreamError;

/// Receives the audio stream and queues decoded frames for [`get`](Self::get).
pub struct AudioReceiver {
    inner: StreamReceiver<AudioDecoder, FrameChannel>,
}

impl AudioReceiver {
    pub fn new(config: ReceiverConfig) -> Self {
        let channel = FrameChannel::new(config.queue_capacity);
        Self {
            inner: StreamReceiver::new(config, thread_names::AUDIO, channel, AudioDecoder::new),
        }
    }

    pub fn start(&mut self) -> Result<(), StreamError> {
        self.inner.start()
    }

    pub fn stop(&mut self) {
        self.inner.stop()
    }

    /// Everything received since the last call, as one `(samples, channels)`
    /// matrix. `None` if there is no new data.
    pub fn get(&self) -> Option<AudioFrame> {
        self.inner.sink().drain_available()
    }

    /// Everything received since the last call, frame by frame.
    pub fn get_frames(&self) -> Vec<AudioFrame> {
        self.inner.sink().drain_frames()
    }

    /// Frames waiting in the channel.
    pub fn pending(&self) -> usize {
        self.inner.sink().len()
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
