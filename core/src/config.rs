// ## 📂 File: `src/config.rs`
// ## Receiver configuration (explicit, no process-wide host/port)

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUDIO_PORT, DEFAULT_HOST, DEFAULT_QUEUE_CAPACITY, DEFAULT_VIDEO_PORT, READ_CHUNK_SIZE,
};
use crate::types::StreamError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Hostname or IP address of the capture device.
    pub host: String,
    pub port: u16,

    /// `None` → blocking connect with the OS timeout.
    pub connect_timeout: Option<Duration>,

    /// Upper bound for a single socket read. Clamped to `1..=READ_CHUNK_SIZE`.
    pub read_chunk_size: usize,

    /// Decoded audio frames held before the network thread blocks.
    pub queue_capacity: usize,

    /// Optional sanity cap on a declared payload. `None` trusts the header.
    pub max_payload_bytes: Option<usize>,

    /// Set TCP_NODELAY on the socket.
    pub nodelay: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_AUDIO_PORT,
            connect_timeout: None,
            read_chunk_size: READ_CHUNK_SIZE,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_payload_bytes: None,
            nodelay: true,
        }
    }
}

impl ReceiverConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port, ..Self::default() }
    }

    /// Defaults for the audio streamer (port 50001).
    pub fn audio(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_AUDIO_PORT)
    }

    /// Defaults for the video streamer (port 50002).
    pub fn video(host: impl Into<String>) -> Self {
        Self::new(host, DEFAULT_VIDEO_PORT)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = Some(max);
        self
    }

    pub fn with_read_chunk_size(mut self, chunk: usize) -> Self {
        self.read_chunk_size = chunk;
        self
    }

    /// Load from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, StreamError> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| StreamError::Config(format!("invalid config json: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), StreamError> {
        if self.host.trim().is_empty() {
            return Err(StreamError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(StreamError::Config("port must be non-zero".into()));
        }
        if self.queue_capacity == 0 {
            return Err(StreamError::Config("queue_capacity must be at least 1".into()));
        }
        if self.max_payload_bytes == Some(0) {
            return Err(StreamError::Config("max_payload_bytes must be non-zero when set".into()));
        }
        Ok(())
    }

    /// Chunk size actually used by the transport.
    pub fn effective_chunk_size(&self) -> usize {
        self.read_chunk_size.clamp(1, READ_CHUNK_SIZE)
    }

    pub fn addr(&self) -> String {
        crate::types::display_addr(&self.host, self.port)
    }
}
