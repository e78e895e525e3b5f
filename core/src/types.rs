use std::io;
use std::net::SocketAddr;

use crate::{
    framing::FrameError,
    receiver::ReceiverState,
    video::nv12::ImageError,
};

/// Unified stream error covering connection, I/O, framing, image and lifecycle failures.
/// - Ergonomic `From<T>` impls enable `?` across the decode loop.
/// - Messages aim to be stable and contextual for logs.
#[derive(Debug)]
pub enum StreamError {
    /// Could not connect to the streamer. Fatal at `start()`, never retried.
    Connection {
        addr: String,
        source: io::Error,
    },

    /// Host name resolved to no usable address.
    Resolve(String),

    /// I/O error on an established connection.
    Io(io::Error),

    /// Header/payload framing error. Fatal for the connection.
    Frame(FrameError),

    /// NV12 buffer with unusable dimensions.
    Image(ImageError),

    /// Lifecycle call made from the wrong state.
    InvalidState {
        op: &'static str,
        state: ReceiverState,
    },

    /// Rejected receiver configuration.
    Config(String),

    /// Decode thread could not be spawned or panicked.
    Thread(String),
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::Connection { addr, source } => write!(f, "connection to {} failed: {}", addr, source),
            StreamError::Resolve(addr) => write!(f, "could not resolve {}", addr),
            StreamError::Io(e) => write!(f, "I/O error: {}", e),
            StreamError::Frame(e) => write!(f, "framing error: {}", e),
            StreamError::Image(e) => write!(f, "image error: {}", e),
            StreamError::InvalidState { op, state } => write!(f, "cannot {} while {}", op, state),
            StreamError::Config(msg) => write!(f, "config error: {}", msg),
            StreamError::Thread(msg) => write!(f, "thread error: {}", msg),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Connection { source, .. } => Some(source),
            StreamError::Io(e) => Some(e),
            StreamError::Frame(e) => Some(e),
            StreamError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(e: io::Error) -> Self {
        StreamError::Io(e)
    }
}

impl From<FrameError> for StreamError {
    fn from(e: FrameError) -> Self {
        StreamError::Frame(e)
    }
}

impl From<ImageError> for StreamError {
    fn from(e: ImageError) -> Self {
        StreamError::Image(e)
    }
}

/// Format `host:port` for log lines and error messages.
pub(crate) fn display_addr(host: &str, port: u16) -> String {
    format!("{}:{}", host, port)
}

pub(crate) fn peer_or_unknown(addr: Option<SocketAddr>) -> String {
    addr.map(|a| a.to_string()).unwrap_or_else(|| "<unknown>".into())
}
