// ## 📂 File: `src/receiver/stream.rs`
// ## Generic receiver: owns the socket, runs the decode loop on its own thread

use std::io::{self, ErrorKind};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, Sender};

use crate::config::ReceiverConfig;
use crate::decoder::{FrameDecoder, ReadLimits};
use crate::receiver::sink::FrameSink;
use crate::receiver::state::{ReceiverState, StatusCell};
use crate::receiver::worker::{run_receive_loop, LoopContext, LoopExit};
use crate::telemetry::{TelemetryCounters, TelemetrySnapshot};
use crate::types::{peer_or_unknown, StreamError};

const WAIT_POLL: Duration = Duration::from_millis(5);

/// One TCP connection, one decoder, one hand-off sink.
///
/// The socket is owned by the decode thread; the receiver keeps a cloned
/// handle only to shut it down from `stop()`.
pub struct StreamReceiver<D, S>
where
    D: FrameDecoder,
    S: FrameSink<D::Output>,
{
    config: ReceiverConfig,
    thread_name: &'static str,
    decoder: Option<D>,
    sink: Arc<S>,
    status: Arc<StatusCell>,
    telemetry: Arc<TelemetryCounters>,
    stop_flag: Arc<AtomicBool>,
    started: Option<Instant>,
    peer: Option<SocketAddr>,
    shutdown_handle: Option<TcpStream>,
    cancel_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl<D, S> StreamReceiver<D, S>
where
    D: FrameDecoder,
    S: FrameSink<D::Output>,
{
    /// `make_decoder` receives the transport limits and the shared counters.
    pub fn new<F>(config: ReceiverConfig, thread_name: &'static str, sink: S, make_decoder: F) -> Self
    where
        F: FnOnce(ReadLimits, Arc<TelemetryCounters>) -> D,
    {
        let telemetry = Arc::new(TelemetryCounters::default());
        let decoder = make_decoder(ReadLimits::from(&config), telemetry.clone());

        Self {
            config,
            thread_name,
            decoder: Some(decoder),
            sink: Arc::new(sink),
            status: Arc::new(StatusCell::new()),
            telemetry,
            stop_flag: Arc::new(AtomicBool::new(false)),
            started: None,
            peer: None,
            shutdown_handle: None,
            cancel_tx: None,
            handle: None,
        }
    }

    /// Connect and spawn the decode loop. Only valid from `Idle`; never retried.
    pub fn start(&mut self) -> Result<(), StreamError> {
        let state = self.status.state();
        if state != ReceiverState::Idle {
            return Err(StreamError::InvalidState { op: "start", state });
        }
        self.config.validate()?;

        let stream = match connect(&self.config) {
            Ok(s) => s,
            Err(e) => {
                log::error!("[RECEIVER] {}", e);
                self.status.fail(duplicate_connect_error(&e));
                return Err(e);
            }
        };
        self.peer = stream.peer_addr().ok();
        self.status.set(ReceiverState::Connected);
        log::info!("[RECEIVER] connected to {}", peer_or_unknown(self.peer));

        let shutdown_handle = match stream.try_clone() {
            Ok(s) => s,
            Err(e) => {
                self.status.fail(StreamError::Io(io::Error::new(e.kind(), e.to_string())));
                return Err(StreamError::Io(e));
            }
        };
        let (cancel_tx, cancel_rx) = bounded::<()>(0);
        let ctx = LoopContext {
            stop: self.stop_flag.clone(),
            cancel: cancel_rx,
            telemetry: self.telemetry.clone(),
        };

        let mut decoder = self
            .decoder
            .take()
            .ok_or(StreamError::InvalidState { op: "start", state: ReceiverState::Connected })?;
        let sink = self.sink.clone();
        let status = self.status.clone();
        let tag = self.thread_name;

        let spawned = thread::Builder::new().name(tag.to_string()).spawn(move || {
            match run_receive_loop(stream, &mut decoder, sink.as_ref(), &ctx) {
                Ok(LoopExit::EndOfStream) => {
                    log::info!("[RECEIVER] {tag}: end of stream");
                    status.set(ReceiverState::Closed);
                }
                Ok(LoopExit::Stopped) => {
                    log::info!("[RECEIVER] {tag}: stopped");
                    status.set(ReceiverState::Closed);
                }
                Err(e) => {
                    log::error!("[RECEIVER] {tag}: stream failed: {e}");
                    status.fail(e);
                }
            }
        });

        let handle = match spawned {
            Ok(h) => h,
            Err(e) => {
                let _ = shutdown_handle.shutdown(Shutdown::Both);
                self.status.fail(StreamError::Thread(e.to_string()));
                return Err(StreamError::Thread(e.to_string()));
            }
        };

        self.started = Some(Instant::now());
        self.shutdown_handle = Some(shutdown_handle);
        self.cancel_tx = Some(cancel_tx);
        self.handle = Some(handle);

        // The loop may already have finished; never overwrite a terminal state.
        self.status.advance(ReceiverState::Connected, ReceiverState::Streaming);
        Ok(())
    }

    /// Close the socket, wake a blocked producer, and join the decode thread.
    ///
    /// Idempotent. A receiver that never started goes straight to `Closed`.
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Release);

        if let Some(sock) = self.shutdown_handle.take() {
            // NotConnected just means the peer already went away.
            if let Err(e) = sock.shutdown(Shutdown::Both) {
                if e.kind() != ErrorKind::NotConnected {
                    log::debug!("[RECEIVER] shutdown {}: {}", self.thread_name, e);
                }
            }
        }
        drop(self.cancel_tx.take());

        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                self.status.fail(StreamError::Thread(format!("{} panicked", self.thread_name)));
            }
        }

        self.status.advance(ReceiverState::Idle, ReceiverState::Closed);
        if self.status.state().is_running() {
            self.status.set(ReceiverState::Closed);
        }
    }

    pub fn state(&self) -> ReceiverState {
        self.status.state()
    }

    pub fn is_running(&self) -> bool {
        self.status.state().is_running()
    }

    /// Error that moved the receiver to `Failed`, if any.
    pub fn failure(&self) -> Option<Arc<StreamError>> {
        self.status.failure()
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        TelemetrySnapshot::from(&self.telemetry, self.started)
    }

    /// Poll until the stream is `Closed`/`Failed` or `timeout` elapses.
    pub fn wait_finished(&self, timeout: Duration) -> ReceiverState {
        let deadline = Instant::now() + timeout;
        loop {
            let state = self.status.state();
            if state.is_terminal() || Instant::now() >= deadline {
                return state;
            }
            thread::sleep(WAIT_POLL);
        }
    }
}

impl<D, S> Drop for StreamReceiver<D, S>
where
    D: FrameDecoder,
    S: FrameSink<D::Output>,
{
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resolve and connect, honouring `connect_timeout` when set.
fn connect(cfg: &ReceiverConfig) -> Result<TcpStream, StreamError> {
    let addr = cfg.addr();
    let wrap = |source: io::Error| StreamError::Connection { addr: addr.clone(), source };

    let stream = match cfg.connect_timeout {
        None => TcpStream::connect((cfg.host.as_str(), cfg.port)).map_err(wrap)?,
        Some(timeout) => {
            let candidates = (cfg.host.as_str(), cfg.port).to_socket_addrs().map_err(wrap)?;
            connect_any(&addr, candidates, timeout)?
        }
    };

    if let Err(e) = stream.set_nodelay(cfg.nodelay) {
        log::debug!("[RECEIVER] set_nodelay({}) on {}: {}", cfg.nodelay, addr, e);
    }
    Ok(stream)
}

/// Try each resolved address in turn; the last error wins.
fn connect_any<I>(addr: &str, candidates: I, timeout: Duration) -> Result<TcpStream, StreamError>
where
    I: IntoIterator<Item = SocketAddr>,
{
    let mut last_err = None;
    for sa in candidates {
        match TcpStream::connect_timeout(&sa, timeout) {
            Ok(s) => return Ok(s),
            Err(e) => last_err = Some(e),
        }
    }
    match last_err {
        Some(source) => Err(StreamError::Connection { addr: addr.to_string(), source }),
        None => Err(StreamError::Resolve(addr.to_string())),
    }
}

/// io::Error is not Clone; keep kind and message for the recorded failure.
fn duplicate_connect_error(e: &StreamError) -> StreamError {
    match e {
        StreamError::Connection { addr, source } => StreamError::Connection {
            addr: addr.clone(),
            source: io::Error::new(source.kind(), source.to_string()),
        },
        StreamError::Resolve(addr) => StreamError::Resolve(addr.clone()),
        other => StreamError::Config(other.to_string()),
    }
}
