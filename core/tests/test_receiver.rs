// Receiver lifecycle over loopback TCP:
// * audio frames arrive in order, end of stream → Closed
// * video keeps only the newest frame, bad frames are skipped
// * stop() from idle, blocked-on-read and blocked-on-backpressure
// * connection refused (with and without timeout), oversize payload, double start

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::net::{SocketAddr, TcpListener, TcpStream};
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    use media_core::config::ReceiverConfig;
    use media_core::framing::encode::{encode_audio_frame, encode_video_frame};
    use media_core::framing::{AudioHeader, FrameError, GeometryHeader, OpticsHeader};
    use media_core::receiver::{AudioReceiver, ReceiverState, VideoReceiver};
    use media_core::types::StreamError;

    const WAIT: Duration = Duration::from_secs(5);

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// One-shot streamer: accepts a single client and hands it to `serve`.
    fn streamer<F>(serve: F) -> (SocketAddr, JoinHandle<()>)
    where
        F: FnOnce(TcpStream) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (sock, _) = listener.accept().unwrap();
            serve(sock);
        });
        (addr, handle)
    }

    fn config_for(addr: SocketAddr) -> ReceiverConfig {
        ReceiverConfig::new(addr.ip().to_string(), addr.port())
    }

    fn audio_wire(channels: u32, values: &[f32]) -> Vec<u8> {
        let h = AudioHeader::new(channels, values.len() as u32 / channels, 48_000);
        encode_audio_frame(&h, values).unwrap()
    }

    fn video_wire(width: u32, height: u32, luma: u8) -> Vec<u8> {
        let g = GeometryHeader::new(width, height);
        let mut nv12 = vec![luma; (width * height) as usize];
        nv12.resize(g.payload_len().unwrap(), 128);
        encode_video_frame(&OpticsHeader { focal_x: 1.0, focal_y: 1.0 }, &g, &nv12).unwrap()
    }

    fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + WAIT;
        while Instant::now() < deadline {
            if cond() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

// # ✅ 1. Audio

    #[test]
    fn audio_frames_then_close() {
        init_log();
        let (addr, server) = streamer(|mut sock| {
            sock.write_all(&audio_wire(2, &[1.0, 2.0, 3.0, 4.0])).unwrap();
            // split the second frame across writes
            let wire = audio_wire(2, &[5.0, 6.0]);
            sock.write_all(&wire[..7]).unwrap();
            sock.flush().unwrap();
            thread::sleep(Duration::from_millis(20));
            sock.write_all(&wire[7..]).unwrap();
        });

        let mut rx = AudioReceiver::new(config_for(addr));
        assert_eq!(rx.state(), ReceiverState::Idle);
        assert_eq!(rx.get(), None);

        rx.start().unwrap();
        assert!(rx.peer().is_some());
        server.join().unwrap();

        assert_eq!(rx.wait_finished(WAIT), ReceiverState::Closed);
        assert!(rx.failure().is_none());

        let block = rx.get().unwrap();
        assert_eq!(block.shape(), (3, 2));
        assert_eq!(block.data, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(rx.get(), None);

        let t = rx.telemetry();
        assert_eq!(t.frames_decoded, 2);
        assert_eq!(t.frames_delivered, 2);
        assert!(t.sanity_check());

        rx.stop();
        assert_eq!(rx.state(), ReceiverState::Closed);
    }

    #[test]
    fn close_mid_frame_is_closed_and_counted() {
        init_log();
        let (addr, server) = streamer(|mut sock| {
            sock.write_all(&audio_wire(1, &[0.5])).unwrap();
            let wire = audio_wire(1, &[1.0, 2.0, 3.0]);
            sock.write_all(&wire[..14]).unwrap();
        });

        let mut rx = AudioReceiver::new(config_for(addr));
        rx.start().unwrap();
        server.join().unwrap();

        assert_eq!(rx.wait_finished(WAIT), ReceiverState::Closed);
        assert_eq!(rx.get_frames().len(), 1);
        assert_eq!(rx.telemetry().truncated_frames, 1);
    }

// # ✅ 2. Video

    #[test]
    fn video_keeps_newest_frame_and_skips_bad_ones() {
        init_log();
        let (addr, server) = streamer(|mut sock| {
            sock.write_all(&video_wire(4, 2, 16)).unwrap();
            // 4 x 3 cannot be laid out as NV12 rows
            sock.write_all(&video_wire(4, 3, 100)).unwrap();
            sock.write_all(&video_wire(2, 2, 235)).unwrap();
        });

        let mut rx = VideoReceiver::new(config_for(addr));
        assert!(rx.last_frame().is_none());
        rx.start().unwrap();
        server.join().unwrap();

        assert_eq!(rx.wait_finished(WAIT), ReceiverState::Closed);

        let frame = rx.last_frame().unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 2));
        assert!(frame.image.pixels.iter().all(|p| *p == [254, 254, 254]));
        assert_eq!(rx.frame_version(), 2);
        assert!(rx.last_frame_if_newer(2).is_none());

        let t = rx.telemetry();
        assert_eq!(t.frames_decoded, 3);
        assert_eq!(t.frames_skipped, 1);
        assert_eq!(t.frames_delivered, 2);
    }

// # ✅ 3. Stop

    #[test]
    fn stop_while_waiting_for_data() {
        init_log();
        let (done_tx, done_rx) = crossbeam::channel::bounded::<()>(1);
        let (addr, server) = streamer(move |sock| {
            // hold the connection open without sending anything
            let _ = done_rx.recv_timeout(WAIT);
            drop(sock);
        });

        let mut rx = AudioReceiver::new(config_for(addr));
        rx.start().unwrap();
        assert!(rx.is_running());

        rx.stop();
        assert_eq!(rx.state(), ReceiverState::Closed);
        assert!(!rx.is_running());
        // idempotent
        rx.stop();
        assert_eq!(rx.state(), ReceiverState::Closed);

        let _ = done_tx.send(());
        server.join().unwrap();
    }

    #[test]
    fn stop_while_producer_blocked_on_full_channel() {
        init_log();
        let (done_tx, done_rx) = crossbeam::channel::bounded::<()>(1);
        let (addr, server) = streamer(move |mut sock| {
            for i in 0..20 {
                if sock.write_all(&audio_wire(1, &[i as f32])).is_err() {
                    return;
                }
            }
            let _ = done_rx.recv_timeout(WAIT);
        });

        let mut rx = AudioReceiver::new(config_for(addr).with_queue_capacity(2));
        rx.start().unwrap();

        assert!(wait_until(|| rx.pending() == 2));
        assert_eq!(rx.state(), ReceiverState::Streaming);

        rx.stop();
        assert_eq!(rx.state(), ReceiverState::Closed);

        // what made it into the channel is still readable, in order
        assert_eq!(rx.get().unwrap().data, vec![0.0, 1.0]);
        let _ = done_tx.send(());
        server.join().unwrap();
    }

    #[test]
    fn stop_before_start_closes() {
        let mut rx = AudioReceiver::new(ReceiverConfig::default());
        rx.stop();
        assert_eq!(rx.state(), ReceiverState::Closed);
        assert!(matches!(rx.start(), Err(StreamError::InvalidState { op: "start", .. })));
    }

// # ❌ 4. Failures

    #[test]
    fn connection_refused_fails_start() {
        init_log();
        // bind then drop to get a port with nothing listening
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let mut rx = AudioReceiver::new(config_for(addr));
        let err = rx.start().unwrap_err();

        assert!(matches!(err, StreamError::Connection { .. }));
        assert_eq!(rx.state(), ReceiverState::Failed);
        assert!(matches!(rx.failure().as_deref(), Some(StreamError::Connection { .. })));
        assert!(rx.get().is_none());
    }

    #[test]
    fn connect_timeout_streams_like_blocking_connect() {
        init_log();
        let (addr, server) = streamer(|mut sock| {
            sock.write_all(&audio_wire(1, &[0.25, 0.5])).unwrap();
        });

        let cfg = config_for(addr).with_connect_timeout(Duration::from_secs(2));
        let mut rx = AudioReceiver::new(cfg);
        rx.start().unwrap();
        assert_eq!(rx.peer(), Some(addr));
        server.join().unwrap();

        assert_eq!(rx.wait_finished(WAIT), ReceiverState::Closed);
        assert_eq!(rx.get().unwrap().data, vec![0.25, 0.5]);
    }

    #[test]
    fn connect_timeout_refused_fails_start() {
        init_log();
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

        let cfg = config_for(addr).with_connect_timeout(Duration::from_millis(500));
        let mut rx = VideoReceiver::new(cfg);
        let err = rx.start().unwrap_err();

        assert!(matches!(err, StreamError::Connection { .. }));
        assert_eq!(rx.state(), ReceiverState::Failed);
        assert!(matches!(rx.failure().as_deref(), Some(StreamError::Connection { .. })));
    }

    #[test]
    fn oversized_declaration_fails_stream() {
        init_log();
        let (addr, server) = streamer(|mut sock| {
            // header only: 2 x 100_000 samples
            let wire = audio_wire(2, &vec![0.0; 200_000]);
            let _ = sock.write_all(&wire[..12]);
            thread::sleep(Duration::from_millis(100));
        });

        let mut rx = AudioReceiver::new(config_for(addr).with_max_payload_bytes(64 * 1024));
        rx.start().unwrap();

        assert_eq!(rx.wait_finished(WAIT), ReceiverState::Failed);
        assert!(matches!(
            rx.failure().as_deref(),
            Some(StreamError::Frame(FrameError::PayloadTooLarge { len: 800_000, max: 65_536 }))
        ));
        server.join().unwrap();
    }

    #[test]
    fn start_twice_is_rejected() {
        init_log();
        let (addr, server) = streamer(|_sock| {});

        let mut rx = AudioReceiver::new(config_for(addr));
        rx.start().unwrap();
        assert!(matches!(rx.start(), Err(StreamError::InvalidState { op: "start", .. })));

        server.join().unwrap();
        rx.stop();
    }

    #[test]
    fn invalid_config_is_rejected_before_connecting() {
        let mut rx = AudioReceiver::new(ReceiverConfig::default().with_queue_capacity(0));
        assert!(matches!(rx.start(), Err(StreamError::Config(_))));
        assert_eq!(rx.state(), ReceiverState::Idle);
    }
}
