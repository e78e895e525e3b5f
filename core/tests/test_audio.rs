// Audio framing + decoder:
// * header/payload round-trip into (samples, channels)
// * clean end-of-stream at and inside a frame
// * empty frames, oversized declarations, overflow
// * sample matrix helpers

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use media_core::audio::{decode_audio_payload, AudioDecoder, AudioFrame};
    use media_core::decoder::{DecodeStep, FrameDecoder, ReadLimits};
    use media_core::framing::decode::parse_audio_header;
    use media_core::framing::encode::encode_audio_frame;
    use media_core::framing::{AudioHeader, FrameError};
    use media_core::telemetry::{TelemetryCounters, TelemetrySnapshot};
    use media_core::types::StreamError;
    use proptest::prelude::*;

    fn decoder() -> (AudioDecoder, Arc<TelemetryCounters>) {
        let telemetry = Arc::new(TelemetryCounters::default());
        (AudioDecoder::new(ReadLimits::default(), telemetry.clone()), telemetry)
    }

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32 * 0.25 - 1.0).collect()
    }

    fn expect_frame(step: DecodeStep<AudioFrame>) -> AudioFrame {
        match step {
            DecodeStep::Frame(f) => f,
            other => panic!("expected frame, got {:?}", other),
        }
    }

// # ✅ 1. Header layout

    #[test]
    fn header_is_three_le_u32() {
        let wire = [2, 0, 0, 0, 0x80, 0, 0, 0, 0x80, 0xBB, 0, 0];
        let h = parse_audio_header(&wire).unwrap();
        assert_eq!(h, AudioHeader::new(2, 128, 48_000));
        assert_eq!(h.payload_len().unwrap(), 2 * 128 * 4);
    }

    #[test]
    fn short_header_buffer_is_rejected() {
        assert!(matches!(
            parse_audio_header(&[0u8; 11]),
            Err(FrameError::Truncated { need: 12, have: 11 })
        ));
    }

// # ✅ 2. Decoder round-trip and ordering

    #[test]
    fn decodes_consecutive_frames_in_order() {
        let h1 = AudioHeader::new(2, 3, 16_000);
        let h2 = AudioHeader::new(2, 1, 16_000);
        let mut wire = encode_audio_frame(&h1, &ramp(6)).unwrap();
        wire.extend(encode_audio_frame(&h2, &[9.0, -9.0]).unwrap());

        let (mut dec, telemetry) = decoder();
        let mut src = Cursor::new(wire);

        let a = expect_frame(dec.next_frame(&mut src).unwrap());
        assert_eq!(a.shape(), (3, 2));
        assert_eq!(a.sample_rate, 16_000);
        assert_eq!(a.row(1), Some(&[-0.5f32, -0.25][..]));

        let b = expect_frame(dec.next_frame(&mut src).unwrap());
        assert_eq!(b.data, vec![9.0, -9.0]);

        assert!(matches!(dec.next_frame(&mut src).unwrap(), DecodeStep::EndOfStream { received: 0 }));

        let snap = TelemetrySnapshot::from(&telemetry, None);
        assert_eq!(snap.frames_decoded, 2);
        assert_eq!(snap.bytes_header, 24);
        assert_eq!(snap.bytes_payload, (6 + 2) * 4);
    }

    #[test]
    fn close_mid_payload_is_end_of_stream_not_error() {
        let h = AudioHeader::new(1, 4, 8000);
        let mut wire = encode_audio_frame(&h, &ramp(4)).unwrap();
        wire.truncate(AudioHeader::LEN + 6);

        let (mut dec, _) = decoder();
        let step = dec.next_frame(&mut Cursor::new(wire)).unwrap();
        assert!(matches!(step, DecodeStep::EndOfStream { received } if received == AudioHeader::LEN + 6));
        assert_eq!(dec.pending_header(), Some(h));
    }

    #[test]
    fn close_mid_header_reports_partial_bytes() {
        let (mut dec, _) = decoder();
        let step = dec.next_frame(&mut Cursor::new(vec![1u8, 0, 0])).unwrap();
        assert!(matches!(step, DecodeStep::EndOfStream { received: 3 }));
    }

// # ✅ 3. Empty frames keep the stream in sync

    #[test]
    fn zero_channel_frame_is_consumed_and_skipped() {
        let mut wire = encode_audio_frame(&AudioHeader::new(0, 512, 48_000), &[]).unwrap();
        wire.extend(encode_audio_frame(&AudioHeader::new(1, 2, 48_000), &[0.5, 0.75]).unwrap());

        let (mut dec, _) = decoder();
        let mut src = Cursor::new(wire);
        assert!(matches!(dec.next_frame(&mut src).unwrap(), DecodeStep::Empty));
        assert_eq!(expect_frame(dec.next_frame(&mut src).unwrap()).data, vec![0.5, 0.75]);
    }

// # ❌ 4. Hardening

    #[test]
    fn payload_above_cap_is_fatal_before_reading() {
        let limits = ReadLimits { max_payload_bytes: Some(1024), ..ReadLimits::default() };
        let mut dec = AudioDecoder::new(limits, Arc::new(TelemetryCounters::default()));

        // header only: a 2 x 1000 frame would need 8000 bytes
        let wire = encode_audio_frame(&AudioHeader::new(2, 1000, 48_000), &ramp(2000)).unwrap();
        let err = dec.next_frame(&mut Cursor::new(wire[..12].to_vec())).unwrap_err();

        assert!(matches!(
            err,
            StreamError::Frame(FrameError::PayloadTooLarge { len: 8000, max: 1024 })
        ));
    }

    #[test]
    fn overflowing_declaration_is_fatal() {
        let h = AudioHeader::new(u32::MAX, u32::MAX, 1);
        assert!(matches!(h.payload_len(), Err(FrameError::LengthOverflow { .. })));
    }

    #[test]
    fn decode_payload_rejects_wrong_length() {
        let h = AudioHeader::new(2, 2, 1);
        assert!(matches!(
            decode_audio_payload(&h, &[0u8; 15]),
            Err(FrameError::LengthMismatch { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn encoder_rejects_sample_count_mismatch() {
        let h = AudioHeader::new(2, 2, 1);
        assert!(matches!(
            encode_audio_frame(&h, &[0.0; 3]),
            Err(FrameError::LengthMismatch { expected: 4, actual: 3 })
        ));
    }

// # ✅ 5. Matrix helpers

    #[test]
    fn channel_and_element_views() {
        let f = AudioFrame::new(2, 48_000, vec![0.0, 10.0, 1.0, 11.0, 2.0, 12.0, 3.0, 13.0]);
        assert_eq!(f.channel(1), Some(vec![10.0, 11.0, 12.0, 13.0]));
        assert_eq!(f.channel(2), None);
        assert_eq!(f.get(3, 0), Some(3.0));
        assert_eq!(f.get(4, 0), None);
    }

    #[test]
    fn huge_indices_are_out_of_range() {
        let f = AudioFrame::new(2, 48_000, vec![7.0, 8.0, 9.0, 10.0]);
        assert_eq!(f.get(usize::MAX / 2 + 1, 0), None);
        assert_eq!(f.get(0, usize::MAX), None);
        assert_eq!(f.get(1, 1), Some(10.0));
        assert_eq!(f.row(usize::MAX / 2), None);
        assert_eq!(f.row(usize::MAX), None);
    }

    #[test]
    fn layout_includes_sample_rate() {
        let a = AudioFrame::new(1, 48_000, vec![1.0]);
        assert!(a.same_layout(&AudioFrame::new(1, 48_000, vec![2.0])));
        assert!(!a.same_layout(&AudioFrame::new(1, 16_000, vec![2.0])));
        assert!(!a.same_layout(&AudioFrame::new(2, 48_000, vec![2.0, 3.0])));
    }

// # 🔁 6. Round-trip property

    proptest! {
        #[test]
        fn roundtrip_any_header(
            channels in 1u32..9,
            samples in 1u32..300,
            rate in any::<u32>(),
            seed in any::<u32>(),
        ) {
            let h = AudioHeader::new(channels, samples, rate);
            let n = (channels * samples) as usize;
            let data: Vec<f32> = (0..n)
                .map(|i| ((i as u32).wrapping_mul(2_654_435_761) ^ seed) as f32 / u32::MAX as f32)
                .collect();

            let wire = encode_audio_frame(&h, &data).unwrap();
            let (mut dec, _) = decoder();
            let frame = expect_frame(dec.next_frame(&mut Cursor::new(wire)).unwrap());

            prop_assert_eq!(frame.shape(), (samples as usize, channels as usize));
            prop_assert_eq!(frame.sample_rate, rate);
            prop_assert_eq!(frame.data, data);
        }

        #[test]
        fn payload_bytes_reinterpret_as_le_f32(
            channels in 1u32..5,
            samples in 1u32..50,
            bytes_seed in proptest::collection::vec(any::<u8>(), 4 * 200),
        ) {
            let h = AudioHeader::new(channels, samples, 44_100);
            let len = h.payload_len().unwrap();
            let payload = &bytes_seed[..len];

            let frame = decode_audio_payload(&h, payload).unwrap();
            for (i, chunk) in payload.chunks_exact(4).enumerate() {
                let expected = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                prop_assert_eq!(frame.data[i].to_bits(), expected.to_bits());
            }
        }
    }
}
