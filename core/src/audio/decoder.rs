// ## 📂 File: `src/audio/decoder.rs`
// ## Audio frames: [u32 channels][u32 samples][u32 sample_rate][f32 × channels*samples]

use std::io::Read;
use std::sync::Arc;

use crate::audio::frame::AudioFrame;
use crate::decoder::{complete_or_eof, DecodeStep, FrameDecoder, ReadLimits};
use crate::framing::decode::{decode_f32_payload, parse_audio_header};
use crate::framing::{AudioHeader, FrameError};
use crate::telemetry::TelemetryCounters;
use crate::types::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioState {
    AwaitingHeader,
    AwaitingPayload(AudioHeader),
}

/// Two-state decoder: header, then payload, then back to header.
#[derive(Debug)]
pub struct AudioDecoder {
    state: AudioState,
    limits: ReadLimits,
    telemetry: Arc<TelemetryCounters>,
}

impl AudioDecoder {
    pub fn new(limits: ReadLimits, telemetry: Arc<TelemetryCounters>) -> Self {
        Self { state: AudioState::AwaitingHeader, limits, telemetry }
    }

    /// Header of the frame whose payload is pending, if any.
    pub fn pending_header(&self) -> Option<AudioHeader> {
        match self.state {
            AudioState::AwaitingHeader => None,
            AudioState::AwaitingPayload(h) => Some(h),
        }
    }
}

impl FrameDecoder for AudioDecoder {
    type Output = AudioFrame;

    fn name(&self) -> &'static str {
        "AUDIO"
    }

    fn next_frame<R: Read>(&mut self, r: &mut R) -> Result<DecodeStep<AudioFrame>, StreamError> {
        loop {
            match self.state {
                AudioState::AwaitingHeader => {
                    let wire = complete_or_eof!(self.limits.read(r, AudioHeader::LEN)?, 0);
                    let header = parse_audio_header(&wire)?;
                    log::trace!(
                        "[AUDIO] header: channels={} samples={} rate={}",
                        header.channels, header.samples, header.sample_rate
                    );
                    self.state = AudioState::AwaitingPayload(header);
                }
                AudioState::AwaitingPayload(header) => {
                    let len = header.payload_len()?;
                    let wire = complete_or_eof!(self.limits.read_payload(r, len)?, AudioHeader::LEN);
                    self.state = AudioState::AwaitingHeader;
                    self.telemetry.add_frame(AudioHeader::LEN, len);

                    if header.is_empty() {
                        log::debug!("[AUDIO] empty frame (channels={}, samples={})", header.channels, header.samples);
                        return Ok(DecodeStep::Empty);
                    }

                    return Ok(DecodeStep::Frame(decode_audio_payload(&header, &wire)?));
                }
            }
        }
    }
}

/// Reconstruct the `(samples, channels)` matrix from a payload that matches `header`.
pub fn decode_audio_payload(header: &AudioHeader, payload: &[u8]) -> Result<AudioFrame, FrameError> {
    let data = decode_f32_payload(header, payload)?;
    Ok(AudioFrame::from_header(header, data))
}
