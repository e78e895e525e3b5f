// ## 📂 File: `src/video/decoder.rs`
// ## Video frames: [f32 fx][f32 fy][u32 width][u32 height][NV12 bytes]

use std::io::Read;
use std::sync::Arc;

use crate::decoder::{complete_or_eof, DecodeStep, FrameDecoder, ReadLimits};
use crate::framing::decode::{parse_geometry_header, parse_optics_header};
use crate::framing::{GeometryHeader, OpticsHeader};
use crate::telemetry::TelemetryCounters;
use crate::types::StreamError;
use crate::video::frame::VideoFrame;
use crate::video::nv12::nv12_to_rgb;

const HEADERS_LEN: usize = OpticsHeader::LEN + GeometryHeader::LEN;

#[derive(Debug, Clone, Copy, PartialEq)]
enum VideoState {
    AwaitingOptics,
    AwaitingGeometry(OpticsHeader),
    AwaitingPayload(OpticsHeader, GeometryHeader),
}

#[derive(Debug)]
pub struct VideoDecoder {
    state: VideoState,
    limits: ReadLimits,
    telemetry: Arc<TelemetryCounters>,
}

impl VideoDecoder {
    pub fn new(limits: ReadLimits, telemetry: Arc<TelemetryCounters>) -> Self {
        Self { state: VideoState::AwaitingOptics, limits, telemetry }
    }
}

impl FrameDecoder for VideoDecoder {
    type Output = VideoFrame;

    fn name(&self) -> &'static str {
        "VIDEO"
    }

    fn next_frame<R: Read>(&mut self, r: &mut R) -> Result<DecodeStep<VideoFrame>, StreamError> {
        loop {
            match self.state {
                VideoState::AwaitingOptics => {
                    let wire = complete_or_eof!(self.limits.read(r, OpticsHeader::LEN)?, 0);
                    let optics = parse_optics_header(&wire)?;
                    self.state = VideoState::AwaitingGeometry(optics);
                }
                VideoState::AwaitingGeometry(optics) => {
                    let wire = complete_or_eof!(self.limits.read(r, GeometryHeader::LEN)?, OpticsHeader::LEN);
                    let geometry = parse_geometry_header(&wire)?;
                    log::trace!(
                        "[VIDEO] header: {}x{} focal=({}, {})",
                        geometry.width, geometry.height, optics.focal_x, optics.focal_y
                    );
                    self.state = VideoState::AwaitingPayload(optics, geometry);
                }
                VideoState::AwaitingPayload(optics, geometry) => {
                    let len = geometry.payload_len()?;
                    let wire = complete_or_eof!(self.limits.read_payload(r, len)?, HEADERS_LEN);
                    self.state = VideoState::AwaitingOptics;
                    self.telemetry.add_frame(HEADERS_LEN, len);

                    // The payload is fully consumed, so a bad frame is skipped
                    // without losing sync.
                    return match nv12_to_rgb(&wire, geometry.width as usize) {
                        Ok(image) => Ok(DecodeStep::Frame(VideoFrame { optics, geometry, image })),
                        Err(e) => Ok(DecodeStep::Skipped(e.into())),
                    };
                }
            }
        }
    }
}
