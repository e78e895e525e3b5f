use byteorder::{ByteOrder, LittleEndian};

use crate::framing::types::{AudioHeader, FrameError, GeometryHeader, OpticsHeader};

#[inline]
fn ensure_len(wire: &[u8], need: usize) -> Result<(), FrameError> {
    if wire.len() < need {
        return Err(FrameError::Truncated { need, have: wire.len() });
    }
    Ok(())
}

/// Parse `[u32 channels][u32 samples][u32 sample_rate]`.
#[inline]
pub fn parse_audio_header(wire: &[u8]) -> Result<AudioHeader, FrameError> {
    ensure_len(wire, AudioHeader::LEN)?;

    Ok(AudioHeader {
        channels: LittleEndian::read_u32(&wire[0..4]),
        samples: LittleEndian::read_u32(&wire[4..8]),
        sample_rate: LittleEndian::read_u32(&wire[8..12]),
    })
}

/// Parse `[f32 focal_x][f32 focal_y]`.
#[inline]
pub fn parse_optics_header(wire: &[u8]) -> Result<OpticsHeader, FrameError> {
    ensure_len(wire, OpticsHeader::LEN)?;

    Ok(OpticsHeader {
        focal_x: LittleEndian::read_f32(&wire[0..4]),
        focal_y: LittleEndian::read_f32(&wire[4..8]),
    })
}

/// Parse `[u32 width][u32 height]`.
#[inline]
pub fn parse_geometry_header(wire: &[u8]) -> Result<GeometryHeader, FrameError> {
    ensure_len(wire, GeometryHeader::LEN)?;

    Ok(GeometryHeader {
        width: LittleEndian::read_u32(&wire[0..4]),
        height: LittleEndian::read_u32(&wire[4..8]),
    })
}

/// Reinterpret a little-endian f32 payload.
///
/// Caller guarantees the payload belongs to `header`; the length is still
/// checked so a mismatched buffer is an error rather than a panic.
pub fn decode_f32_payload(header: &AudioHeader, payload: &[u8]) -> Result<Vec<f32>, FrameError> {
    let expected = header.payload_len()?;
    if payload.len() != expected {
        return Err(FrameError::LengthMismatch { expected, actual: payload.len() });
    }

    let mut samples = vec![0f32; header.value_count()?];
    LittleEndian::read_f32_into(payload, &mut samples);
    Ok(samples)
}
