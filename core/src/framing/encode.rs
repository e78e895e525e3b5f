use byteorder::{ByteOrder, LittleEndian};

use crate::framing::types::{AudioHeader, FrameError, GeometryHeader, OpticsHeader};

/// Encode one audio frame into wire format.
///
/// Layout:
///
/// ```text
/// [ channels (4) ]
/// [ samples (4) ]
/// [ sample_rate (4) ]
/// [ samples * channels × f32 (interleaved) ]
/// ```
pub fn encode_audio_frame(header: &AudioHeader, samples: &[f32]) -> Result<Vec<u8>, FrameError> {
    let expected = header.value_count()?;
    if samples.len() != expected {
        return Err(FrameError::LengthMismatch { expected, actual: samples.len() });
    }

    let mut out = vec![0u8; AudioHeader::LEN + header.payload_len()?];

    // --- Header ---
    LittleEndian::write_u32(&mut out[0..4], header.channels);
    LittleEndian::write_u32(&mut out[4..8], header.samples);
    LittleEndian::write_u32(&mut out[8..12], header.sample_rate);

    // --- Body ---
    LittleEndian::write_f32_into(samples, &mut out[AudioHeader::LEN..]);

    Ok(out)
}

/// Encode one video frame into wire format.
///
/// Layout:
///
/// ```text
/// [ focal_x (4) ]
/// [ focal_y (4) ]
/// [ width (4) ]
/// [ height (4) ]
/// [ width * height * 3 / 2 bytes NV12 ]
/// ```
pub fn encode_video_frame(
    optics: &OpticsHeader,
    geometry: &GeometryHeader,
    nv12: &[u8],
) -> Result<Vec<u8>, FrameError> {
    let expected = geometry.payload_len()?;
    if nv12.len() != expected {
        return Err(FrameError::LengthMismatch { expected, actual: nv12.len() });
    }

    const HDR: usize = OpticsHeader::LEN + GeometryHeader::LEN;
    let mut out = vec![0u8; HDR];

    LittleEndian::write_f32(&mut out[0..4], optics.focal_x);
    LittleEndian::write_f32(&mut out[4..8], optics.focal_y);
    LittleEndian::write_u32(&mut out[8..12], geometry.width);
    LittleEndian::write_u32(&mut out[12..16], geometry.height);
    out.extend_from_slice(nv12);

    Ok(out)
}
