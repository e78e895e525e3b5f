// ## 📂 File: `src/video/nv12.rs`
// ## NV12 → RGB (BT.601 video range)

use std::fmt;

use crate::constants::bt601::{
    B_FROM_U, CHROMA_OFFSET, G_FROM_U, G_FROM_V, LUMA_OFFSET, R_FROM_V, Y_GAIN,
};

/// 8-bit RGB image, row-major, shape `(height, width, 3)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RgbImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 3]>,
}

impl RgbImage {
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, 3)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width {
            return None;
        }
        let idx = y.checked_mul(self.width)?.checked_add(x)?;
        self.pixels.get(idx).copied()
    }

    /// Flat `R, G, B, R, G, B, ...` view, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn row(&self, y: usize) -> Option<&[[u8; 3]]> {
        let start = y.checked_mul(self.width)?;
        self.pixels.get(start..start.checked_add(self.width)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Buffer cannot be laid out as an NV12 image of this width.
    InvalidImageDimensions {
        len: usize,
        width: usize,
        reason: &'static str,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::InvalidImageDimensions { len, width, reason } =>
                write!(f, "invalid image dimensions ({} bytes, width {}): {}", len, width, reason),
        }
    }
}

impl std::error::Error for ImageError {}

/// Convert one NV12 buffer laid out as `rows = len / width` rows of `width` bytes.
///
/// `rows` must be divisible by 3: the first `rows*2/3` rows are luma, the
/// rest interleaved U,V at half resolution. Each channel is computed in
/// full precision, clamped to `[0, 255]`, then truncated.
pub fn nv12_to_rgb(buf: &[u8], width: usize) -> Result<RgbImage, ImageError> {
    let invalid = |reason| ImageError::InvalidImageDimensions { len: buf.len(), width, reason };

    if width == 0 || buf.is_empty() {
        return Err(invalid("empty image"));
    }
    if buf.len() % width != 0 {
        return Err(invalid("buffer is not a whole number of rows"));
    }
    let rows = buf.len() / width;
    if rows % 3 != 0 {
        return Err(invalid("row count not divisible by 3"));
    }
    if width % 2 != 0 {
        return Err(invalid("odd width has no U/V column pairs"));
    }

    let height = rows * 2 / 3;
    let (luma, chroma) = buf.split_at(height * width);

    let mut pixels = Vec::with_capacity(height * width);
    for y in 0..height {
        let luma_row = &luma[y * width..(y + 1) * width];
        let chroma_row = &chroma[(y / 2) * width..(y / 2 + 1) * width];

        for (x, &l) in luma_row.iter().enumerate() {
            let c = x & !1;
            pixels.push(yuv_to_rgb(l, chroma_row[c], chroma_row[c + 1]));
        }
    }

    Ok(RgbImage { width, height, pixels })
}

/// One pixel with the fixed BT.601-derived coefficients.
#[inline(always)]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let y = y as f32 - LUMA_OFFSET;
    let u = u as f32 - CHROMA_OFFSET;
    let v = v as f32 - CHROMA_OFFSET;

    let r = Y_GAIN * y + R_FROM_V * v;
    let g = Y_GAIN * y - G_FROM_U * u - G_FROM_V * v;
    let b = Y_GAIN * y + B_FROM_U * u;

    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

#[inline(always)]
fn clamp_u8(x: f32) -> u8 {
    x.clamp(0.0, 255.0) as u8
}
