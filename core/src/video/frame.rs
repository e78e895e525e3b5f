use crate::framing::{GeometryHeader, OpticsHeader};
use crate::video::nv12::RgbImage;

/// A converted video frame with the optics it was captured with.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoFrame {
    pub optics: OpticsHeader,
    pub geometry: GeometryHeader,
    pub image: RgbImage,
}

impl VideoFrame {
    pub fn width(&self) -> usize {
        self.image.width
    }

    pub fn height(&self) -> usize {
        self.image.height
    }
}
