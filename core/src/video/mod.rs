//! Video stream: header/payload decoding, NV12 → RGB conversion and the
//! single-slot hand-off that keeps only the newest frame.

pub mod nv12;
pub mod frame;
pub mod decoder;
pub mod slot;

pub use nv12::{nv12_to_rgb, ImageError, RgbImage};
pub use frame::VideoFrame;
pub use decoder::VideoDecoder;
pub use slot::LastFrameSlot;
