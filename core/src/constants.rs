//! Protocol and receiver defaults shared across the crate.

/// Conventional port of the audio streamer.
pub const DEFAULT_AUDIO_PORT: u16 = 50001;
/// Conventional port of the video streamer.
pub const DEFAULT_VIDEO_PORT: u16 = 50002;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Upper bound for a single `read()` call on the socket.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Pending decoded audio frames before the network thread stalls.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Audio header: channels, samples, sample_rate (3 × u32 LE).
pub const AUDIO_HEADER_LEN: usize = 3 * 4;
/// Video optics header: focal_x, focal_y (2 × f32 LE).
pub const OPTICS_HEADER_LEN: usize = 2 * 4;
/// Video geometry header: width, height (2 × u32 LE).
pub const GEOMETRY_HEADER_LEN: usize = 2 * 4;

/// Bytes per audio sample on the wire (f32).
pub const AUDIO_SAMPLE_LEN: usize = 4;

/// BT.601 (video range) NV12 → RGB coefficients.
pub mod bt601 {
    pub const LUMA_OFFSET: f32 = 16.0;
    pub const CHROMA_OFFSET: f32 = 128.0;

    pub const Y_GAIN: f32 = 1.164383;
    pub const R_FROM_V: f32 = 1.596027;
    pub const G_FROM_U: f32 = 0.391762;
    pub const G_FROM_V: f32 = 0.812968;
    pub const B_FROM_U: f32 = 2.017232;
}

/// Thread names for the decode loops.
pub mod thread_names {
    pub const AUDIO: &str = "audio-receiver";
    pub const VIDEO: &str = "video-receiver";
}
