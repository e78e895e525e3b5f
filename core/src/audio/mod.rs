//! Audio stream: header/payload decoding into sample matrices and the
//! bounded channel that carries them to the consumer.

pub mod frame;
pub mod decoder;
pub mod channel;

pub use frame::AudioFrame;
pub use decoder::{AudioDecoder, decode_audio_payload};
pub use channel::{FrameChannel, PushOutcome};
