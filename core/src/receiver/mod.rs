//! Receiver lifecycle.
//!
//! A receiver owns one TCP connection and one decode thread. Consumers poll
//! the hand-off structure (`get()` / `last_frame()`) on their own schedule
//! and use `state()` to tell "no new data yet" from "stream ended".

pub mod state;
pub mod sink;
pub mod worker;
pub mod stream;
pub mod audio;
pub mod video;

pub use state::ReceiverState;
pub use sink::{Delivery, FrameSink};
pub use worker::{run_receive_loop, LoopContext, LoopExit};
pub use stream::StreamReceiver;
pub use audio::AudioReceiver;
pub use video::VideoReceiver;
