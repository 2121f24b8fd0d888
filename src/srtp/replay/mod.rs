//! Replay detection for SRTP sequence numbers and SRTCP indices.
pub(crate) mod fixed_big_int;
pub mod noop_replay_detector;
pub mod replay_detector;
pub mod replay_protection;
pub mod sliding_window_detector;
pub mod wrapped_sliding_window_detector;

pub use noop_replay_detector::NoOpReplayDetector;
pub use replay_detector::ReplayDetector;
pub use replay_protection::ReplayProtection;
pub use sliding_window_detector::SlidingWindowDetector;
pub use wrapped_sliding_window_detector::WrappedSlidingWindowDetector;
