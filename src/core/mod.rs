//! Core audio types and timestamp conversions

/// Sample buffer and channel-split types
pub mod audio;
/// Centisecond timestamp formatting and sample index mapping
pub mod time;

pub use audio::{SampleBuffer, StereoSplit, TARGET_SAMPLE_RATE};
