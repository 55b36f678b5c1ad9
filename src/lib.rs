#![warn(missing_docs)]

//! # voxprep: audio ingestion and denoising for speech pipelines
//!
//! Decodes arbitrary audio sources into canonical mono PCM at 16 kHz,
//! optionally suppresses background noise through a 48 kHz frame-based
//! engine, and converts centisecond offsets into display timestamps.
//!
//! ## Quick Start
//!
//! ```ignore
//! use voxprep::decoder::AudioIngest;
//! use voxprep::filter::FrameDenoiser;
//! use voxprep::processor::DenoisePipeline;
//!
//! // Decode anything symphonia understands into mono 16 kHz samples
//! let (mut buffer, _split) = AudioIngest::new().load("speech.ogg", false)?;
//!
//! // Suppress background noise in place
//! let mut pipeline = DenoisePipeline::new();
//! pipeline.process(&mut FrameDenoiser::new(), &mut buffer)?;
//! ```

// Declare modules
/// Core audio types and timestamp conversions
pub mod core;
/// Error types for audio operations
pub mod error;
/// Audio ingestion from files and streams
pub mod decoder;
/// Sample rate conversion and noise suppression stages
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Audio processing pipelines
pub mod processor;
/// External text-to-speech invocation
pub mod speech;

// Export public types
pub use crate::core::{SampleBuffer, StereoSplit, TARGET_SAMPLE_RATE};
pub use crate::error::{AudioError, AudioResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
