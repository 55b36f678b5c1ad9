//! Audio processing pipeline implementations

pub mod denoise;

pub use denoise::DenoisePipeline;
