//! Sample rate conversion and noise suppression stages

pub mod resample;
pub mod denoise;

pub use resample::RateConverter;
pub use denoise::{FrameDenoiser, DENOISE_FRAME_SIZE, DENOISE_SAMPLE_RATE};
