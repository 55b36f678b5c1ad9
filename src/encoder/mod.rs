//! Audio encoder implementations

pub mod wav;

pub use wav::WavEncoder;

use crate::core::SampleBuffer;
use crate::error::AudioResult;

/// Trait for audio encoders
pub trait Encoder {
    /// Write a mono buffer to the output
    fn encode(&mut self, buffer: &SampleBuffer) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}
