use crate::core::{SampleBuffer, TARGET_SAMPLE_RATE};
use crate::error::{AudioError, AudioResult};
use crate::filter::{FrameDenoiser, RateConverter, DENOISE_SAMPLE_RATE};
use log::warn;

/// Noise suppression pipeline for buffers at the model rate
///
/// The noise suppression engine runs at [`DENOISE_SAMPLE_RATE`] while the
/// rest of the system works at [`TARGET_SAMPLE_RATE`], so every buffer is
/// converted up, denoised frame by frame, and converted back down. The
/// pipeline owns both converters; they are built once and reused for any
/// number of unrelated buffers.
///
/// If a converter cannot be built the pipeline degrades to passing samples
/// through at their original rate instead of failing, matching the behavior
/// of the rest of the ingestion path.
pub struct DenoisePipeline {
    model_rate: u32,
    up: RateConverter,
    down: RateConverter,
}

impl DenoisePipeline {
    /// Create a pipeline converting between the model and denoiser rates
    pub fn new() -> Self {
        let up = RateConverter::new(TARGET_SAMPLE_RATE, DENOISE_SAMPLE_RATE).unwrap_or_else(|e| {
            warn!("denoise up-converter unavailable, samples pass through unresampled: {}", e);
            RateConverter::passthrough(TARGET_SAMPLE_RATE, DENOISE_SAMPLE_RATE)
        });
        let down = RateConverter::new(DENOISE_SAMPLE_RATE, TARGET_SAMPLE_RATE).unwrap_or_else(|e| {
            warn!("denoise down-converter unavailable, samples pass through unresampled: {}", e);
            RateConverter::passthrough(DENOISE_SAMPLE_RATE, TARGET_SAMPLE_RATE)
        });

        DenoisePipeline {
            model_rate: TARGET_SAMPLE_RATE,
            up,
            down,
        }
    }

    /// Get the sample rate buffers must arrive at
    pub fn model_rate(&self) -> u32 {
        self.model_rate
    }

    /// Denoise a buffer in place
    ///
    /// The buffer must be at the model rate. Its contents are replaced by
    /// the denoised audio at the same rate and (within conversion rounding)
    /// the same length. An empty buffer is a no-op. The caller provides the
    /// per-recording [`FrameDenoiser`] because engine state must not be
    /// shared between unrelated recordings.
    pub fn process(
        &mut self,
        denoiser: &mut FrameDenoiser,
        buffer: &mut SampleBuffer,
    ) -> AudioResult<()> {
        if buffer.is_empty() {
            return Ok(());
        }
        if buffer.sample_rate() != self.model_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: buffer.sample_rate(),
            });
        }

        let mut wide = self.up.convert(buffer.samples())?;
        denoiser.denoise_buffer(&mut wide);
        let narrow = self.down.convert(&wide)?;
        buffer.replace_samples(narrow);

        Ok(())
    }
}

impl Default for DenoisePipeline {
    fn default() -> Self {
        DenoisePipeline::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, period: f32) -> Vec<f32> {
        (0..len)
            .map(|i| (i as f32 * std::f32::consts::TAU / period).sin() * 0.3)
            .collect()
    }

    #[test]
    fn test_empty_buffer_is_noop() {
        let mut pipeline = DenoisePipeline::new();
        let mut denoiser = FrameDenoiser::new();
        let mut buffer = SampleBuffer::new(Vec::new(), TARGET_SAMPLE_RATE).unwrap();

        assert!(pipeline.process(&mut denoiser, &mut buffer).is_ok());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_wrong_rate_rejected() {
        let mut pipeline = DenoisePipeline::new();
        let mut denoiser = FrameDenoiser::new();
        let mut buffer = SampleBuffer::new(vec![0.1; 100], 44100).unwrap();

        let result = pipeline.process(&mut denoiser, &mut buffer);
        assert!(matches!(
            result,
            Err(AudioError::InvalidSampleRate { rate: 44100 })
        ));
    }

    #[test]
    fn test_length_and_rate_preserved() {
        let mut pipeline = DenoisePipeline::new();
        let mut denoiser = FrameDenoiser::new();
        let mut buffer = SampleBuffer::new(sine(8000, 50.0), TARGET_SAMPLE_RATE).unwrap();

        pipeline.process(&mut denoiser, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 8000);
        assert_eq!(buffer.sample_rate(), TARGET_SAMPLE_RATE);
    }

    #[test]
    fn test_silence_stays_silent() {
        let mut pipeline = DenoisePipeline::new();
        let mut denoiser = FrameDenoiser::new();
        let mut buffer = SampleBuffer::new(vec![0.0; 4800], TARGET_SAMPLE_RATE).unwrap();

        pipeline.process(&mut denoiser, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 4800);
        assert!(buffer.samples().iter().all(|&s| s.abs() < 1e-4));
    }

    #[test]
    fn test_repeat_runs_identical() {
        let samples = sine(6000, 80.0);
        let mut pipeline = DenoisePipeline::new();

        let mut first = SampleBuffer::new(samples.clone(), TARGET_SAMPLE_RATE).unwrap();
        pipeline.process(&mut FrameDenoiser::new(), &mut first).unwrap();

        let mut second = SampleBuffer::new(samples, TARGET_SAMPLE_RATE).unwrap();
        pipeline.process(&mut FrameDenoiser::new(), &mut second).unwrap();

        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn test_passthrough_converters_still_denoise() {
        // Degraded pipeline: conversions disabled, suppression still runs
        // over whatever rate the samples actually have.
        let mut pipeline = DenoisePipeline {
            model_rate: TARGET_SAMPLE_RATE,
            up: RateConverter::passthrough(TARGET_SAMPLE_RATE, DENOISE_SAMPLE_RATE),
            down: RateConverter::passthrough(DENOISE_SAMPLE_RATE, TARGET_SAMPLE_RATE),
        };
        let mut denoiser = FrameDenoiser::new();
        let mut buffer = SampleBuffer::new(vec![0.0; 1000], TARGET_SAMPLE_RATE).unwrap();

        pipeline.process(&mut denoiser, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 1000);
        assert_eq!(buffer.sample_rate(), TARGET_SAMPLE_RATE);
    }
}
