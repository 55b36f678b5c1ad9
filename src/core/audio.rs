use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Canonical sample rate in Hz that ingestion converts to
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Mono audio buffer holding f32 samples, nominally in -1.0 to 1.0
///
/// The nominal range is not enforced: a buffer produced by summing stereo
/// channels can exceed it.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a new sample buffer
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(SampleBuffer {
            samples,
            sample_rate,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get mutable reference to the samples
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Get owned samples (consumes buffer)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Replace the buffer contents, keeping the sample rate
    pub fn replace_samples(&mut self, samples: Vec<f32>) {
        self.samples = samples;
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get duration of the buffered audio
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples.len() as f64 / self.sample_rate as f64)
    }
}

/// Individual channels of a stereo source, kept unmodified
#[derive(Debug, Clone)]
pub struct StereoSplit {
    /// Left channel
    pub left: SampleBuffer,
    /// Right channel
    pub right: SampleBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_buffer_creation() {
        let buffer = SampleBuffer::new(vec![0.1, 0.2, 0.3, 0.4], 16000).unwrap();

        assert_eq!(buffer.sample_rate(), 16000);
        assert_eq!(buffer.len(), 4);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.samples(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn test_sample_buffer_zero_rate() {
        let result = SampleBuffer::new(vec![0.0], 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_buffer_duration() {
        let buffer = SampleBuffer::new(vec![0.0; 16000], 16000).unwrap();
        assert_eq!(buffer.duration(), Duration::from_secs(1));

        let buffer = SampleBuffer::new(vec![0.0; 8000], 16000).unwrap();
        assert_eq!(buffer.duration(), Duration::from_millis(500));
    }

    #[test]
    fn test_replace_samples_keeps_rate() {
        let mut buffer = SampleBuffer::new(vec![0.1, 0.2], 48000).unwrap();
        buffer.replace_samples(vec![0.5; 7]);

        assert_eq!(buffer.sample_rate(), 48000);
        assert_eq!(buffer.len(), 7);
    }
}
