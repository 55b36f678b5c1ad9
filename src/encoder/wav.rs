use crate::core::{SampleBuffer, StereoSplit};
use crate::error::{AudioError, AudioResult};
use hound::{WavSpec, WavWriter};
use std::path::Path;

/// WAV audio encoder (32-bit float)
pub struct WavEncoder {
    writer: Option<WavWriter<std::io::BufWriter<std::fs::File>>>,
    sample_rate: u32,
    channels: u16,
}

impl WavEncoder {
    /// Create a new WAV encoder writing to `path`
    pub fn new<P: AsRef<Path>>(path: P, sample_rate: u32, channels: u16) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }
        if channels == 0 || channels > 2 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: channels as u32,
            });
        }

        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel count
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Get the number of samples written so far
    pub fn samples_written(&self) -> u32 {
        self.writer.as_ref().map(|w| w.len()).unwrap_or(0)
    }

    /// Write a stereo pair as interleaved channels
    ///
    /// Requires a two-channel encoder and equally long channels at the
    /// encoder's sample rate.
    pub fn encode_pair(&mut self, split: &StereoSplit) -> AudioResult<()> {
        if self.channels != 2 {
            return Err(AudioError::InvalidChannels {
                expected: 2,
                got: self.channels as u32,
            });
        }
        if split.left.sample_rate() != self.sample_rate
            || split.right.sample_rate() != self.sample_rate
        {
            return Err(AudioError::InvalidSampleRate {
                rate: split.left.sample_rate(),
            });
        }
        if split.left.len() != split.right.len() {
            return Err(AudioError::EncodeError(format!(
                "stereo channels differ in length: {} vs {}",
                split.left.len(),
                split.right.len()
            )));
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::EncodeError("encoder already finalized".to_string()))?;

        for (&l, &r) in split.left.samples().iter().zip(split.right.samples()) {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }

        Ok(())
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, buffer: &SampleBuffer) -> AudioResult<()> {
        if buffer.sample_rate() != self.sample_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: buffer.sample_rate(),
            });
        }
        if self.channels != 1 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: self.channels as u32,
            });
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| AudioError::EncodeError("encoder already finalized".to_string()))?;

        for &sample in buffer.samples() {
            writer.write_sample(sample)?;
        }

        Ok(())
    }

    fn finalize(&mut self) -> AudioResult<()> {
        if let Some(writer) = self.writer.take() {
            writer.finalize()?;
        }
        Ok(())
    }
}
