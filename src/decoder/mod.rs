//! Audio ingestion: decoding files and streams into sample buffers

pub mod symphonia;
pub mod transcode;

#[cfg(feature = "ffmpeg-fallback")]
pub use transcode::FfmpegTranscoder;
pub use transcode::Transcoder;

use crate::core::{SampleBuffer, StereoSplit, TARGET_SAMPLE_RATE};
use crate::error::{AudioError, AudioResult};
use crate::filter::RateConverter;
use log::warn;
use self::symphonia::{decode_bytes, decode_file, DecodedPcm};
use std::io::{self, Read};
use std::path::Path;

/// Source string selecting standard input
pub const STDIN_SOURCE: &str = "-";

/// Bytes read from stdin per chunk
const STDIN_CHUNK_SIZE: usize = 1024;

/// Audio ingestion front end
///
/// Decodes a file or standard input into a mono [`SampleBuffer`] at the
/// target rate, optionally keeping the individual channels of a stereo
/// source. When direct decoding fails on something other than an IO error,
/// a configured [`Transcoder`] gets one chance to rescue the source.
pub struct AudioIngest {
    target_rate: u32,
    transcoder: Option<Box<dyn Transcoder>>,
}

impl AudioIngest {
    /// Create an ingester targeting the canonical rate
    pub fn new() -> Self {
        AudioIngest {
            target_rate: TARGET_SAMPLE_RATE,
            transcoder: None,
        }
    }

    /// Override the target sample rate
    pub fn with_target_rate(mut self, rate: u32) -> Self {
        self.target_rate = rate;
        self
    }

    /// Set a fallback transcoder consulted when direct decoding fails
    pub fn with_transcoder(mut self, transcoder: Box<dyn Transcoder>) -> Self {
        self.transcoder = Some(transcoder);
        self
    }

    /// Get the target sample rate
    pub fn target_rate(&self) -> u32 {
        self.target_rate
    }

    /// Load an audio source into a mono buffer at the target rate
    ///
    /// `source` is a file path, or `"-"` for standard input (read to
    /// exhaustion before decoding). With `stereo` set and a two-channel
    /// source, the split holds both channels unmixed and the mono buffer
    /// is the per-sample sum of the two. In every other case the split is
    /// `None` and the mono buffer averages across the source channels.
    pub fn load(
        &self,
        source: &str,
        stereo: bool,
    ) -> AudioResult<(SampleBuffer, Option<StereoSplit>)> {
        let decoded = if source == STDIN_SOURCE {
            decode_bytes(read_stdin()?)?
        } else {
            self.decode_path(source)?
        };

        self.assemble(decoded, stereo)
    }

    fn decode_path(&self, path: &str) -> AudioResult<DecodedPcm> {
        match decode_file(path) {
            Ok(decoded) => Ok(decoded),
            // An unreadable source stays an IO error; the transcoder only
            // helps with formats the decoder cannot parse.
            Err(AudioError::Io(e)) => Err(AudioError::Io(e)),
            Err(err) => match &self.transcoder {
                Some(transcoder) => {
                    warn!("direct decode of {} failed ({}), trying transcoder", path, err);
                    let bytes = transcoder.transcode(Path::new(path))?;
                    decode_bytes(bytes)
                }
                None => Err(err),
            },
        }
    }

    fn assemble(
        &self,
        decoded: DecodedPcm,
        stereo: bool,
    ) -> AudioResult<(SampleBuffer, Option<StereoSplit>)> {
        if self.target_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        let DecodedPcm {
            samples,
            sample_rate,
            channels,
        } = decoded;

        if channels == 0 {
            return Err(AudioError::InvalidChannels {
                expected: 1,
                got: 0,
            });
        }

        // One converter per load call, shared by all channel conversions;
        // it resets itself between calls.
        let (mut converter, out_rate) = match RateConverter::new(sample_rate, self.target_rate) {
            Ok(converter) => (converter, self.target_rate),
            Err(e) => {
                warn!(
                    "rate conversion {} -> {} unavailable ({}), keeping native rate",
                    sample_rate, self.target_rate, e
                );
                (
                    RateConverter::passthrough(sample_rate, self.target_rate),
                    sample_rate,
                )
            }
        };

        if stereo && channels == 2 {
            let frames = samples.len() / 2;
            let mut mono = Vec::with_capacity(frames);
            let mut left = Vec::with_capacity(frames);
            let mut right = Vec::with_capacity(frames);
            for pair in samples.chunks_exact(2) {
                left.push(pair[0]);
                right.push(pair[1]);
                // Channel sum, not average: a loud stereo pair can push
                // the mix outside the nominal [-1, 1] range.
                mono.push(pair[0] + pair[1]);
            }

            let mono = converter.convert(&mono)?;
            let left = converter.convert(&left)?;
            let right = converter.convert(&right)?;

            let split = StereoSplit {
                left: SampleBuffer::new(left, out_rate)?,
                right: SampleBuffer::new(right, out_rate)?,
            };
            Ok((SampleBuffer::new(mono, out_rate)?, Some(split)))
        } else {
            let mono = converter.convert(&downmix(&samples, channels))?;
            Ok((SampleBuffer::new(mono, out_rate)?, None))
        }
    }
}

impl Default for AudioIngest {
    fn default() -> Self {
        AudioIngest::new()
    }
}

/// Average all channels of interleaved samples into mono
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return samples.to_vec();
    }

    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Drain standard input in fixed-size chunks
fn read_stdin() -> AudioResult<Vec<u8>> {
    let mut stdin = io::stdin().lock();
    let mut bytes = Vec::new();
    let mut chunk = [0u8; STDIN_CHUNK_SIZE];

    loop {
        match stdin.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => bytes.extend_from_slice(&chunk[..n]),
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(AudioError::Io(e)),
        }
    }

    Ok(bytes)
}
