use crate::error::{AudioError, AudioResult};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};
use std::f32::consts::PI;

/// Input frames fed to the resampler per processing call
const CHUNK_SIZE: usize = 1024;

/// Q factors of the two biquad sections forming an order-4 Butterworth
/// low-pass (1 / (2 cos(pi/8)) and 1 / (2 cos(3 pi/8)))
const SECTION_Q: [f32; 2] = [0.541_196_1, 1.306_563];

/// One second-order low-pass section (RBJ cookbook), direct form I
struct LowPassSection {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl LowPassSection {
    fn new(cutoff: f32, sample_rate: f32, q: f32) -> Self {
        let w0 = 2.0 * PI * cutoff / sample_rate;
        let alpha = w0.sin() / (2.0 * q);
        let cos_w0 = w0.cos();

        let a0 = 1.0 + alpha;
        let inv_a0 = 1.0 / a0;

        LowPassSection {
            b0: (1.0 - cos_w0) / 2.0 * inv_a0,
            b1: (1.0 - cos_w0) * inv_a0,
            b2: (1.0 - cos_w0) / 2.0 * inv_a0,
            a1: -2.0 * cos_w0 * inv_a0,
            a2: (1.0 - alpha) * inv_a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;

        y
    }
}

struct Inner {
    resampler: FastFixedIn<f32>,
    scratch: Vec<Vec<f32>>,
    low_pass: [LowPassSection; 2],
}

/// Sample rate converter between a fixed pair of rates
///
/// Uses linear interpolation with an order-4 Butterworth low-pass at the
/// Nyquist frequency of the lower rate: applied to the input when
/// downsampling and to the output when upsampling. Interpolation and
/// filter state is cleared at the start of every [`convert`] call, so a
/// single converter can serve any number of unrelated buffers without
/// them bleeding into each other.
///
/// [`convert`]: RateConverter::convert
pub struct RateConverter {
    src_rate: u32,
    dst_rate: u32,
    inner: Option<Inner>,
}

impl RateConverter {
    /// Create a converter from `src_rate` to `dst_rate` (both in Hz)
    pub fn new(src_rate: u32, dst_rate: u32) -> AudioResult<Self> {
        if src_rate == 0 || dst_rate == 0 {
            return Err(AudioError::InvalidSampleRate {
                rate: src_rate.min(dst_rate),
            });
        }

        if src_rate == dst_rate {
            return Ok(RateConverter::passthrough(src_rate, dst_rate));
        }

        let ratio = dst_rate as f64 / src_rate as f64;
        let resampler = FastFixedIn::<f32>::new(ratio, 1.0, PolynomialDegree::Linear, CHUNK_SIZE, 1)
            .map_err(|e| AudioError::ResamplingError(e.to_string()))?;
        let scratch = resampler.output_buffer_allocate(true);

        // Anti-aliasing low-pass at the Nyquist frequency of the lower
        // rate, running at the higher rate (input side when downsampling,
        // output side when upsampling).
        let cutoff = src_rate.min(dst_rate) as f32 / 2.0;
        let filter_rate = src_rate.max(dst_rate) as f32;
        let low_pass = SECTION_Q.map(|q| LowPassSection::new(cutoff, filter_rate, q));

        Ok(RateConverter {
            src_rate,
            dst_rate,
            inner: Some(Inner {
                resampler,
                scratch,
                low_pass,
            }),
        })
    }

    /// Converter that hands every input back unchanged
    ///
    /// Fallback for callers that must keep running when the real converter
    /// cannot be built.
    pub fn passthrough(src_rate: u32, dst_rate: u32) -> Self {
        RateConverter {
            src_rate,
            dst_rate,
            inner: None,
        }
    }

    /// Get the source sample rate
    pub fn src_rate(&self) -> u32 {
        self.src_rate
    }

    /// Get the destination sample rate
    pub fn dst_rate(&self) -> u32 {
        self.dst_rate
    }

    /// Convert a buffer of mono samples from the source to the destination
    /// rate
    ///
    /// The output holds exactly `input.len() * dst_rate / src_rate` samples
    /// (integer division). Each call behaves as if it were the converter's
    /// first: no state survives from previous calls.
    pub fn convert(&mut self, input: &[f32]) -> AudioResult<Vec<f32>> {
        let inner = match self.inner.as_mut() {
            Some(inner) => inner,
            None => return Ok(input.to_vec()),
        };

        if input.is_empty() {
            return Ok(Vec::new());
        }

        inner.resampler.reset();
        for section in inner.low_pass.iter_mut() {
            section.reset();
        }

        let expected =
            (input.len() as u64 * self.dst_rate as u64 / self.src_rate as u64) as usize;

        // Downsampling filters the input before rate reduction.
        let filtered;
        let source: &[f32] = if self.src_rate > self.dst_rate {
            let mut buf = input.to_vec();
            apply_low_pass(&mut inner.low_pass, &mut buf);
            filtered = buf;
            &filtered
        } else {
            input
        };

        let mut output = Vec::with_capacity(expected + CHUNK_SIZE);
        let mut pos = 0;
        while pos + inner.resampler.input_frames_next() < source.len() {
            let (consumed, written) = inner
                .resampler
                .process_into_buffer(&[&source[pos..]], &mut inner.scratch, None)
                .map_err(|e| AudioError::ResamplingError(e.to_string()))?;
            pos += consumed;
            output.extend_from_slice(&inner.scratch[0][..written]);
        }

        if pos < source.len() {
            let (_, written) = inner
                .resampler
                .process_partial_into_buffer(Some(&[&source[pos..]]), &mut inner.scratch, None)
                .map_err(|e| AudioError::ResamplingError(e.to_string()))?;
            output.extend_from_slice(&inner.scratch[0][..written]);
        }

        // Drain the interpolator delay until the expected frame count is
        // covered, then trim the zero-padding excess.
        while output.len() < expected {
            let (_, written) = inner
                .resampler
                .process_partial_into_buffer(None::<&[&[f32]]>, &mut inner.scratch, None)
                .map_err(|e| AudioError::ResamplingError(e.to_string()))?;
            if written == 0 {
                break;
            }
            output.extend_from_slice(&inner.scratch[0][..written]);
        }
        output.truncate(expected);

        // Upsampling filters the output after rate expansion.
        if self.src_rate < self.dst_rate {
            apply_low_pass(&mut inner.low_pass, &mut output);
        }

        Ok(output)
    }
}

fn apply_low_pass(sections: &mut [LowPassSection; 2], samples: &mut [f32]) {
    for sample in samples.iter_mut() {
        let mut acc = *sample;
        for section in sections.iter_mut() {
            acc = section.process(acc);
        }
        *sample = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_creation() {
        let converter = RateConverter::new(16000, 48000);
        assert!(converter.is_ok());
        let c = converter.unwrap();
        assert_eq!(c.src_rate(), 16000);
        assert_eq!(c.dst_rate(), 48000);
    }

    #[test]
    fn test_converter_invalid_rate() {
        assert!(RateConverter::new(0, 48000).is_err());
        assert!(RateConverter::new(16000, 0).is_err());
    }

    #[test]
    fn test_convert_empty() {
        let mut converter = RateConverter::new(16000, 48000).unwrap();
        let output = converter.convert(&[]).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_output_length_upsample() {
        let mut converter = RateConverter::new(16000, 48000).unwrap();
        let input = vec![0.1; 1600];
        let output = converter.convert(&input).unwrap();
        assert_eq!(output.len(), 4800);
    }

    #[test]
    fn test_output_length_downsample() {
        let mut converter = RateConverter::new(48000, 16000).unwrap();
        let input = vec![0.1; 4800];
        let output = converter.convert(&input).unwrap();
        assert_eq!(output.len(), 1600);
    }

    #[test]
    fn test_round_trip_length() {
        let mut up = RateConverter::new(16000, 48000).unwrap();
        let mut down = RateConverter::new(48000, 16000).unwrap();

        // Longer than one chunk to cover the chunked processing path
        let input = vec![0.25; 5000];
        let wide = up.convert(&input).unwrap();
        assert_eq!(wide.len(), 15000);
        let narrow = down.convert(&wide).unwrap();
        assert_eq!(narrow.len(), input.len());
    }

    #[test]
    fn test_zeros_stay_zeros() {
        let mut converter = RateConverter::new(16000, 48000).unwrap();
        let output = converter.convert(&vec![0.0; 3200]).unwrap();
        assert_eq!(output.len(), 9600);
        assert!(output.iter().all(|&s| s.abs() < 1e-6));
    }

    #[test]
    fn test_repeat_conversion_identical() {
        let mut converter = RateConverter::new(48000, 16000).unwrap();
        let input: Vec<f32> = (0..4800).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();

        let first = converter.convert(&input).unwrap();
        let second = converter.convert(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_passthrough_returns_input() {
        let mut converter = RateConverter::passthrough(16000, 48000);
        let input = vec![0.1, -0.2, 0.3];
        let output = converter.convert(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_equal_rates_identity() {
        let mut converter = RateConverter::new(16000, 16000).unwrap();
        let input = vec![0.5, -0.5, 0.25];
        let output = converter.convert(&input).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_low_pass_section_dc_gain() {
        // A low-pass must pass DC with unit gain once settled
        let mut section = LowPassSection::new(8000.0, 48000.0, 0.707);
        let mut last = 0.0;
        for _ in 0..1000 {
            last = section.process(1.0);
        }
        assert!((last - 1.0).abs() < 1e-3);
    }
}
