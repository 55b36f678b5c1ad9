use crate::error::{AudioError, AudioResult};
use nnnoiseless::DenoiseState;

/// Sample rate in Hz the noise suppression engine operates at
pub const DENOISE_SAMPLE_RATE: u32 = 48_000;

/// Samples per engine frame (10 ms at the denoiser rate)
pub const DENOISE_FRAME_SIZE: usize = DenoiseState::<'static>::FRAME_SIZE;

/// Scale between the [-1, 1] sample convention and the i16-range
/// amplitudes the engine was trained on
const PCM_SCALE: f32 = 32768.0;

/// Noise suppressor processing audio in fixed 480-sample frames
///
/// Wraps an RNNoise engine state. The engine carries temporal context from
/// one frame to the next, so frames of the same recording must be submitted
/// in order through a single instance, and an unrelated recording needs a
/// fresh instance.
pub struct FrameDenoiser {
    state: Box<DenoiseState<'static>>,
    scaled: [f32; DENOISE_FRAME_SIZE],
    denoised: [f32; DENOISE_FRAME_SIZE],
}

impl FrameDenoiser {
    /// Create a denoiser with fresh engine state
    pub fn new() -> Self {
        FrameDenoiser {
            state: DenoiseState::new(),
            scaled: [0.0; DENOISE_FRAME_SIZE],
            denoised: [0.0; DENOISE_FRAME_SIZE],
        }
    }

    /// Denoise exactly one frame in place
    ///
    /// The frame must hold exactly [`DENOISE_FRAME_SIZE`] samples at
    /// [`DENOISE_SAMPLE_RATE`].
    pub fn denoise_frame(&mut self, frame: &mut [f32]) -> AudioResult<()> {
        if frame.len() != DENOISE_FRAME_SIZE {
            return Err(AudioError::FilterError(format!(
                "denoise frame must hold {} samples, got {}",
                DENOISE_FRAME_SIZE,
                frame.len()
            )));
        }

        self.denoise_exact(frame);
        Ok(())
    }

    /// Denoise a whole buffer in place, frame by frame
    ///
    /// Samples past the last complete frame are left unmodified.
    pub fn denoise_buffer(&mut self, samples: &mut [f32]) {
        for frame in samples.chunks_exact_mut(DENOISE_FRAME_SIZE) {
            self.denoise_exact(frame);
        }
    }

    fn denoise_exact(&mut self, frame: &mut [f32]) {
        // The engine expects i16-range amplitudes and hands them back in
        // the same range.
        for (dst, &src) in self.scaled.iter_mut().zip(frame.iter()) {
            *dst = src * PCM_SCALE;
        }
        self.state.process_frame(&mut self.denoised, &self.scaled);
        for (dst, &src) in frame.iter_mut().zip(self.denoised.iter()) {
            *dst = src / PCM_SCALE;
        }
    }
}

impl Default for FrameDenoiser {
    fn default() -> Self {
        FrameDenoiser::new()
    }
}
