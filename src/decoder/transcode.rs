use crate::error::{AudioError, AudioResult};
use std::path::Path;

/// Fallback format conversion for sources the built-in decoder rejects
///
/// Implementations turn the file at `path` into bytes the decoder does
/// understand (a WAV container). The seam exists so ingestion can be
/// tested without an external program installed.
pub trait Transcoder {
    /// Convert the file into decodable bytes
    fn transcode(&self, path: &Path) -> AudioResult<Vec<u8>>;
}

/// Transcoder shelling out to the `ffmpeg` executable
///
/// Runs `ffmpeg -i <path> -f wav pipe:1` and hands the WAV bytes back for
/// in-memory decoding. Rate and channel handling stay with the caller.
#[cfg(feature = "ffmpeg-fallback")]
pub struct FfmpegTranscoder {
    command: String,
}

#[cfg(feature = "ffmpeg-fallback")]
impl FfmpegTranscoder {
    /// Create a transcoder using `ffmpeg` from PATH
    pub fn new() -> Self {
        FfmpegTranscoder {
            command: "ffmpeg".to_string(),
        }
    }

    /// Create a transcoder using a specific executable
    pub fn with_command<S: Into<String>>(command: S) -> Self {
        FfmpegTranscoder {
            command: command.into(),
        }
    }
}

#[cfg(feature = "ffmpeg-fallback")]
impl Default for FfmpegTranscoder {
    fn default() -> Self {
        FfmpegTranscoder::new()
    }
}

#[cfg(feature = "ffmpeg-fallback")]
impl Transcoder for FfmpegTranscoder {
    fn transcode(&self, path: &Path) -> AudioResult<Vec<u8>> {
        let output = std::process::Command::new(&self.command)
            .arg("-nostdin")
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(path)
            .args(["-f", "wav", "pipe:1"])
            .output()
            .map_err(|e| {
                AudioError::ExternalProcessError(format!(
                    "failed to launch {}: {}",
                    self.command, e
                ))
            })?;

        if !output.status.success() {
            return Err(AudioError::ExternalProcessError(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(output.stdout)
    }
}
