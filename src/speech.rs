//! External text-to-speech invocation.
//!
//! Synthesis itself lives in an external program; this module only hands
//! text over to it. The seam is a trait so callers and tests can swap in
//! their own synthesizer.

use crate::error::{AudioError, AudioResult};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Trait for text-to-speech backends
pub trait SpeechSynthesizer {
    /// Speak the text stored at `text_path` with the given voice
    fn speak(&self, text_path: &Path, voice_id: i32) -> AudioResult<()>;
}

/// Synthesizer invoking an external program
///
/// Runs `<command> <voice_id> <text_path>` and treats a non-zero exit
/// status as failure.
pub struct CommandSynthesizer {
    command: String,
}

impl CommandSynthesizer {
    /// Create a synthesizer around the given program
    pub fn new<S: Into<String>>(command: S) -> Self {
        CommandSynthesizer {
            command: command.into(),
        }
    }

    /// Get the configured program
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn speak(&self, text_path: &Path, voice_id: i32) -> AudioResult<()> {
        let status = Command::new(&self.command)
            .arg(voice_id.to_string())
            .arg(text_path)
            .status()
            .map_err(|e| {
                AudioError::ExternalProcessError(format!(
                    "failed to launch {}: {}",
                    self.command, e
                ))
            })?;

        if !status.success() {
            return Err(AudioError::ExternalProcessError(format!(
                "{} exited with {}",
                self.command, status
            )));
        }

        Ok(())
    }
}

/// Write `text` to `text_path`, then speak it
///
/// The text file is left in place so the synthesizer can read it after
/// this call returns.
pub fn speak_text(
    synthesizer: &dyn SpeechSynthesizer,
    text_path: &Path,
    voice_id: i32,
    text: &str,
) -> AudioResult<()> {
    fs::write(text_path, text)?;
    synthesizer.speak(text_path, voice_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSynthesizer {
        calls: RefCell<Vec<(String, i32)>>,
        fail: bool,
    }

    impl RecordingSynthesizer {
        fn new(fail: bool) -> Self {
            RecordingSynthesizer {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl SpeechSynthesizer for RecordingSynthesizer {
        fn speak(&self, text_path: &Path, voice_id: i32) -> AudioResult<()> {
            self.calls
                .borrow_mut()
                .push((text_path.display().to_string(), voice_id));
            if self.fail {
                return Err(AudioError::ExternalProcessError("canned failure".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_speak_text_writes_before_speaking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("say.txt");
        let synthesizer = RecordingSynthesizer::new(false);

        speak_text(&synthesizer, &path, 3, "hello there").unwrap();

        // The file exists with the text by the time speak ran
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello there");
        let calls = synthesizer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 3);
    }

    #[test]
    fn test_speak_text_propagates_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("say.txt");
        let synthesizer = RecordingSynthesizer::new(true);

        let result = speak_text(&synthesizer, &path, 0, "hello");
        assert!(matches!(result, Err(AudioError::ExternalProcessError(_))));
    }

    #[test]
    fn test_command_synthesizer_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("say.txt");
        fs::write(&path, "hello").unwrap();

        let ok = CommandSynthesizer::new("true");
        assert!(ok.speak(&path, 1).is_ok());

        let failing = CommandSynthesizer::new("false");
        assert!(matches!(
            failing.speak(&path, 1),
            Err(AudioError::ExternalProcessError(_))
        ));
    }

    #[test]
    fn test_command_synthesizer_missing_program() {
        let synthesizer = CommandSynthesizer::new("/nonexistent/speak");
        let result = synthesizer.speak(Path::new("say.txt"), 0);
        assert!(matches!(result, Err(AudioError::ExternalProcessError(_))));
    }
}
