//! The speech-recognition collaborator seam.
//!
//! The core never talks to an audio device or a transcription backend
//! directly; it consumes this trait. Implementations live in the host
//! (typed stdin, remote speech-to-text service), plus a scripted one here
//! for development and tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// The three outcomes a recognizer distinguishes, as tagged values rather
/// than distinct exception types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecognizerError {
    /// No speech began while the recognizer was listening.
    #[error("no speech detected")]
    NoSpeech,
    /// Audio was captured but no usable transcript came out of it.
    #[error("could not produce a transcript")]
    NoTranscript,
    /// The backend itself failed (unreachable, quota, protocol error).
    #[error("recognition backend error: {0}")]
    Backend(String),
}

/// One-shot transcription source.
///
/// Implementations may take arbitrarily long; all deadlines are owned by
/// the capture gateway, which drops the in-flight future on timeout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Ambient-noise calibration pre-step. Implementations without a
    /// microphone make this a no-op.
    async fn calibrate(&self) -> Result<(), RecognizerError>;

    /// Listens for one utterance and returns its transcript.
    async fn listen(&self) -> Result<String, RecognizerError>;
}

/// A deterministic recognizer replaying a queue of canned outcomes.
///
/// Exported for development and tests; an exhausted script reports a
/// backend error rather than blocking.
#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    outcomes: Mutex<VecDeque<Result<String, RecognizerError>>>,
}

impl ScriptedRecognizer {
    pub fn new(outcomes: impl IntoIterator<Item = Result<String, RecognizerError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    /// Convenience constructor for a script of plain transcripts.
    pub fn saying(lines: impl IntoIterator<Item = &'static str>) -> Self {
        Self::new(lines.into_iter().map(|line| Ok(line.to_string())))
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn calibrate(&self) -> Result<(), RecognizerError> {
        Ok(())
    }

    async fn listen(&self) -> Result<String, RecognizerError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RecognizerError::Backend("script exhausted".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_recognizer_replays_outcomes_in_order() {
        let recognizer = ScriptedRecognizer::new([
            Ok("move pawn e2 e4".to_string()),
            Err(RecognizerError::NoSpeech),
        ]);
        assert_eq!(
            recognizer.listen().await,
            Ok("move pawn e2 e4".to_string())
        );
        assert_eq!(recognizer.listen().await, Err(RecognizerError::NoSpeech));
    }

    #[tokio::test]
    async fn exhausted_script_reports_backend_error() {
        let recognizer = ScriptedRecognizer::saying([]);
        assert!(matches!(
            recognizer.listen().await,
            Err(RecognizerError::Backend(_))
        ));
    }
}
