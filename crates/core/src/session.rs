//! Top-level orchestrator: capture, then interpretation, then feedback.

use crate::capture::{CaptureGateway, CaptureOutcome};
use crate::command::{CommandInterpreter, FailureKind, InterpretationFailure, InterpretedCommand};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// The feedback-display collaborator. The core guarantees exactly one
/// message per invocation; display policy (duration, expiry) belongs to
/// the implementation.
pub trait FeedbackSink: Send + Sync {
    fn post(&self, message: &str);
}

/// An invocation was refused because one is already pending on this
/// session. The refused invocation never ran and posts no feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("a command is already being captured on this session")]
pub struct SessionBusy;

/// What one session invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResolution {
    Resolved(InterpretedCommand),
    Failed(InterpretationFailure),
}

/// Drives the gateway and the interpreter for one command at a time.
///
/// Every invocation that runs posts exactly one line through the feedback
/// sink before returning, so a caller never acts on a result whose message
/// has not been surfaced. The session never retries on its own; a caller
/// wanting another attempt invokes it again.
pub struct VoiceCommandSession {
    gateway: CaptureGateway,
    interpreter: CommandInterpreter,
    feedback: Arc<dyn FeedbackSink>,
    busy: AtomicBool,
}

// Releases the busy flag however the invocation ends, including when the
// future is dropped mid-capture.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl VoiceCommandSession {
    pub fn new(
        gateway: CaptureGateway,
        interpreter: CommandInterpreter,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            gateway,
            interpreter,
            feedback,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether an invocation is currently pending on this session.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// The gateway's phase channel, for a "listening…" indicator.
    pub fn capture_phase(&self) -> tokio::sync::watch::Receiver<crate::capture::CapturePhase> {
        self.gateway.phase()
    }

    /// Runs one capture-and-interpret cycle.
    pub async fn interpret(&self) -> Result<CommandResolution, SessionBusy> {
        if self.busy.swap(true, Ordering::AcqRel) {
            return Err(SessionBusy);
        }
        let _guard = BusyGuard(&self.busy);

        let resolution = match self.gateway.capture().await {
            CaptureOutcome::Succeeded(utterance) => match self.interpreter.interpret(&utterance) {
                Ok(command) => {
                    info!(command = ?command, "command resolved");
                    self.feedback.post(&command.describe());
                    CommandResolution::Resolved(command)
                }
                Err(failure) => {
                    self.feedback.post(&failure.kind.to_string());
                    CommandResolution::Failed(failure)
                }
            },
            CaptureOutcome::TimedOut => self.fail(FailureKind::AudioTimeout),
            CaptureOutcome::Unintelligible => self.fail(FailureKind::UnintelligibleAudio),
            CaptureOutcome::ServiceError(message) => {
                self.fail(FailureKind::RecognitionServiceError(message))
            }
        };
        Ok(resolution)
    }

    fn fail(&self, kind: FailureKind) -> CommandResolution {
        self.feedback.post(&kind.to_string());
        CommandResolution::Failed(InterpretationFailure::from_capture(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureConfig;
    use crate::lexicon::{ActionKind, Lexicon, PieceKind};
    use crate::recognizer::{RecognizerError, ScriptedRecognizer, SpeechRecognizer};
    use std::sync::Mutex;

    /// Records every posted line, for the one-message-per-invocation checks.
    #[derive(Default)]
    struct RecordingSink {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl FeedbackSink for RecordingSink {
        fn post(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }

    struct PendingRecognizer;

    #[async_trait::async_trait]
    impl SpeechRecognizer for PendingRecognizer {
        async fn calibrate(&self) -> Result<(), RecognizerError> {
            Ok(())
        }

        async fn listen(&self) -> Result<String, RecognizerError> {
            std::future::pending().await
        }
    }

    fn session_with(
        recognizer: Arc<dyn SpeechRecognizer>,
    ) -> (Arc<VoiceCommandSession>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let config = CaptureConfig {
            calibrate: false,
            ..CaptureConfig::default()
        };
        let session = Arc::new(VoiceCommandSession::new(
            CaptureGateway::new(recognizer, config),
            CommandInterpreter::new(Lexicon::standard()),
            sink.clone(),
        ));
        (session, sink)
    }

    #[tokio::test]
    async fn success_resolves_and_posts_one_confirmation() {
        let (session, sink) =
            session_with(Arc::new(ScriptedRecognizer::saying(["move pawn e2 e4"])));
        let resolution = session.interpret().await.unwrap();
        match resolution {
            CommandResolution::Resolved(command) => {
                assert_eq!(command.action, ActionKind::Move);
                assert_eq!(command.piece, Some(PieceKind::Pawn));
            }
            other => panic!("unexpected resolution {:?}", other),
        }
        assert_eq!(sink.messages(), vec!["Move pawn from e2 to e4".to_string()]);
    }

    #[tokio::test]
    async fn parse_failure_posts_one_message_and_carries_the_utterance() {
        let (session, sink) =
            session_with(Arc::new(ScriptedRecognizer::saying(["capture queen a7"])));
        let resolution = session.interpret().await.unwrap();
        match resolution {
            CommandResolution::Failed(failure) => {
                assert_eq!(failure.kind, FailureKind::Incomplete { found: 1 });
                assert_eq!(failure.utterance.as_deref(), Some("capture queen a7"));
            }
            other => panic!("unexpected resolution {:?}", other),
        }
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_posts_exactly_one_message() {
        let (session, sink) = session_with(Arc::new(PendingRecognizer));
        let resolution = session.interpret().await.unwrap();
        assert_eq!(
            resolution,
            CommandResolution::Failed(InterpretationFailure::from_capture(
                FailureKind::AudioTimeout
            ))
        );
        assert_eq!(sink.messages().len(), 1);
    }

    #[tokio::test]
    async fn service_error_is_distinct_from_user_side_failures() {
        let (session, sink) = session_with(Arc::new(ScriptedRecognizer::new([Err(
            RecognizerError::Backend("stt unreachable".to_string()),
        )])));
        let resolution = session.interpret().await.unwrap();
        assert_eq!(
            resolution,
            CommandResolution::Failed(InterpretationFailure::from_capture(
                FailureKind::RecognitionServiceError("stt unreachable".to_string())
            ))
        );
        assert_eq!(sink.messages().len(), 1);
        assert!(sink.messages()[0].contains("unavailable"));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_invocation_is_refused_not_interleaved() {
        let (session, sink) = session_with(Arc::new(PendingRecognizer));
        let first = tokio::spawn({
            let session = session.clone();
            async move { session.interpret().await }
        });
        // Let the first invocation reach the recognizer.
        tokio::task::yield_now().await;
        assert!(session.is_busy());
        assert_eq!(session.interpret().await, Err(SessionBusy));

        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, CommandResolution::Failed(_)));
        // Only the first invocation ran, so only it posted feedback.
        assert_eq!(sink.messages().len(), 1);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn session_is_reusable_after_a_failure() {
        let (session, sink) = session_with(Arc::new(ScriptedRecognizer::new([
            Err(RecognizerError::NoTranscript),
            Ok("e2 e4".to_string()),
        ])));
        let first = session.interpret().await.unwrap();
        assert!(matches!(first, CommandResolution::Failed(_)));
        let second = session.interpret().await.unwrap();
        assert!(matches!(second, CommandResolution::Resolved(_)));
        assert_eq!(sink.messages().len(), 2);
    }
}
