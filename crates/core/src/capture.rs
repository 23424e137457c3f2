//! Wraps one recognizer call behind deadlines and the capture taxonomy.

use crate::recognizer::{RecognizerError, SpeechRecognizer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};
use tokio::time::timeout;
use tracing::{debug, warn};

/// Timing and calibration knobs for a capture attempt.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// How long to wait for the recognizer to produce a transcript.
    pub listen_timeout: Duration,
    /// Whether to run the ambient-noise calibration pre-step.
    pub calibrate: bool,
    /// Budget for calibration, separate from the listen deadline.
    pub calibration_timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            listen_timeout: Duration::from_secs(5),
            calibrate: true,
            calibration_timeout: Duration::from_secs(1),
        }
    }
}

/// Exactly one terminal outcome per capture call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    Succeeded(String),
    TimedOut,
    Unintelligible,
    ServiceError(String),
}

/// Where a capture attempt currently is, published for the host's
/// "listening…" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    Calibrating,
    Listening,
}

/// Invokes the recognizer with a timeout and reduces every outcome —
/// including the recognizer's own tagged errors — to a [`CaptureOutcome`].
/// No recognizer error type leaks past this gateway.
pub struct CaptureGateway {
    recognizer: Arc<dyn SpeechRecognizer>,
    config: CaptureConfig,
    // The microphone is exclusive: concurrent captures serialize here.
    mic: Mutex<()>,
    phase_tx: watch::Sender<CapturePhase>,
}

impl CaptureGateway {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, config: CaptureConfig) -> Self {
        let (phase_tx, _) = watch::channel(CapturePhase::Idle);
        Self {
            recognizer,
            config,
            mic: Mutex::new(()),
            phase_tx,
        }
    }

    /// Subscribes to phase changes. The phase returns to `Idle` however the
    /// capture ends.
    pub fn phase(&self) -> watch::Receiver<CapturePhase> {
        self.phase_tx.subscribe()
    }

    /// Runs one capture attempt: optional calibration, then a listen
    /// bounded by the configured deadline. Dropping the in-flight listen
    /// future on timeout is the sole cancellation mechanism.
    pub async fn capture(&self) -> CaptureOutcome {
        let _mic = self.mic.lock().await;
        let outcome = self.run().await;
        let _ = self.phase_tx.send(CapturePhase::Idle);
        match &outcome {
            CaptureOutcome::Succeeded(text) => debug!(transcript = %text, "capture succeeded"),
            other => warn!(outcome = ?other, "capture did not produce a transcript"),
        }
        outcome
    }

    async fn run(&self) -> CaptureOutcome {
        if self.config.calibrate {
            let _ = self.phase_tx.send(CapturePhase::Calibrating);
            match timeout(self.config.calibration_timeout, self.recognizer.calibrate()).await {
                Ok(Ok(())) => {}
                // Calibration failing is an infrastructure problem, not a
                // user-side non-event.
                Ok(Err(e)) => return CaptureOutcome::ServiceError(e.to_string()),
                Err(_) => {
                    return CaptureOutcome::ServiceError(
                        "ambient-noise calibration timed out".to_string(),
                    );
                }
            }
        }

        let _ = self.phase_tx.send(CapturePhase::Listening);
        match timeout(self.config.listen_timeout, self.recognizer.listen()).await {
            Ok(Ok(text)) => CaptureOutcome::Succeeded(text),
            Ok(Err(RecognizerError::NoSpeech)) => CaptureOutcome::TimedOut,
            Ok(Err(RecognizerError::NoTranscript)) => CaptureOutcome::Unintelligible,
            Ok(Err(RecognizerError::Backend(message))) => CaptureOutcome::ServiceError(message),
            Err(_) => CaptureOutcome::TimedOut,
        }
    }
}
