//! Client for a remote speech-to-text sidecar.
//!
//! The sidecar owns the microphone and the transcription model; this
//! client maps its HTTP responses onto the recognizer's tagged outcomes:
//! 200 carries a transcript, 204 means no speech began, 422 means audio
//! was captured but no usable transcript came out of it. Anything else,
//! including transport failures, is a backend error.

use async_trait::async_trait;
use blindfold_core::{RecognizerError, SpeechRecognizer};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ListenResponse {
    transcript: String,
    confidence: Option<f32>,
}

pub struct RemoteRecognizer {
    client: reqwest::Client,
    base: String,
}

impl RemoteRecognizer {
    pub fn new(base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for RemoteRecognizer {
    async fn calibrate(&self) -> Result<(), RecognizerError> {
        let response = self
            .client
            .post(format!("{}/calibrate", self.base))
            .send()
            .await
            .map_err(|e| RecognizerError::Backend(e.to_string()))?;
        if !response.status().is_success() {
            return Err(RecognizerError::Backend(format!(
                "calibration returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn listen(&self) -> Result<String, RecognizerError> {
        let response = self
            .client
            .post(format!("{}/listen", self.base))
            .send()
            .await
            .map_err(|e| RecognizerError::Backend(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body: ListenResponse = response
                    .json()
                    .await
                    .map_err(|e| RecognizerError::Backend(e.to_string()))?;
                // Confidence thresholding is the service's own job; it is
                // logged here for diagnostics only.
                debug!(
                    transcript = %body.transcript,
                    confidence = ?body.confidence,
                    "remote transcript received"
                );
                Ok(body.transcript)
            }
            StatusCode::NO_CONTENT => Err(RecognizerError::NoSpeech),
            StatusCode::UNPROCESSABLE_ENTITY => Err(RecognizerError::NoTranscript),
            status => Err(RecognizerError::Backend(format!(
                "unexpected status {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let recognizer = RemoteRecognizer::new("http://localhost:7000/".to_string());
        assert_eq!(recognizer.base, "http://localhost:7000");
    }

    #[test]
    fn listen_response_parses_without_confidence() {
        let body: ListenResponse =
            serde_json::from_str(r#"{"transcript": "move pawn e2 e4"}"#).unwrap();
        assert_eq!(body.transcript, "move pawn e2 e4");
        assert_eq!(body.confidence, None);
    }

    #[test]
    fn listen_response_parses_with_confidence() {
        let body: ListenResponse =
            serde_json::from_str(r#"{"transcript": "e2 e4", "confidence": 0.92}"#).unwrap();
        assert_eq!(body.confidence, Some(0.92));
    }
}
