//! The typed-text input path: commands read line-by-line from stdin.

use async_trait::async_trait;
use blindfold_core::{RecognizerError, SpeechRecognizer};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::{Mutex, mpsc};
use tracing::debug;

/// Reads typed commands and serves them as "transcripts".
///
/// A single reader task pumps lines into a channel, so lines typed while
/// no capture is armed are queued rather than lost. Blank lines are
/// skipped. Calibration is a no-op: there is no microphone.
pub struct TypedRecognizer {
    lines: Mutex<mpsc::UnboundedReceiver<String>>,
}

impl TypedRecognizer {
    /// Reads from the process's stdin. Must be called inside a Tokio
    /// runtime; the reader task lives for the life of the process.
    pub fn new() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    /// Reads from any async source, for tests.
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            let mut lines = BufReader::new(reader).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                if tx.send(line).is_err() {
                    break;
                }
            }
            debug!("typed input closed");
        });
        Self {
            lines: Mutex::new(rx),
        }
    }
}

impl Default for TypedRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for TypedRecognizer {
    async fn calibrate(&self) -> Result<(), RecognizerError> {
        Ok(())
    }

    async fn listen(&self) -> Result<String, RecognizerError> {
        self.lines
            .lock()
            .await
            .recv()
            .await
            .ok_or_else(|| RecognizerError::Backend("typed input closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_lines_in_order() {
        let recognizer = TypedRecognizer::from_reader("move pawn e2 e4\ntake d4 e5\n".as_bytes());
        assert_eq!(
            recognizer.listen().await,
            Ok("move pawn e2 e4".to_string())
        );
        assert_eq!(recognizer.listen().await, Ok("take d4 e5".to_string()));
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let recognizer = TypedRecognizer::from_reader("\n   \ne2 e4\n".as_bytes());
        assert_eq!(recognizer.listen().await, Ok("e2 e4".to_string()));
    }

    #[tokio::test]
    async fn closed_input_is_a_backend_error() {
        let recognizer = TypedRecognizer::from_reader("e2 e4\n".as_bytes());
        assert!(recognizer.listen().await.is_ok());
        assert!(matches!(
            recognizer.listen().await,
            Err(RecognizerError::Backend(_))
        ));
    }
}
