//! Recognizer backends feeding the capture gateway.
//!
//! Both backends converge on the same [`SpeechRecognizer`] contract, so
//! spoken and typed commands flow through one extraction pipeline.

pub mod remote;
pub mod typed;

use crate::config::{Config, RecognizerKind};
use anyhow::{Context, Result};
use blindfold_core::SpeechRecognizer;
use std::sync::Arc;
use tracing::info;

/// Builds the recognizer named by the configuration.
pub fn build(config: &Config) -> Result<Arc<dyn SpeechRecognizer>> {
    match config.recognizer {
        RecognizerKind::Typed => {
            info!("Using typed-text recognizer (stdin).");
            Ok(Arc::new(typed::TypedRecognizer::new()))
        }
        RecognizerKind::Remote => {
            let base = config
                .stt_url
                .clone()
                .context("remote recognizer selected but no STT URL configured")?;
            info!(url = %base, "Using remote speech-to-text recognizer.");
            Ok(Arc::new(remote::RemoteRecognizer::new(base)))
        }
    }
}
