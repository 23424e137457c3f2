//! Main entrypoint for the blindfold chess game.
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and CLI flags.
//! 2. Initializing logging.
//! 3. Building the recognizer backend and the interpretation pipeline.
//! 4. Running the terminal game loop until the game ends or Ctrl-C.

use anyhow::Context;
use blindfold_core::{CaptureConfig, CaptureGateway, CommandInterpreter, VoiceCommandSession};
use blindfold_game::{
    config::{Config, RecognizerKind},
    game::Game,
    notices::NoticeBoard,
    recognizer,
};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "blindfold", about = "Blindfold chess with spoken or typed moves")]
struct Cli {
    /// Recognizer backend: "typed" or "remote".
    #[arg(long, value_parser = parse_recognizer)]
    recognizer: Option<RecognizerKind>,
    /// Base URL of the remote speech-to-text service.
    #[arg(long)]
    stt_url: Option<String>,
    /// Seconds to wait for a transcript before giving up.
    #[arg(long)]
    listen_timeout_secs: Option<u64>,
    /// Override the ambient-noise calibration toggle.
    #[arg(long)]
    calibrate: Option<bool>,
}

fn parse_recognizer(value: &str) -> Result<RecognizerKind, String> {
    match value.to_lowercase().as_str() {
        "typed" => Ok(RecognizerKind::Typed),
        "remote" => Ok(RecognizerKind::Remote),
        other => Err(format!("'{}' is neither 'typed' nor 'remote'", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(kind) = cli.recognizer {
        config.recognizer = kind;
    }
    if let Some(url) = cli.stt_url {
        config.stt_url = Some(url);
    }
    if let Some(secs) = cli.listen_timeout_secs {
        config.listen_timeout = Duration::from_secs(secs);
    }
    if let Some(calibrate) = cli.calibrate {
        config.calibrate = calibrate;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Building the pipeline...");

    let speech = recognizer::build(&config)?;
    let gateway = CaptureGateway::new(
        speech,
        CaptureConfig {
            listen_timeout: config.listen_timeout,
            calibrate: config.calibrate,
            ..CaptureConfig::default()
        },
    );
    let interpreter = CommandInterpreter::new(config.lexicon());
    let notices = Arc::new(NoticeBoard::new(config.notice_ttl));
    let session = Arc::new(VoiceCommandSession::new(
        gateway,
        interpreter,
        notices.clone(),
    ));

    info!(
        recognizer = ?config.recognizer,
        listen_timeout = ?config.listen_timeout,
        "Pipeline ready. Starting game."
    );
    Game::new(session, notices).run().await
}
