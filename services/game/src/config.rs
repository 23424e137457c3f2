use blindfold_core::{ActionKind, Lexicon, PieceKind};
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which recognizer backend feeds the capture gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognizerKind {
    /// Typed commands read from stdin.
    Typed,
    /// A remote speech-to-text sidecar that owns microphone and model.
    Remote,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub recognizer: RecognizerKind,
    pub stt_url: Option<String>,
    pub listen_timeout: Duration,
    pub calibrate: bool,
    pub notice_ttl: Duration,
    pub piece_words: Vec<(String, PieceKind)>,
    pub action_words: Vec<(String, ActionKind)>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let recognizer_str =
            std::env::var("BLINDFOLD_RECOGNIZER").unwrap_or_else(|_| "typed".to_string());
        let recognizer = match recognizer_str.to_lowercase().as_str() {
            "remote" => RecognizerKind::Remote,
            _ => RecognizerKind::Typed,
        };

        let stt_url = std::env::var("BLINDFOLD_STT_URL").ok();
        if recognizer == RecognizerKind::Remote && stt_url.is_none() {
            return Err(ConfigError::MissingVar(
                "BLINDFOLD_STT_URL must be set for the 'remote' recognizer".to_string(),
            ));
        }

        let listen_timeout = parse_secs("BLINDFOLD_LISTEN_TIMEOUT_SECS", 5)?;
        let notice_ttl = parse_secs("BLINDFOLD_NOTICE_TTL_SECS", 2)?;

        let calibrate = match std::env::var("BLINDFOLD_CALIBRATE") {
            Err(_) => true,
            Ok(value) => value.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(
                    "BLINDFOLD_CALIBRATE".to_string(),
                    format!("'{}' is not true or false", value),
                )
            })?,
        };

        let piece_words = parse_word_list("BLINDFOLD_PIECE_WORDS", parse_piece_name)?;
        let action_words = parse_word_list("BLINDFOLD_ACTION_WORDS", parse_action_name)?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            recognizer,
            stt_url,
            listen_timeout,
            calibrate,
            notice_ttl,
            piece_words,
            action_words,
            log_level,
        })
    }

    /// Builds the extraction lexicon: the standard tables plus any
    /// configured synonyms.
    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::standard();
        for (word, kind) in &self.piece_words {
            lexicon.add_piece_word(word, *kind);
        }
        for (word, kind) in &self.action_words {
            lexicon.add_action_word(word, *kind);
        }
        lexicon
    }
}

fn parse_secs(var: &str, default: u64) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(Duration::from_secs(default)),
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ConfigError::InvalidValue(
                    var.to_string(),
                    format!("'{}' is not a number of seconds", value),
                )
            }),
    }
}

/// Parses a comma-separated `word=name` list, e.g. "horse=knight,grab=capture".
fn parse_word_list<T>(
    var: &str,
    parse_name: fn(&str) -> Option<T>,
) -> Result<Vec<(String, T)>, ConfigError> {
    let Ok(value) = std::env::var(var) else {
        return Ok(Vec::new());
    };
    let mut entries = Vec::new();
    for pair in value.split(',').filter(|p| !p.trim().is_empty()) {
        let (word, name) = pair.split_once('=').ok_or_else(|| {
            ConfigError::InvalidValue(
                var.to_string(),
                format!("'{}' is not of the form word=name", pair),
            )
        })?;
        let parsed = parse_name(name.trim()).ok_or_else(|| {
            ConfigError::InvalidValue(var.to_string(), format!("unknown name '{}'", name.trim()))
        })?;
        entries.push((word.trim().to_string(), parsed));
    }
    Ok(entries)
}

fn parse_piece_name(name: &str) -> Option<PieceKind> {
    PieceKind::all()
        .into_iter()
        .find(|kind| kind.name() == name.to_lowercase())
}

fn parse_action_name(name: &str) -> Option<ActionKind> {
    match name.to_lowercase().as_str() {
        "move" => Some(ActionKind::Move),
        "capture" => Some(ActionKind::Capture),
        _ => None,
    }
}
