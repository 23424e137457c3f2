//! Turns extracted slots into a validated move intent or a typed failure.

use crate::lexicon::{ActionKind, Lexicon, PieceKind};
use crate::slots::SlotExtractor;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A syntactically complete move intent.
///
/// Start and end are mandatory by construction; legality against a board is
/// the move validator's job, not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedCommand {
    pub action: ActionKind,
    /// Carried through as metadata when a piece name was spoken.
    pub piece: Option<PieceKind>,
    pub start: Square,
    pub end: Square,
}

impl InterpretedCommand {
    /// The confirmation line shown to the player, in algebraic notation.
    pub fn describe(&self) -> String {
        let verb = match self.action {
            ActionKind::Move => "Move",
            ActionKind::Capture => "Capture",
        };
        match self.piece {
            Some(piece) => format!("{} {} from {} to {}", verb, piece, self.start, self.end),
            None => format!("{} from {} to {}", verb, self.start, self.end),
        }
    }
}

/// Every way one pipeline invocation can fail. All variants are recoverable;
/// `Display` is the human-readable feedback line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("No speech detected. Try again.")]
    AudioTimeout,
    #[error("Could not understand the audio. Try again.")]
    UnintelligibleAudio,
    #[error("Speech recognition is unavailable: {0}")]
    RecognitionServiceError(String),
    #[error("A move needs two squares; heard {found}.")]
    Incomplete { found: usize },
    #[error("'{token}' is not a square on the board.")]
    InvalidSquareRange { token: String },
}

/// A failed invocation: the reason, plus the transcript when one existed
/// (capture-stage failures carry no utterance).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct InterpretationFailure {
    pub kind: FailureKind,
    pub utterance: Option<String>,
}

impl InterpretationFailure {
    pub fn from_capture(kind: FailureKind) -> Self {
        Self {
            kind,
            utterance: None,
        }
    }
}

impl fmt::Display for InterpretationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Applies the completeness and ambiguity policy on top of slot extraction.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    extractor: SlotExtractor,
}

impl CommandInterpreter {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            extractor: SlotExtractor::new(lexicon),
        }
    }

    /// Interprets one utterance into a command.
    ///
    /// Decision order: a range-invalid square token fails the whole command
    /// first, naming the first offender; then fewer than two valid squares
    /// is `Incomplete` with the count found. Otherwise the first two valid
    /// squares become start and end, the action defaults to `Move` when no
    /// verb was spoken, and a missing piece name is never an error.
    pub fn interpret(
        &self,
        utterance: &str,
    ) -> Result<InterpretedCommand, InterpretationFailure> {
        let slots = self.extractor.extract(utterance);

        if let Some(slot) = slots.squares.iter().find(|s| s.resolution.is_err()) {
            return Err(InterpretationFailure {
                kind: FailureKind::InvalidSquareRange {
                    token: slot.raw.clone(),
                },
                utterance: Some(utterance.to_string()),
            });
        }

        let squares: Vec<Square> = slots
            .squares
            .iter()
            .filter_map(|s| s.resolution.clone().ok())
            .collect();
        if squares.len() < 2 {
            return Err(InterpretationFailure {
                kind: FailureKind::Incomplete {
                    found: squares.len(),
                },
                utterance: Some(utterance.to_string()),
            });
        }

        Ok(InterpretedCommand {
            action: slots.action.unwrap_or_default(),
            piece: slots.piece,
            start: squares[0],
            end: squares[1],
        })
    }
}
