//! Voice/text command interpretation for blindfold chess move entry.
//!
//! The pipeline turns one raw utterance ("move pawn e2 e4") into a
//! validated move intent or a typed failure:
//!
//! `VoiceCommandSession` → `CaptureGateway` → (external recognizer) →
//! `CommandInterpreter` → `SlotExtractor` → `Square`
//!
//! The crate owns no audio device, board state, or rendering. It consumes
//! a [`recognizer::SpeechRecognizer`] and a [`session::FeedbackSink`]; a
//! host supplies both and acts on the resulting
//! [`command::InterpretedCommand`].

pub mod capture;
pub mod command;
pub mod lexicon;
pub mod recognizer;
pub mod session;
pub mod slots;
pub mod square;

pub use capture::{CaptureConfig, CaptureGateway, CaptureOutcome, CapturePhase};
pub use command::{CommandInterpreter, FailureKind, InterpretationFailure, InterpretedCommand};
pub use lexicon::{ActionKind, Lexicon, PieceKind};
pub use recognizer::{RecognizerError, ScriptedRecognizer, SpeechRecognizer};
pub use session::{CommandResolution, FeedbackSink, SessionBusy, VoiceCommandSession};
pub use slots::{ExtractedSlots, SlotExtractor, SquareSlot};
pub use square::{Square, SquareError};
