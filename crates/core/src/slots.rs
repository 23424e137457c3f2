//! Tokenizes an utterance and extracts typed slots from it.

use crate::lexicon::{ActionKind, Lexicon, PieceKind};
use crate::square::{Square, SquareError};

/// A square-shaped token candidate and its validation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareSlot {
    /// The lowercased token as it appeared in the utterance.
    pub raw: String,
    /// Valid coordinate or range rejection for `raw`.
    pub resolution: Result<Square, SquareError>,
}

/// The partially-filled slot set extracted from one utterance.
///
/// Completeness is not judged here; the interpreter decides whether these
/// slots amount to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSlots {
    pub piece: Option<PieceKind>,
    pub action: Option<ActionKind>,
    /// At most two entries, in utterance order: candidate start then end.
    pub squares: Vec<SquareSlot>,
}

/// Single shared extraction pass over an utterance.
///
/// Stateless between calls; equal utterances always yield equal slots.
#[derive(Debug, Clone)]
pub struct SlotExtractor {
    lexicon: Lexicon,
}

impl SlotExtractor {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Splits on whitespace and classifies each lowercased token in fixed
    /// order: piece name, then action verb, then square shape.
    ///
    /// The first piece name wins; the last action verb wins (a later verb
    /// reads as the speaker correcting themselves). Every square-shaped
    /// token is resolved through [`Square::from_algebraic`] regardless of
    /// range validity, and the first two such tokens become the start and
    /// end candidates; third and later square-shaped tokens are silently
    /// ignored, as are tokens matching no category.
    pub fn extract(&self, utterance: &str) -> ExtractedSlots {
        let mut slots = ExtractedSlots::default();
        for token in utterance.split_whitespace() {
            let word = token.to_lowercase();
            if let Some(piece) = self.lexicon.piece(&word) {
                slots.piece.get_or_insert(piece);
                continue;
            }
            if let Some(action) = self.lexicon.action(&word) {
                slots.action = Some(action);
                continue;
            }
            if Square::is_square_shaped(&word) && slots.squares.len() < 2 {
                let resolution = Square::from_algebraic(&word);
                slots.squares.push(SquareSlot {
                    raw: word,
                    resolution,
                });
            }
        }
        slots
    }
}
