//! Read-only word tables consulted during slot extraction.
//!
//! The lexicon is an explicitly constructed value handed to the extractor,
//! not a module-level global: build it once at startup, share it freely
//! (it is never mutated after construction).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The six chess piece kinds a command may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// The canonical lowercase name, as spoken.
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    pub fn all() -> [PieceKind; 6] {
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the command asks to do. Defaults to `Move` when no verb is spoken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    Move,
    Capture,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionKind::Move => "move",
            ActionKind::Capture => "capture",
        })
    }
}

/// Word → meaning tables for piece names and action verbs.
///
/// Words are stored lowercased; lookups expect already-lowercased tokens
/// (the extractor normalizes before consulting the lexicon).
#[derive(Debug, Clone)]
pub struct Lexicon {
    pieces: HashMap<String, PieceKind>,
    actions: HashMap<String, ActionKind>,
}

impl Lexicon {
    /// The standard English lexicon: the six piece names, plus
    /// "move" → `Move` and both "capture" and "take" → `Capture`.
    pub fn standard() -> Self {
        let mut lexicon = Self {
            pieces: HashMap::new(),
            actions: HashMap::new(),
        };
        for kind in PieceKind::all() {
            lexicon.add_piece_word(kind.name(), kind);
        }
        lexicon.add_action_word("move", ActionKind::Move);
        lexicon.add_action_word("capture", ActionKind::Capture);
        lexicon.add_action_word("take", ActionKind::Capture);
        lexicon
    }

    /// Registers an extra synonym for a piece kind (e.g. "horse" → Knight).
    pub fn add_piece_word(&mut self, word: &str, kind: PieceKind) {
        self.pieces.insert(word.to_lowercase(), kind);
    }

    /// Registers an extra synonym for an action.
    pub fn add_action_word(&mut self, word: &str, kind: ActionKind) {
        self.actions.insert(word.to_lowercase(), kind);
    }

    pub fn piece(&self, word: &str) -> Option<PieceKind> {
        self.pieces.get(word).copied()
    }

    pub fn action(&self, word: &str) -> Option<ActionKind> {
        self.actions.get(word).copied()
    }
}
