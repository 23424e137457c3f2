//! The engine opponent: a uniform-random move policy.

use crate::board::{Board, Color};
use blindfold_core::Square;
use rand::seq::IndexedRandom;

/// Picks any pattern-legal move for its color, uniformly at random.
pub struct RandomMover {
    color: Color,
}

impl RandomMover {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `None` when the side has no pattern-legal moves left.
    pub fn choose(&self, board: &Board) -> Option<(Square, Square)> {
        board.moves_for(self.color).choose(&mut rand::rng()).copied()
    }
}
