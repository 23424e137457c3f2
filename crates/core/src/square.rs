//! Validated board coordinates and their algebraic-notation text form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reasons a token cannot be read as a board square.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SquareError {
    /// The token is not a file letter followed by a rank digit.
    #[error("'{0}' is not shaped like a square (expected e.g. \"e2\")")]
    NotSquareShaped(String),
    /// The token is square-shaped but names a file outside a-h or a rank
    /// outside 1-8 (e.g. "i9").
    #[error("'{0}' is outside the board (files a-h, ranks 1-8)")]
    OutOfRange(String),
}

/// A board square as a zero-based `(row, col)` pair.
///
/// Row 0 is rank 8 (the top of the board as White sees it) and col 0 is
/// file 'a'. Both components are guaranteed to be in `0..=7`: the only ways
/// to obtain a `Square` are the checked constructors below, so no value with
/// an out-of-range component can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Builds a square from raw components, rejecting anything off-board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Whether a token has the two-character letter+digit shape of a square.
    ///
    /// Shape only — "i9" passes. Range is checked by [`Square::from_algebraic`].
    pub fn is_square_shaped(token: &str) -> bool {
        let mut chars = token.chars();
        matches!(
            (chars.next(), chars.next(), chars.next()),
            (Some(letter), Some(digit), None)
                if letter.is_ascii_alphabetic() && digit.is_ascii_digit()
        )
    }

    /// Parses an algebraic-notation token ("e2") into a square.
    ///
    /// Case-insensitive on the file letter. A square-shaped token whose file
    /// or rank is off-board is `SquareError::OutOfRange`, never a valid
    /// square.
    pub fn from_algebraic(token: &str) -> Result<Self, SquareError> {
        if !Self::is_square_shaped(token) {
            return Err(SquareError::NotSquareShaped(token.to_string()));
        }
        // Shape-valid tokens are exactly two ASCII bytes.
        let bytes = token.as_bytes();
        let letter = bytes[0].to_ascii_lowercase();
        let digit = bytes[1];
        if !(b'a'..=b'h').contains(&letter) || !(b'1'..=b'8').contains(&digit) {
            return Err(SquareError::OutOfRange(token.to_string()));
        }
        Ok(Self {
            row: 8 - (digit - b'0'),
            col: letter - b'a',
        })
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// The square offset by `(dr, dc)`, or `None` when it falls off-board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Iterates all 64 squares, a8 first, h1 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    /// Renders algebraic notation: file letter then rank digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = 8 - self.row;
        write!(f, "{}{}", file, rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_e2_to_row_col() {
        let sq = Square::from_algebraic("e2").unwrap();
        assert_eq!((sq.row(), sq.col()), (6, 4));
    }

    #[test]
    fn file_letter_is_case_insensitive() {
        assert_eq!(Square::from_algebraic("E2"), Square::from_algebraic("e2"));
    }

    #[test]
    fn rejects_wrong_shapes() {
        for token in ["", "e", "e22", "22", "ee", "2e", "pawn"] {
            assert_eq!(
                Square::from_algebraic(token),
                Err(SquareError::NotSquareShaped(token.to_string())),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn rejects_shape_valid_out_of_range_tokens() {
        for token in ["i9", "a9", "i1", "a0", "z5"] {
            assert_eq!(
                Square::from_algebraic(token),
                Err(SquareError::OutOfRange(token.to_string())),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn new_rejects_out_of_range_components() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::new(7, 7).is_some());
    }

    #[test]
    fn display_round_trips_all_64_squares() {
        for sq in Square::all() {
            assert_eq!(Square::from_algebraic(&sq.to_string()), Ok(sq));
        }
    }

    #[test]
    fn offset_stays_on_board() {
        let a8 = Square::from_algebraic("a8").unwrap();
        assert!(a8.offset(-1, 0).is_none());
        assert!(a8.offset(0, -1).is_none());
        assert_eq!(a8.offset(1, 1), Square::from_algebraic("b7").ok());
    }
}
