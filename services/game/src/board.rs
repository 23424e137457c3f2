//! The board collaborator: consumes an `InterpretedCommand` and validates
//! it at piece-pattern level before mutating.
//!
//! This is deliberately not a chess legality engine: check, checkmate,
//! castling, en passant and promotion are not modeled. A command is
//! accepted when the named squares hold the right pieces and the movement
//! pattern of the piece allows the step.

use blindfold_core::{ActionKind, InterpretedCommand, PieceKind, Square};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Color::White => "White",
            Color::Black => "Black",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    fn glyph(&self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// Why the board refused a command. `Display` is the notice text shown to
/// the player.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("There is no piece on {0}.")]
    EmptyStart(Square),
    #[error("The piece on {0} is not yours.")]
    NotYourPiece(Square),
    #[error("The piece on {square} is a {actual}, not a {stated}.")]
    PieceMismatch {
        square: Square,
        stated: PieceKind,
        actual: PieceKind,
    },
    #[error("{0} is occupied by your own piece.")]
    FriendlyOccupied(Square),
    #[error("A {piece} cannot go from {from} to {to}.")]
    IllegalPattern {
        piece: PieceKind,
        from: Square,
        to: Square,
    },
    #[error("There is nothing to capture on {0}.")]
    NothingToCapture(Square),
}

/// A move the board accepted and carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
}

pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            grid: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, kind) in back_rank.into_iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col).unwrap(), Piece { kind, color: Color::Black });
            board.set(
                Square::new(1, col).unwrap(),
                Piece { kind: PieceKind::Pawn, color: Color::Black },
            );
            board.set(
                Square::new(6, col).unwrap(),
                Piece { kind: PieceKind::Pawn, color: Color::White },
            );
            board.set(Square::new(7, col).unwrap(), Piece { kind, color: Color::White });
        }
        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.row() as usize][square.col() as usize]
    }

    pub fn set(&mut self, square: Square, piece: Piece) {
        self.grid[square.row() as usize][square.col() as usize] = Some(piece);
    }

    /// Validates and applies an interpreted command for `color`.
    ///
    /// On top of the pattern checks of [`Board::apply_move`], this enforces
    /// what the player said: a stated piece name must match the piece on
    /// the start square, and a spoken `capture` must aim at an occupied
    /// square. A plain `move` that lands on an enemy piece still captures.
    pub fn apply_command(
        &mut self,
        color: Color,
        command: &InterpretedCommand,
    ) -> Result<AppliedMove, MoveError> {
        let piece = self
            .piece_at(command.start)
            .ok_or(MoveError::EmptyStart(command.start))?;
        if piece.color != color {
            return Err(MoveError::NotYourPiece(command.start));
        }
        if let Some(stated) = command.piece {
            if stated != piece.kind {
                return Err(MoveError::PieceMismatch {
                    square: command.start,
                    stated,
                    actual: piece.kind,
                });
            }
        }
        if command.action == ActionKind::Capture && self.piece_at(command.end).is_none() {
            return Err(MoveError::NothingToCapture(command.end));
        }
        self.apply_move(color, command.start, command.end)
    }

    /// Validates and applies a bare (from, to) move for `color`. Used by
    /// `apply_command` and directly by the engine opponent.
    pub fn apply_move(
        &mut self,
        color: Color,
        from: Square,
        to: Square,
    ) -> Result<AppliedMove, MoveError> {
        let piece = self.piece_at(from).ok_or(MoveError::EmptyStart(from))?;
        if piece.color != color {
            return Err(MoveError::NotYourPiece(from));
        }
        if self.piece_at(to).is_some_and(|target| target.color == color) {
            return Err(MoveError::FriendlyOccupied(to));
        }
        if !self.reachable(piece, from, to) {
            return Err(MoveError::IllegalPattern {
                piece: piece.kind,
                from,
                to,
            });
        }
        let captured = self.grid[to.row() as usize][to.col() as usize].take();
        self.grid[from.row() as usize][from.col() as usize] = None;
        self.grid[to.row() as usize][to.col() as usize] = Some(piece);
        Ok(AppliedMove {
            piece,
            from,
            to,
            captured,
        })
    }

    /// Every pattern-legal (from, to) pair for `color`, for the engine.
    pub fn moves_for(&self, color: Color) -> Vec<(Square, Square)> {
        let mut moves = Vec::new();
        for from in Square::all() {
            let Some(piece) = self.piece_at(from) else {
                continue;
            };
            if piece.color != color {
                continue;
            }
            for to in Square::all() {
                if from == to {
                    continue;
                }
                if self.piece_at(to).is_some_and(|target| target.color == color) {
                    continue;
                }
                if self.reachable(piece, from, to) {
                    moves.push((from, to));
                }
            }
        }
        moves
    }

    /// Whether `piece` can step from `from` to `to` by its movement
    /// pattern, given current occupancy. Friendly occupancy of `to` is the
    /// caller's check.
    fn reachable(&self, piece: Piece, from: Square, to: Square) -> bool {
        let dr = to.row() as i8 - from.row() as i8;
        let dc = to.col() as i8 - from.col() as i8;
        match piece.kind {
            PieceKind::Pawn => {
                let (dir, home_row) = match piece.color {
                    Color::White => (-1i8, 6u8),
                    Color::Black => (1i8, 1u8),
                };
                if dc == 0 && dr == dir {
                    return self.piece_at(to).is_none();
                }
                if dc == 0 && dr == 2 * dir && from.row() == home_row {
                    return from.offset(dir, 0).is_some_and(|step| {
                        self.piece_at(step).is_none() && self.piece_at(to).is_none()
                    });
                }
                if dc.abs() == 1 && dr == dir {
                    return self
                        .piece_at(to)
                        .is_some_and(|target| target.color != piece.color);
                }
                false
            }
            PieceKind::Knight => matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1)),
            PieceKind::Bishop => dr.abs() == dc.abs() && dr != 0 && self.ray_clear(from, to),
            PieceKind::Rook => (dr == 0) != (dc == 0) && self.ray_clear(from, to),
            PieceKind::Queen => {
                let straight = (dr == 0) != (dc == 0);
                let diagonal = dr.abs() == dc.abs() && dr != 0;
                (straight || diagonal) && self.ray_clear(from, to)
            }
            PieceKind::King => dr.abs().max(dc.abs()) == 1,
        }
    }

    /// Whether every square strictly between `from` and `to` (on a shared
    /// rank, file or diagonal) is empty.
    fn ray_clear(&self, from: Square, to: Square) -> bool {
        let dr = (to.row() as i8 - from.row() as i8).signum();
        let dc = (to.col() as i8 - from.col() as i8).signum();
        let mut current = from;
        loop {
            current = match current.offset(dr, dc) {
                Some(next) => next,
                None => return false,
            };
            if current == to {
                return true;
            }
            if self.piece_at(current).is_some() {
                return false;
            }
        }
    }

    /// The board as text, with Unicode glyphs and a file/rank legend.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            out.push_str(&format!("{} ", 8 - row));
            for col in 0..8u8 {
                let square = Square::new(row, col).unwrap();
                match self.piece_at(square) {
                    Some(piece) => out.push(piece.glyph()),
                    None => out.push('·'),
                }
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blindfold_core::{CommandInterpreter, Lexicon};

    fn sq(token: &str) -> Square {
        Square::from_algebraic(token).unwrap()
    }

    fn command(utterance: &str) -> InterpretedCommand {
        CommandInterpreter::new(Lexicon::standard())
            .interpret(utterance)
            .unwrap()
    }

    #[test]
    fn standard_setup_places_both_armies() {
        let board = Board::standard();
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece { kind: PieceKind::King, color: Color::White })
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece { kind: PieceKind::Queen, color: Color::Black })
        );
        assert_eq!(
            board.piece_at(sq("a7")),
            Some(Piece { kind: PieceKind::Pawn, color: Color::Black })
        );
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn pawn_double_push_from_home_row() {
        let mut board = Board::standard();
        let applied = board
            .apply_command(Color::White, &command("move pawn e2 e4"))
            .unwrap();
        assert_eq!(applied.from, sq("e2"));
        assert_eq!(applied.to, sq("e4"));
        assert_eq!(applied.captured, None);
        assert_eq!(board.piece_at(sq("e2")), None);
        assert!(board.piece_at(sq("e4")).is_some());
    }

    #[test]
    fn pawn_double_push_is_blocked_by_an_intervening_piece() {
        let mut board = Board::standard();
        board.set(sq("e3"), Piece { kind: PieceKind::Knight, color: Color::Black });
        let err = board
            .apply_command(Color::White, &command("pawn e2 e4"))
            .unwrap_err();
        assert!(matches!(err, MoveError::IllegalPattern { .. }));
    }

    #[test]
    fn pawn_cannot_triple_push() {
        let mut board = Board::standard();
        let err = board
            .apply_command(Color::White, &command("pawn e2 e5"))
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::IllegalPattern {
                piece: PieceKind::Pawn,
                from: sq("e2"),
                to: sq("e5"),
            }
        );
    }

    #[test]
    fn knight_jumps_over_the_pawn_rank() {
        let mut board = Board::standard();
        assert!(
            board
                .apply_command(Color::White, &command("knight g1 f3"))
                .is_ok()
        );
    }

    #[test]
    fn sliding_pieces_are_blocked_by_occupied_rays() {
        let mut board = Board::standard();
        // The c1 bishop is behind its own pawns.
        let err = board
            .apply_command(Color::White, &command("bishop c1 g5"))
            .unwrap_err();
        assert!(matches!(err, MoveError::IllegalPattern { .. }));
    }

    #[test]
    fn empty_start_square_is_rejected() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply_command(Color::White, &command("e4 e5")),
            Err(MoveError::EmptyStart(sq("e4")))
        );
    }

    #[test]
    fn cannot_move_the_opponents_piece() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply_command(Color::White, &command("pawn e7 e5")),
            Err(MoveError::NotYourPiece(sq("e7")))
        );
    }

    #[test]
    fn stated_piece_must_match_the_board() {
        let mut board = Board::standard();
        let err = board
            .apply_command(Color::White, &command("rook e2 e4"))
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::PieceMismatch {
                square: sq("e2"),
                stated: PieceKind::Rook,
                actual: PieceKind::Pawn,
            }
        );
    }

    #[test]
    fn spoken_capture_of_an_empty_square_is_rejected() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply_command(Color::White, &command("take e2 e4")),
            Err(MoveError::NothingToCapture(sq("e4")))
        );
    }

    #[test]
    fn a_plain_move_onto_an_enemy_piece_still_captures() {
        let mut board = Board::empty();
        board.set(sq("d4"), Piece { kind: PieceKind::Queen, color: Color::White });
        board.set(sq("d7"), Piece { kind: PieceKind::Pawn, color: Color::Black });
        let applied = board
            .apply_command(Color::White, &command("queen d4 d7"))
            .unwrap();
        assert_eq!(
            applied.captured,
            Some(Piece { kind: PieceKind::Pawn, color: Color::Black })
        );
    }

    #[test]
    fn friendly_destination_is_rejected() {
        let mut board = Board::standard();
        assert_eq!(
            board.apply_command(Color::White, &command("rook a1 a2")),
            Err(MoveError::FriendlyOccupied(sq("a2")))
        );
    }

    #[test]
    fn opening_position_has_twenty_moves_per_side() {
        let board = Board::standard();
        assert_eq!(board.moves_for(Color::White).len(), 20);
        assert_eq!(board.moves_for(Color::Black).len(), 20);
    }

    #[test]
    fn every_enumerated_move_applies_cleanly() {
        let board = Board::standard();
        for (from, to) in board.moves_for(Color::Black) {
            let mut scratch = Board::standard();
            scratch
                .apply_move(Color::Black, from, to)
                .unwrap_or_else(|e| panic!("{} -> {} should apply: {}", from, to, e));
        }
    }

    #[test]
    fn render_includes_the_legend() {
        let rendered = Board::standard().render();
        assert!(rendered.contains("a b c d e f g h"));
        assert!(rendered.starts_with("8 "));
    }
}
