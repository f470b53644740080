// This file is part of the rochade library.
// Copyright (C) 2017-2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Rules state of a game: board, side to move and en passant target.

use core::{error, fmt};

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::{
    attacks,
    board::Board,
    color::Color,
    fen::Fen,
    notation::{move_notation, Notation},
    role::Role,
    rules::{is_valid_move, perform_special_moves},
    square::Square,
    status::{game_status, Status},
    types::{Move, Piece},
};

/// A container for moves that can be stored inline on the stack.
pub type MoveList = ArrayVec<Move, 256>;

bitflags! {
    /// Reasons for a [`Position`] to be rejected.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// There are no pieces on the board.
        const EMPTY_BOARD = 1 << 0;

        /// A king is required for each side.
        const MISSING_KING = 1 << 1;

        /// At most one king per side.
        const TOO_MANY_KINGS = 1 << 2;

        /// There are pawns on the first or last row.
        const PAWNS_ON_BACKRANK = 1 << 3;

        /// The en passant target is not on the row behind a pawn of the
        /// side that just moved, or the pawn could not have advanced two
        /// squares to get there. The target is discarded.
        const INVALID_EP_SQUARE = 1 << 4;

        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 5;

        /// More than 16 pieces for a side, or more pawns and promoted
        /// pieces than 8 pawns could account for. This kind can not be
        /// ignored.
        const TOO_MUCH_MATERIAL = 1 << 6;
    }
}

/// Error when trying to create a [`Position`] from an illegal setup.
///
/// # Examples
///
/// ```
/// use rochade::{fen::Fen, Position, PositionErrorKinds};
///
/// let fen: Fen = "8/8/8/8/8/8/8/4K3 w - - 0 1".parse()?;
/// let err = Position::from_setup(fen).expect_err("black king is missing");
/// assert_eq!(err.kinds(), PositionErrorKinds::MISSING_KING);
///
/// let pos = err.ignore(PositionErrorKinds::MISSING_KING)?;
/// assert_eq!(pos.board().count(), 1);
///
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct PositionError {
    pos: Position,
    errors: PositionErrorKinds,
}

impl PositionError {
    /// Ignores the given kinds of errors, returning the position if no
    /// other errors remain.
    ///
    /// # Errors
    ///
    /// Returns the error again if it has further kinds.
    pub fn ignore(mut self, ignore: PositionErrorKinds) -> Result<Position, PositionError> {
        self.errors &= !(ignore - PositionErrorKinds::TOO_MUCH_MATERIAL);
        if self.errors.is_empty() {
            Ok(self.pos)
        } else {
            Err(self)
        }
    }

    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Debug for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionError")
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut first = true;
        for (kind, reason) in [
            (PositionErrorKinds::EMPTY_BOARD, "empty board"),
            (PositionErrorKinds::MISSING_KING, "missing king"),
            (PositionErrorKinds::TOO_MANY_KINGS, "too many kings"),
            (PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
            (PositionErrorKinds::INVALID_EP_SQUARE, "invalid en passant square"),
            (PositionErrorKinds::OPPOSITE_CHECK, "opposite check"),
            (PositionErrorKinds::TOO_MUCH_MATERIAL, "too much material"),
        ] {
            if self.errors.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl error::Error for PositionError {}

/// Error when trying to play an illegal move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayError {
    /// The game is over.
    GameOver,
    /// There is no piece on the origin square.
    NoPiece,
    /// The piece on the origin square belongs to the side not to move.
    WrongTurn,
    /// The piece can not make the move.
    IllegalMove,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PlayError::GameOver => "game is over",
            PlayError::NoPiece => "no piece on origin square",
            PlayError::WrongTurn => "not this side's turn",
            PlayError::IllegalMove => "illegal move",
        })
    }
}

impl error::Error for PlayError {}

/// Board, side to move and en passant target.
///
/// # Examples
///
/// ```
/// use rochade::{Color, Move, Position, Square};
///
/// let mut pos = Position::new();
/// assert_eq!(pos.legal_moves().len(), 20);
///
/// let notation = pos.play(Move::new(Square::E2, Square::E4))?;
/// assert_eq!(notation.to_string(), "e4");
/// assert_eq!(pos.turn(), Color::Black);
/// assert_eq!(pos.ep_square(), Some(Square::E3));
///
/// # Ok::<_, rochade::PlayError>(())
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    ep_square: Option<Square>,
}

impl Position {
    /// The initial position. White to move.
    pub const fn new() -> Position {
        Position {
            board: Board::new(),
            turn: Color::White,
            ep_square: None,
        }
    }

    /// Places the given board with `turn` to move, without validation and
    /// without an en passant target.
    pub(crate) const fn from_board(board: Board, turn: Color) -> Position {
        Position {
            board,
            turn,
            ep_square: None,
        }
    }

    /// Validates a [`Fen`] and sets up a position.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the setup does not meet basic validity
    /// requirements. Some of the errors can be
    /// [ignored](PositionError::ignore).
    pub fn from_setup(setup: Fen) -> Result<Position, PositionError> {
        let mut pos = Position {
            board: setup.board,
            turn: setup.turn,
            ep_square: setup.ep_square,
        };
        let mut errors = PositionErrorKinds::empty();

        if pos.board.count() == 0 {
            errors |= PositionErrorKinds::EMPTY_BOARD;
        }

        for color in Color::ALL {
            match pos.board.count_piece(color, Role::King) {
                0 => errors |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => errors |= PositionErrorKinds::TOO_MANY_KINGS,
            }
            if pos.board.pieces_of(color).count() > 16 || promoted_material(&pos.board, color) > 8
            {
                errors |= PositionErrorKinds::TOO_MUCH_MATERIAL;
            }
        }

        if pos
            .board
            .pieces()
            .any(|(sq, piece)| piece.role == Role::Pawn && (sq.row() == 0 || sq.row() == 7))
        {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if let Some(ep_square) = pos.ep_square {
            if !pos.is_valid_ep_square(ep_square) {
                errors |= PositionErrorKinds::INVALID_EP_SQUARE;
                pos.ep_square = None;
            }
        }

        if attacks::is_king_attacked(&pos.board, !pos.turn) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        if errors.is_empty() {
            Ok(pos)
        } else {
            Err(PositionError { pos, errors })
        }
    }

    /// The target must be on the row skipped by a pawn of the side that just
    /// moved, with that pawn in front of it and its start square empty.
    fn is_valid_ep_square(&self, ep_square: Square) -> bool {
        let mover = !self.turn;
        if ep_square.row() as i8 != mover.pawn_row() as i8 + mover.forward() {
            return false;
        }
        if self.board.is_occupied(ep_square) {
            return false;
        }
        let pushed = ep_square
            .offset(mover.forward(), 0)
            .and_then(|sq| self.board.piece_at(sq));
        let origin = ep_square.offset(-mover.forward(), 0);
        pushed.is_some_and(|pawn| pawn.is(mover, Role::Pawn))
            && origin.is_some_and(|sq| !self.board.is_occupied(sq))
    }

    #[inline]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// Square skipped by the pawn that advanced two squares on the last
    /// move, if any.
    #[inline]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Tests if a piece of the side to move stands on `m.from` and may make
    /// the move.
    pub fn is_legal(&self, m: Move) -> bool {
        self.board
            .piece_at(m.from)
            .is_some_and(|piece| piece.color == self.turn && self.is_valid(piece, m))
    }

    fn is_valid(&self, piece: Piece, m: Move) -> bool {
        is_valid_move(piece, m, &self.board, self.ep_square)
    }

    /// Generates all legal moves of the side to move.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for (from, piece) in self.board.pieces_of(self.turn) {
            self.push_moves_from(from, piece, &mut moves);
        }
        moves
    }

    /// Generates the legal moves of the piece on `from`, which are none if
    /// it is not a piece of the side to move.
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if let Some(piece) = self.board.piece_at(from) {
            if piece.color == self.turn {
                self.push_moves_from(from, piece, &mut moves);
            }
        }
        moves
    }

    /// Stops once the list is full. Only boards with far more material than
    /// [`Position::from_setup()`] accepts can get there.
    fn push_moves_from(&self, from: Square, piece: Piece, moves: &mut MoveList) {
        for to in Square::all() {
            let m = Move::new(from, to);
            if self.is_valid(piece, m) && moves.try_push(m).is_err() {
                return;
            }
        }
    }

    /// Evaluates the position for the side to move.
    pub fn status(&self) -> Status {
        game_status(&self.board, self.turn)
    }

    pub fn is_check(&self) -> bool {
        self.status().is_check()
    }

    /// Plays a move without testing legality.
    ///
    /// Relocates the piece on `m.from` with all side effects: en passant
    /// capture, castling rook relocation, the moved flag, and promotion of
    /// a pawn reaching the last row to a queen. Then the turn passes.
    ///
    /// Returns `None` and leaves the position unchanged if there is no piece
    /// on `m.from`.
    pub fn play_unchecked(&mut self, m: Move) -> Option<Notation> {
        let piece = self.board.piece_at(m.from)?;
        let executed = perform_special_moves(piece, m, &self.board, self.ep_square);

        let promotion = piece.role == Role::Pawn && (m.to.row() == 0 || m.to.row() == 7);
        let notation = move_notation(piece, m, &self.board, promotion);

        self.board = executed.board;
        self.board.set_piece_at(
            m.to,
            if promotion {
                piece.color.queen()
            } else {
                piece.marked_moved()
            },
        );
        self.ep_square = executed.ep_square;
        self.turn = !self.turn;

        Some(notation)
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move is not legal. The position is left
    /// unchanged.
    pub fn play(&mut self, m: Move) -> Result<Notation, PlayError> {
        if self.status().is_game_over() {
            return Err(PlayError::GameOver);
        }
        let piece = self.board.piece_at(m.from).ok_or(PlayError::NoPiece)?;
        if piece.color != self.turn {
            return Err(PlayError::WrongTurn);
        }
        if !self.is_valid(piece, m) {
            return Err(PlayError::IllegalMove);
        }
        self.play_unchecked(m).ok_or(PlayError::NoPiece)
    }
}

/// Pawns plus pieces in excess of the initial set, which must have been
/// promoted from pawns.
fn promoted_material(board: &Board, color: Color) -> usize {
    let excess = |role: Role, initial: usize| board.count_piece(color, role).saturating_sub(initial);
    board.count_piece(color, Role::Pawn)
        + excess(Role::Queen, 1)
        + excess(Role::Rook, 2)
        + excess(Role::Bishop, 2)
        + excess(Role::Knight, 2)
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(fen: &str) -> Fen {
        fen.parse().expect("valid fen")
    }

    fn position(fen: &str) -> Position {
        Position::from_setup(setup(fen)).expect("legal position")
    }

    #[test]
    fn test_initial_moves() {
        let pos = Position::new();
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.legal_moves_from(Square::G1).len(), 2);
        assert_eq!(pos.legal_moves_from(Square::E1).len(), 0);
        assert_eq!(pos.legal_moves_from(Square::E7).len(), 0);
        assert_eq!(pos.legal_moves_from(Square::E4).len(), 0);
        assert_eq!(pos.status(), Status::Normal);
    }

    #[test]
    fn test_play() {
        let mut pos = Position::new();
        assert_eq!(
            pos.play(Move::new(Square::E7, Square::E5)),
            Err(PlayError::WrongTurn)
        );
        assert_eq!(
            pos.play(Move::new(Square::E4, Square::E5)),
            Err(PlayError::NoPiece)
        );
        assert_eq!(
            pos.play(Move::new(Square::E2, Square::E5)),
            Err(PlayError::IllegalMove)
        );
        assert_eq!(pos, Position::new());

        pos.play(Move::new(Square::E2, Square::E4))
            .expect("legal move");
        assert!(pos.board().piece_at(Square::E4).is_some_and(|p| p.moved));
        assert_eq!(pos.ep_square(), Some(Square::E3));

        pos.play(Move::new(Square::G8, Square::F6))
            .expect("legal move");
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.turn(), Color::White);
    }

    #[test]
    fn test_promotion() {
        let mut pos = position("8/1P2k3/8/8/8/8/8/4K3 w - - 0 1");
        let notation = pos
            .play(Move::new(Square::B7, Square::B8))
            .expect("legal move");
        assert_eq!(
            notation,
            Notation::Normal {
                role: Role::Pawn,
                file: None,
                capture: false,
                to: Square::B8,
                promotion: true,
            }
        );
        assert_eq!(pos.board().piece_at(Square::B8), Some(Color::White.queen()));
        assert_eq!(pos.status(), Status::Normal);
    }

    #[test]
    fn test_castling_marks_rook() {
        let mut pos = position("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let notation = pos
            .play(Move::new(Square::E8, Square::C8))
            .expect("legal move");
        assert!(notation.is_castle());
        assert!(pos.board().piece_at(Square::C8).is_some_and(|k| k.moved));
        assert!(pos.board().piece_at(Square::D8).is_some_and(|r| r.moved));
        assert_eq!(pos.board().piece_at(Square::A8), None);
    }

    #[test]
    fn test_king_missing_is_game_over() {
        let mut pos = Position::from_board(
            Board::from_board_fen(b"4k3/8/8/8/8/8/4P3/8").expect("valid board fen"),
            Color::White,
        );
        assert_eq!(pos.status(), Status::KingMissing);
        assert_eq!(
            pos.play(Move::new(Square::E2, Square::E3)),
            Err(PlayError::GameOver)
        );
        assert_eq!(
            pos.play_unchecked(Move::new(Square::E2, Square::E3))
                .map(|n| n.is_capture()),
            Some(false)
        );
    }

    #[test]
    fn test_play_unchecked_empty_square() {
        let mut pos = Position::new();
        assert_eq!(pos.play_unchecked(Move::new(Square::E4, Square::E5)), None);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn test_move_list_capacity() {
        // 279 queen and king moves for white.
        let board =
            Board::from_board_fen(b"kQQQQQQQ/Q6Q/Q6Q/Q6Q/Q6Q/Q4Q1Q/Q6Q/QQQQQQQK")
                .expect("valid board fen");
        let pos = Position::from_board(board, Color::White);
        assert_eq!(pos.legal_moves().len(), 256);

        let err = Position::from_setup(Fen {
            board,
            ..Fen::empty()
        })
        .expect_err("too much material");
        assert!(err.kinds().contains(PositionErrorKinds::TOO_MUCH_MATERIAL));
    }

    #[test]
    fn test_position_errors() {
        let err = Position::from_setup(setup("8/8/8/8/8/8/8/8 w - - 0 1"))
            .expect_err("empty board");
        assert_eq!(
            err.kinds(),
            PositionErrorKinds::EMPTY_BOARD | PositionErrorKinds::MISSING_KING
        );

        let err = Position::from_setup(setup("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"))
            .expect_err("two kings");
        assert_eq!(err.kinds(), PositionErrorKinds::TOO_MANY_KINGS);

        let err = Position::from_setup(setup("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"))
            .expect_err("pawn on backrank");
        assert_eq!(err.kinds(), PositionErrorKinds::PAWNS_ON_BACKRANK);

        let err = Position::from_setup(setup("4k2R/8/8/8/8/8/8/4K3 w - - 0 1"))
            .expect_err("black in check with white to move");
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        let err = Position::from_setup(setup("4k3/8/8/8/8/8/PPPPPPPP/PPPPK3 w - - 0 1"))
            .expect_err("too many pawns");
        assert!(err.kinds().contains(PositionErrorKinds::TOO_MUCH_MATERIAL));
        assert!(err.ignore(PositionErrorKinds::all()).is_err());
    }

    #[test]
    fn test_ep_square_validation() {
        let pos = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(pos.ep_square(), Some(Square::D6));
        assert!(pos.is_legal(Move::new(Square::E5, Square::D6)));

        let err = Position::from_setup(setup("4k3/8/8/4P3/8/8/8/4K3 w - d6 0 2"))
            .expect_err("no pawn in front of target");
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_EP_SQUARE);
        let pos = err
            .ignore(PositionErrorKinds::INVALID_EP_SQUARE)
            .expect("only invalid ep square");
        assert_eq!(pos.ep_square(), None);

        let err = Position::from_setup(setup("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 2"))
            .expect_err("wrong side to move");
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_EP_SQUARE);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_error_display() {
        use alloc::string::ToString;

        let err = Position::from_setup(setup("8/8/8/8/8/8/8/8 w - - 0 1"))
            .expect_err("empty board");
        assert_eq!(
            err.to_string(),
            "illegal position: empty board, missing king"
        );
    }
}
