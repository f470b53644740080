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

//! Piece geometry and attack tests on a [`Board`].
//!
//! These are pure geometric tests. They know nothing about whose turn it
//! is, castling rights or en passant, and never ask whether a move would
//! expose the mover's own king.
//!
//! # Examples
//!
//! ```
//! use rochade::{attacks, Board, Color, Square};
//!
//! let board = Board::new();
//! assert!(attacks::is_attacked(&board, Square::F3, Color::White));
//! assert!(!attacks::is_attacked(&board, Square::E4, Color::White));
//! ```

use arrayvec::ArrayVec;

use crate::{board::Board, color::Color, role::Role, square::Square, types::Piece};

/// Squares of pieces attacking a square.
pub type Attackers = ArrayVec<Square, 64>;

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Tests that every square strictly between `from` and `to` is empty.
///
/// `from` and `to` must lie on a common rank, file or diagonal.
fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    let (step_row, step_col) = (drow.signum(), dcol.signum());
    let mut sq = from;
    loop {
        sq = match sq.offset(step_row, step_col) {
            Some(next) => next,
            None => return false,
        };
        if sq == to {
            return true;
        }
        if board.is_occupied(sq) {
            return false;
        }
    }
}

/// Rook geometry: a straight line along a rank or file with nothing in
/// between.
pub fn rook_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    (drow == 0) != (dcol == 0) && path_clear(board, from, to)
}

/// Bishop geometry: a diagonal with nothing in between.
pub fn bishop_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    drow != 0 && drow.abs() == dcol.abs() && path_clear(board, from, to)
}

pub fn queen_reaches(board: &Board, from: Square, to: Square) -> bool {
    rook_reaches(board, from, to) || bishop_reaches(board, from, to)
}

/// Knight geometry. Knights jump, so the board does not matter.
pub fn knight_reaches(from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    matches!((drow.abs(), dcol.abs()), (1, 2) | (2, 1))
}

/// King geometry: any adjacent square.
pub fn king_reaches(from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    from != to && drow.abs() <= 1 && dcol.abs() <= 1
}

/// Pawn capture geometry: one square diagonally forward.
pub fn pawn_attacks(color: Color, from: Square, to: Square) -> bool {
    let (drow, dcol) = deltas(from, to);
    drow == color.forward() && dcol.abs() == 1
}

/// Tests if `piece` standing on `from` attacks `to`.
///
/// This is the reduced test used for check detection: pawns only attack
/// diagonally forward, and no piece is asked whether moving would expose
/// its own king.
pub fn attacks(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, from, to),
        Role::Knight => knight_reaches(from, to),
        Role::Bishop => bishop_reaches(board, from, to),
        Role::Rook => rook_reaches(board, from, to),
        Role::Queen => queen_reaches(board, from, to),
        Role::King => king_reaches(from, to),
    }
}

/// Squares of all pieces of color `by` that attack `sq`.
pub fn attackers(board: &Board, sq: Square, by: Color) -> Attackers {
    board
        .pieces_of(by)
        .filter(|&(from, piece)| attacks(board, piece, from, sq))
        .map(|(from, _)| from)
        .collect()
}

/// Tests if any piece of color `by` attacks `sq`.
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| attacks(board, piece, from, sq))
}

/// Tests if the king of `color` is attacked by the other side.
///
/// A board without such a king has no king in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_of(color)
        .is_some_and(|king| is_attacked(board, king, !color))
}
