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

//! Move legality and execution.
//!
//! [`is_valid_move()`] decides whether a piece may make a move, and
//! [`perform_special_moves()`] produces the board after a legal move,
//! including en passant captures and castling rook relocation.
//!
//! # Examples
//!
//! ```
//! use rochade::{rules, Board, Color, Move, Square};
//!
//! let board = Board::new();
//! let pawn = Color::White.pawn();
//! let m = Move::new(Square::E2, Square::E4);
//!
//! assert!(rules::is_valid_move(pawn, m, &board, None));
//!
//! let executed = rules::perform_special_moves(pawn, m, &board, None);
//! assert_eq!(executed.board.piece_at(Square::E4), Some(pawn));
//! assert_eq!(executed.ep_square, Some(Square::E3));
//! ```

use crate::{
    attacks,
    board::Board,
    castling_side::CastlingSide,
    role::Role,
    square::Square,
    types::{Move, Piece},
};

/// Board and en passant target after a move.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Executed {
    pub board: Board,
    /// Square skipped by a pawn that just advanced two squares.
    pub ep_square: Option<Square>,
}

/// Tests if `piece`, standing on `m.from`, may make the move `m`.
///
/// Besides the movement rules of each piece type, the move must not leave
/// the mover's own king attacked. The test simulates the move on a scratch
/// board and scans all opposing pieces. Castling additionally requires that
/// the king is not in check and does not pass an attacked square.
///
/// The board is not asked what stands on `m.from`. Whose turn it is, is the
/// caller's concern.
pub fn is_valid_move(piece: Piece, m: Move, board: &Board, ep_square: Option<Square>) -> bool {
    if m.from == m.to {
        return false;
    }

    if board.color_at(m.to) == Some(piece.color) {
        return false;
    }

    let geometry = match piece.role {
        Role::Pawn => validate_pawn(piece, m, board, ep_square),
        Role::Knight => attacks::knight_reaches(m.from, m.to),
        Role::Bishop => attacks::bishop_reaches(board, m.from, m.to),
        Role::Rook => attacks::rook_reaches(board, m.from, m.to),
        Role::Queen => attacks::queen_reaches(board, m.from, m.to),
        Role::King => {
            if attacks::king_reaches(m.from, m.to) {
                true
            } else if let Some(side) = CastlingSide::from_king_move(m.from, m.to) {
                validate_castling(piece, m.from, side, board)
            } else {
                false
            }
        }
    };

    geometry && !leaves_king_attacked(piece, m, board, ep_square)
}

fn validate_pawn(piece: Piece, m: Move, board: &Board, ep_square: Option<Square>) -> bool {
    let forward = piece.color.forward();
    let (drow, dcol) = (m.drow(), m.dcol());

    if dcol == 0 {
        if drow == forward {
            return !board.is_occupied(m.to);
        }
        if drow == 2 * forward && m.from.row() == piece.color.pawn_row() {
            return m
                .from
                .offset(forward, 0)
                .is_some_and(|skipped| !board.is_occupied(skipped))
                && !board.is_occupied(m.to);
        }
        return false;
    }

    if dcol.abs() == 1 && drow == forward {
        return board.is_occupied(m.to) || ep_square == Some(m.to);
    }

    false
}

fn validate_castling(king: Piece, from: Square, side: CastlingSide, board: &Board) -> bool {
    if king.moved || from != CastlingSide::king_from(king.color) {
        return false;
    }

    let row = from.row();
    let rook_from = Square::from_row_col(row, side.rook_from_col());
    if !board
        .piece_at(rook_from)
        .is_some_and(|rook| rook.is(king.color, Role::Rook) && !rook.moved)
    {
        return false;
    }

    if side
        .between_cols()
        .iter()
        .any(|&col| board.is_occupied(Square::from_row_col(row, col)))
    {
        return false;
    }

    // Not out of check and not through check. The landing square is covered
    // by the general check-safety simulation of the full castling move.
    if attacks::is_attacked(board, from, !king.color) {
        return false;
    }
    let passed = Square::from_row_col(row, side.rook_to_col());
    let mut scratch = *board;
    scratch.remove_piece_at(from);
    scratch.set_piece_at(passed, king);
    !attacks::is_attacked(&scratch, passed, !king.color)
}

/// Simulates `m` on a scratch board and tests whether the mover's king is
/// attacked afterwards.
fn leaves_king_attacked(piece: Piece, m: Move, board: &Board, ep_square: Option<Square>) -> bool {
    let scratch = perform_special_moves(piece, m, board, ep_square).board;
    attacks::is_king_attacked(&scratch, piece.color)
}

/// Produces the board after `piece` makes the move `m`.
///
/// Assumes the move is legal. Works on a copy of `board`:
///
/// * A pawn moving diagonally onto an empty square captures en passant:
///   the pawn beside `m.from` on the destination column is removed.
/// * The piece is relocated as given. Moved flags and promotion are left to
///   the caller.
/// * A pawn advancing two squares sets the new en passant target to the
///   square it skipped. Otherwise there is no target.
/// * A king moving two columns brings the rook of that side along, which is
///   marked as moved.
pub fn perform_special_moves(
    piece: Piece,
    m: Move,
    board: &Board,
    _ep_square: Option<Square>,
) -> Executed {
    let mut next = *board;

    if piece.role == Role::Pawn && m.dcol() != 0 && !board.is_occupied(m.to) {
        next.remove_piece_at(Square::from_row_col(m.from.row(), m.to.col()));
    }

    next.remove_piece_at(m.from);
    next.set_piece_at(m.to, piece);

    let ep_square = if piece.role == Role::Pawn && m.drow().abs() == 2 {
        Some(Square::from_row_col(
            (m.from.row() + m.to.row()) / 2,
            m.from.col(),
        ))
    } else {
        None
    };

    if piece.role == Role::King && m.dcol().abs() == 2 {
        if let Some(side) = CastlingSide::from_king_move(m.from, m.to) {
            let row = m.from.row();
            if let Some(rook) = next.remove_piece_at(Square::from_row_col(row, side.rook_from_col()))
            {
                next.set_piece_at(
                    Square::from_row_col(row, side.rook_to_col()),
                    rook.marked_moved(),
                );
            }
        }
    }

    Executed {
        board: next,
        ep_square,
    }
}
