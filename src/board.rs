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

//! Piece placement.

use core::{fmt, fmt::Write as _, ops};

use crate::{
    castling_side::CastlingSide, color::Color, role::Role, square::Square, types::Piece,
    util::AppendAscii,
};

/// [`Piece`] positions on an 8x8 grid.
///
/// A board is a plain `Copy` value. Copies never share pieces, so a board
/// can be stored in a history entry and mutated afterwards without affecting
/// the stored copy.
///
/// # Examples
///
/// ```
/// use rochade::{Board, Color, Square};
///
/// let board = Board::new();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.piece_at(Square::E4), None);
///
/// assert_eq!(board.to_string(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    rows: [[Option<Piece>; 8]; 8],
}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

impl Board {
    /// The standard starting placement. No piece has moved.
    pub const fn new() -> Board {
        let mut board = Board::empty();
        let mut col = 0;
        while col < 8 {
            board.rows[0][col] = Some(BACKRANK[col].of(Color::Black));
            board.rows[1][col] = Some(Color::Black.pawn());
            board.rows[6][col] = Some(Color::White.pawn());
            board.rows[7][col] = Some(BACKRANK[col].of(Color::White));
            col += 1;
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            rows: [[None; 8]; 8],
        }
    }

    /// Parses the piece placement part of a FEN, such as
    /// `rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR`.
    ///
    /// Moved flags are inferred from placement alone: pawns off their start
    /// row, kings off their home square and rooks off their corners count
    /// as moved.
    pub fn from_board_fen(board_fen: &[u8]) -> Option<Board> {
        let mut board = Board::empty();
        let mut row: usize = 0;
        let mut col: usize = 0;

        for &ch in board_fen {
            if ch == b'/' {
                if col != 8 {
                    return None;
                }
                row += 1;
                col = 0;
                if row >= 8 {
                    return None;
                }
            } else if (b'1'..=b'8').contains(&ch) {
                col += usize::from(ch - b'0');
                if col > 8 {
                    return None;
                }
            } else {
                let piece = Piece::from_char(char::from(ch))?;
                if col >= 8 {
                    return None;
                }
                let sq = Square::from_row_col(row as u8, col as u8);
                board.set_piece_at(sq, infer_moved(piece, sq));
                col += 1;
            }
        }

        if row == 7 && col == 8 {
            Some(board)
        } else {
            None
        }
    }

    #[inline]
    pub const fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.rows[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.rows[usize::from(sq.row())][usize::from(sq.col())] = Some(piece);
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.rows[usize::from(sq.row())][usize::from(sq.col())].take()
    }

    #[inline]
    pub const fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    /// The grid, row 0 first.
    #[inline]
    pub const fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.rows
    }

    /// Iterates over all pieces in row-major order, starting at a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the pieces of one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of the given color, scanning from a8.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece.is(color, Role::King))
            .map(|(sq, _)| sq)
    }

    pub fn count(&self) -> usize {
        self.pieces().count()
    }

    pub fn count_piece(&self, color: Color, role: Role) -> usize {
        self.pieces()
            .filter(|&(_, piece)| piece.is(color, role))
            .count()
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        for (row, pieces) in self.rows.iter().enumerate() {
            let mut empty = 0;
            for piece in pieces {
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            f.append_u32(empty)?;
                            empty = 0;
                        }
                        f.append_ascii(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                f.append_u32(empty)?;
            }
            if row < 7 {
                f.append_ascii('/')?;
            }
        }
        Ok(())
    }
}

fn infer_moved(piece: Piece, sq: Square) -> Piece {
    let home = match piece.role {
        Role::Pawn => sq.row() == piece.color.pawn_row(),
        Role::King => sq == CastlingSide::king_from(piece.color),
        Role::Rook => CastlingSide::ALL
            .iter()
            .any(|side| sq == side.rook_from(piece.color)),
        _ => true,
    };
    if home {
        piece
    } else {
        piece.marked_moved()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl ops::Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, sq: Square) -> &Option<Piece> {
        &self.rows[usize::from(sq.row())][usize::from(sq.col())]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pieces in &self.rows {
            for (col, piece) in pieces.iter().enumerate() {
                f.write_char(piece.map_or('.', Piece::char))?;
                f.write_char(if col < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_initial_placement() {
        let board = Board::new();
        assert_eq!(board.count(), 32);
        for color in Color::ALL {
            assert_eq!(board.count_piece(color, Role::Pawn), 8);
            assert_eq!(board.count_piece(color, Role::King), 1);
            assert_eq!(board.pieces_of(color).count(), 16);
        }
        assert_eq!(board.king_of(Color::White), Some(Square::E1));
        assert_eq!(board.king_of(Color::Black), Some(Square::E8));
        assert_eq!(board.piece_at(Square::D8), Some(Color::Black.queen()));
        assert!(board.pieces().all(|(_, piece)| !piece.moved));
    }

    #[test]
    fn test_copies_are_independent() {
        let before = Board::new();
        let mut after = before;
        let pawn = after.remove_piece_at(Square::E2).expect("pawn on e2");
        after.set_piece_at(Square::E4, pawn.marked_moved());
        assert_eq!(before.piece_at(Square::E2), Some(Color::White.pawn()));
        assert_eq!(before.piece_at(Square::E4), None);
        assert!(after[Square::E4].is_some_and(|p| p.moved));
    }

    #[test]
    fn test_from_board_fen() {
        let board = Board::from_board_fen(b"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")
            .expect("valid board fen");
        assert_eq!(board, Board::new());

        let board = Board::from_board_fen(b"4k3/8/8/3pP3/8/8/8/R3K1R1").expect("valid board fen");
        assert_eq!(board.count(), 6);
        assert!(board.piece_at(Square::D5).is_some_and(|p| p.moved));
        assert!(board.piece_at(Square::E1).is_some_and(|p| !p.moved));
        assert!(board.piece_at(Square::A1).is_some_and(|p| !p.moved));
        assert!(board.piece_at(Square::G1).is_some_and(|p| p.moved));

        assert_eq!(Board::from_board_fen(b"8/8/8/8/8/8/8"), None);
        assert_eq!(Board::from_board_fen(b"8/8/8/8/8/8/8/9"), None);
        assert_eq!(Board::from_board_fen(b"8/8/8/8/8/8/8/ppppppppp"), None);
        assert_eq!(Board::from_board_fen(b"8/8/8/8/8/8/8/8/8"), None);
        assert_eq!(Board::from_board_fen(b"8/8/8/8/8/8/8/7x"), None);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_board_fen_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/8/8/8/8/8/8/R3K2R",
            "8/8/8/8/8/8/8/8",
            "4k3/8/8/3pP3/8/8/8/4K3",
        ] {
            let board = Board::from_board_fen(fen.as_bytes()).expect("valid board fen");
            assert_eq!(board.to_string(), fen);
        }
    }
}
