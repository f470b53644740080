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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse a FEN and set up a position:
//!
//! ```
//! use rochade::{fen::Fen, Color, Position, Square};
//!
//! let fen: Fen = "r3k2r/8/8/8/4P3/8/8/R3K2R b Kq e3 0 1".parse()?;
//! let pos = fen.into_position()?;
//! assert_eq!(pos.turn(), Color::Black);
//! assert_eq!(pos.ep_square(), Some(Square::E3));
//! assert!(pos.board().piece_at(Square::A1).is_some_and(|rook| rook.moved));
//! assert!(pos.board().piece_at(Square::H1).is_some_and(|rook| !rook.moved));
//!
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Write the FEN of a position:
//!
//! ```
//! use rochade::{fen::Fen, Position};
//!
//! let pos = Position::new();
//! assert_eq!(
//!     Fen::from_position(&pos).to_string(),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```

use core::{error, fmt, num::NonZeroU32, str::FromStr};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    color::{ByColor, Color},
    position::{Position, PositionError},
    role::Role,
    square::Square,
    util::AppendAscii,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl error::Error for ParseFenError {}

/// A parsed FEN.
///
/// Castling rights are not stored separately. They are folded into the
/// moved flags of kings and rooks on the board: a rook on a corner is
/// unmoved only if the matching right is present, and a king on its home
/// square is unmoved only if its side has any right.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub ep_square: Option<Square>,
    /// Syntax-checked and otherwise unused.
    pub halfmoves: u32,
    pub fullmoves: NonZeroU32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen::from_position(&Position::new())
    }
}

impl Fen {
    /// An empty board with white to move.
    pub const fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            turn: Color::White,
            ep_square: None,
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Takes board, turn and en passant target of a position.
    pub const fn from_position(pos: &Position) -> Fen {
        Fen {
            board: *pos.board(),
            turn: pos.turn(),
            ep_square: pos.ep_square(),
            halfmoves: 0,
            fullmoves: NonZeroU32::MIN,
        }
    }

    /// Parses a FEN. Trailing fields may be omitted: white to move, no
    /// castling rights, no en passant target, move counters 0 and 1.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the input is not syntactically valid.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ');
        let mut result = Fen::empty();

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        result.board = Board::from_board_fen(board_part).ok_or(ParseFenError::InvalidBoard)?;

        result.turn = match parts.next() {
            Some(b"w") | None => Color::White,
            Some(b"b") => Color::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        let rights = match parts.next() {
            Some(b"-") | None => ByColor::default(),
            Some(castling_part) => parse_castling(castling_part)?,
        };
        apply_castling_rights(&mut result.board, rights)?;

        result.ep_square = match parts.next() {
            Some(b"-") | None => None,
            Some(ep_part) => {
                Some(Square::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?)
            }
        };

        if let Some(halfmoves_part) = parts.next() {
            result.halfmoves =
                parse_u32(halfmoves_part).ok_or(ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            result.fullmoves = parse_u32(fullmoves_part)
                .and_then(NonZeroU32::new)
                .ok_or(ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }

    /// Validates the setup. See [`Position::from_setup()`].
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] if the setup is not a legal position.
    pub fn into_position(self) -> Result<Position, PositionError> {
        Position::from_setup(self)
    }

    /// Castling rights derived from the moved flags on the board.
    pub fn castling_rights(&self) -> ByColor<[bool; 2]> {
        ByColor::new_with(|color| {
            let king_ready = self
                .board
                .piece_at(CastlingSide::king_from(color))
                .is_some_and(|king| king.is(color, Role::King) && !king.moved);
            CastlingSide::ALL.map(|side| {
                king_ready
                    && self
                        .board
                        .piece_at(side.rook_from(color))
                        .is_some_and(|rook| rook.is(color, Role::Rook) && !rook.moved)
            })
        })
    }

    pub(crate) fn append_to<W: AppendAscii>(&self, f: &mut W) -> Result<(), W::Error> {
        self.board.append_to(f)?;
        f.append_ascii(' ')?;
        f.append_ascii(self.turn.char())?;
        f.append_ascii(' ')?;

        let rights = self.castling_rights();
        let mut any = false;
        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if rights[color][side as usize] {
                    let ch = match side {
                        CastlingSide::KingSide => 'k',
                        CastlingSide::QueenSide => 'q',
                    };
                    f.append_ascii(color.fold_wb(ch.to_ascii_uppercase(), ch))?;
                    any = true;
                }
            }
        }
        if !any {
            f.append_ascii('-')?;
        }

        f.append_ascii(' ')?;
        match self.ep_square {
            Some(sq) => sq.append_to(f)?,
            None => f.append_ascii('-')?,
        }
        f.append_ascii(' ')?;
        f.append_u32(self.halfmoves)?;
        f.append_ascii(' ')?;
        f.append_u32(self.fullmoves.get())
    }
}

fn parse_u32(part: &[u8]) -> Option<u32> {
    if part.is_empty() || !part.iter().all(u8::is_ascii_digit) {
        return None;
    }
    part.iter().try_fold(0u32, |acc, &digit| {
        acc.checked_mul(10)?.checked_add(u32::from(digit - b'0'))
    })
}

fn parse_castling(part: &[u8]) -> Result<ByColor<[bool; 2]>, ParseFenError> {
    let mut rights = ByColor::<[bool; 2]>::default();
    for &ch in part {
        let color = Color::from_white(ch.is_ascii_uppercase());
        let side = match ch.to_ascii_lowercase() {
            b'k' => CastlingSide::KingSide,
            b'q' => CastlingSide::QueenSide,
            _ => return Err(ParseFenError::InvalidCastling),
        };
        let right = &mut rights[color][side as usize];
        if *right {
            return Err(ParseFenError::InvalidCastling);
        }
        *right = true;
    }
    Ok(rights)
}

/// Marks kings and corner rooks without a castling right as moved.
fn apply_castling_rights(
    board: &mut Board,
    rights: ByColor<[bool; 2]>,
) -> Result<(), ParseFenError> {
    for color in Color::ALL {
        let king_from = CastlingSide::king_from(color);
        let king_home = board
            .piece_at(king_from)
            .is_some_and(|king| king.is(color, Role::King));

        for side in CastlingSide::ALL {
            let rook_from = side.rook_from(color);
            let rook = board
                .piece_at(rook_from)
                .filter(|rook| rook.is(color, Role::Rook));

            if rights[color][side as usize] {
                if !king_home || rook.is_none() {
                    return Err(ParseFenError::InvalidCastling);
                }
            } else if let Some(rook) = rook {
                board.set_piece_at(rook_from, rook.marked_moved());
            }
        }

        if !rights[color].contains(&true) {
            if let Some(king) = board.piece_at(king_from).filter(|_| king_home) {
                board.set_piece_at(king_from, king.marked_moved());
            }
        }
    }
    Ok(())
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let fen = Fen::from_ascii(b"4k3/8/8/8/8/8/8/R3K3").expect("valid fen");
        assert_eq!(fen.turn, Color::White);
        assert_eq!(fen.ep_square, None);
        assert_eq!(fen.halfmoves, 0);
        assert_eq!(fen.fullmoves.get(), 1);
        assert!(fen.board.piece_at(Square::A1).is_some_and(|rook| rook.moved));
        assert!(fen.board.piece_at(Square::E1).is_some_and(|king| king.moved));
    }

    #[test]
    fn test_castling_rights_mark_pieces() {
        let fen = Fen::from_ascii(b"r3k2r/8/8/8/8/8/8/R3K2R w Qk - 3 20").expect("valid fen");
        let board = fen.board;
        assert!(board.piece_at(Square::A1).is_some_and(|rook| !rook.moved));
        assert!(board.piece_at(Square::H1).is_some_and(|rook| rook.moved));
        assert!(board.piece_at(Square::E1).is_some_and(|king| !king.moved));
        assert!(board.piece_at(Square::A8).is_some_and(|rook| rook.moved));
        assert!(board.piece_at(Square::H8).is_some_and(|rook| !rook.moved));
        assert_eq!(fen.halfmoves, 3);
        assert_eq!(fen.fullmoves.get(), 20);
        assert_eq!(
            fen.castling_rights(),
            ByColor {
                white: [false, true],
                black: [true, false],
            }
        );
    }

    #[test]
    fn test_invalid_fens() {
        for (fen, err) in [
            (&b"8/8/8/8/8/8/8"[..], ParseFenError::InvalidBoard),
            (b"8/8/8/8/8/8/8/8 x", ParseFenError::InvalidTurn),
            (b"8/8/8/8/8/8/8/8 w K", ParseFenError::InvalidCastling),
            (b"4k3/8/8/8/8/8/8/4K2R w KK", ParseFenError::InvalidCastling),
            (b"4k3/8/8/8/8/8/8/4K2R w X", ParseFenError::InvalidCastling),
            (b"8/8/8/8/8/8/8/8 w - e9", ParseFenError::InvalidEpSquare),
            (b"8/8/8/8/8/8/8/8 w - - x", ParseFenError::InvalidHalfmoveClock),
            (b"8/8/8/8/8/8/8/8 w - - 0 0", ParseFenError::InvalidFullmoves),
            (b"8/8/8/8/8/8/8/8 w - - 0 1 extra", ParseFenError::InvalidFen),
        ] {
            assert_eq!(Fen::from_ascii(fen), Err(err));
        }
    }

    #[test]
    fn test_parse_u32() {
        assert_eq!(parse_u32(b"0"), Some(0));
        assert_eq!(parse_u32(b"4294967295"), Some(u32::MAX));
        assert_eq!(parse_u32(b"4294967296"), None);
        assert_eq!(parse_u32(b""), None);
        assert_eq!(parse_u32(b"-1"), None);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_roundtrip() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
            "r3k2r/8/8/8/8/8/8/R3K2R b Kq - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 12 40",
        ] {
            assert_eq!(fen.parse::<Fen>().expect("valid fen").to_string(), fen);
        }
    }
}
