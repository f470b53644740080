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

//! Algebraic notation for the move log.
//!
//! The notation is short algebraic without disambiguation and without check
//! suffixes: `e4`, `Nf3`, `exd5`, `Bxf7`, `e8=Q`, `O-O`, `O-O-O`.
//!
//! # Examples
//!
//! Describe a move:
//!
//! ```
//! use rochade::{notation::move_notation, Board, Color, Move, Square};
//!
//! let board = Board::new();
//! let notation = move_notation(
//!     Color::White.knight(),
//!     Move::new(Square::G1, Square::F3),
//!     &board,
//!     false,
//! );
//! assert_eq!(notation.to_string(), "Nf3");
//! ```
//!
//! Parse notation and find the move it describes:
//!
//! ```
//! use rochade::{notation::Notation, Move, Position, Square};
//!
//! let pos = Position::new();
//! let notation: Notation = "e4".parse()?;
//! assert_eq!(notation.to_move(&pos)?, Move::new(Square::E2, Square::E4));
//!
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{error, fmt, str::FromStr};

use crate::{
    board::Board,
    castling_side::CastlingSide,
    position::Position,
    role::Role,
    square::Square,
    types::{Move, Piece},
    util::AppendAscii,
};

/// Error when parsing syntactically invalid notation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseNotationError;

impl fmt::Display for ParseNotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid notation")
    }
}

impl error::Error for ParseNotationError {}

/// `Illegal` or `Ambiguous`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NotationError {
    /// Notation does not match a legal move.
    Illegal,
    /// Notation matches multiple legal moves.
    Ambiguous,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            NotationError::Illegal => "illegal notation",
            NotationError::Ambiguous => "ambiguous notation",
        })
    }
}

impl error::Error for NotationError {}

/// A move as written in the move log.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Notation {
    Normal {
        role: Role,
        /// Origin column, written for pawn captures only.
        file: Option<u8>,
        capture: bool,
        to: Square,
        /// Pawn reached the last row and became a queen.
        promotion: bool,
    },
    Castle(CastlingSide),
}

/// Describes `m`, made by `piece`, in algebraic notation.
///
/// `previous_board` is the board before the move. Only a move onto an
/// occupied square counts as a capture, so en passant is written like a
/// quiet pawn move (`d6`).
pub fn move_notation(piece: Piece, m: Move, previous_board: &Board, promotion: bool) -> Notation {
    if piece.role == Role::King && m.dcol().abs() == 2 {
        if let Some(side) = CastlingSide::from_king_move(m.from, m.to) {
            return Notation::Castle(side);
        }
    }

    let capture = previous_board.is_occupied(m.to);

    Notation::Normal {
        role: piece.role,
        file: (piece.role == Role::Pawn && capture).then_some(m.from.col()),
        capture,
        to: m.to,
        promotion,
    }
}

impl Notation {
    /// Parses notation. Ignores a possible check or checkmate suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ParseNotationError`] if `s` is not syntactically valid.
    pub fn from_ascii(mut s: &[u8]) -> Result<Notation, ParseNotationError> {
        if s.ends_with(b"#") || s.ends_with(b"+") {
            s = &s[..s.len() - 1];
        }

        if s == b"O-O" {
            return Ok(Notation::Castle(CastlingSide::KingSide));
        } else if s == b"O-O-O" {
            return Ok(Notation::Castle(CastlingSide::QueenSide));
        }

        let (role, s) = match s.split_first() {
            Some((&ch, rest)) if ch.is_ascii_uppercase() => (
                Role::from_char(char::from(ch)).ok_or(ParseNotationError)?,
                rest,
            ),
            Some(_) => (Role::Pawn, s),
            None => return Err(ParseNotationError),
        };

        if role == Role::Pawn {
            let (file, s) = match s {
                [file, b'x', rest @ ..] => (
                    Some(Square::col_from_char(char::from(*file)).ok_or(ParseNotationError)?),
                    rest,
                ),
                _ => (None, s),
            };
            let (to, s) = split_square(s)?;
            let promotion = match s {
                b"=Q" => true,
                b"" => false,
                _ => return Err(ParseNotationError),
            };
            Ok(Notation::Normal {
                role,
                file,
                capture: file.is_some(),
                to,
                promotion,
            })
        } else {
            let (capture, s) = match s.split_first() {
                Some((b'x', rest)) => (true, rest),
                _ => (false, s),
            };
            let (to, s) = split_square(s)?;
            if !s.is_empty() {
                return Err(ParseNotationError);
            }
            Ok(Notation::Normal {
                role,
                file: None,
                capture,
                to,
                promotion: false,
            })
        }
    }

    pub const fn is_capture(self) -> bool {
        matches!(self, Notation::Normal { capture: true, .. })
    }

    pub const fn is_castle(self) -> bool {
        matches!(self, Notation::Castle(_))
    }

    /// Tests if the notation describes `m`, made by `piece` on `board`.
    pub fn matches(self, piece: Piece, m: Move, board: &Board) -> bool {
        let promotes = piece.role == Role::Pawn && (m.to.row() == 0 || m.to.row() == 7);
        move_notation(piece, m, board, promotes) == self
    }

    /// Finds the legal move in `pos` that this notation describes.
    ///
    /// # Errors
    ///
    /// Returns [`NotationError`] if there is no unique matching legal move.
    /// Since the notation carries no disambiguation, two knights reaching
    /// the same square are ambiguous.
    pub fn to_move(self, pos: &Position) -> Result<Move, NotationError> {
        let board = pos.board();
        let mut candidates = pos.legal_moves().into_iter().filter(|&m| {
            board
                .piece_at(m.from)
                .is_some_and(|piece| self.matches(piece, m, board))
        });

        let Some(m) = candidates.next() else {
            return Err(NotationError::Illegal);
        };

        if candidates.next().is_some() {
            Err(NotationError::Ambiguous)
        } else {
            Ok(m)
        }
    }

    pub(crate) fn append_to<W: AppendAscii>(self, f: &mut W) -> Result<(), W::Error> {
        match self {
            Notation::Normal {
                role,
                file,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.append_ascii(role.upper_char())?;
                }
                if let Some(file) = file {
                    f.append_ascii(char::from(b'a'.saturating_add(file)))?;
                }
                if capture {
                    f.append_ascii('x')?;
                }
                to.append_to(f)?;
                if promotion {
                    f.append_ascii('=')?;
                    f.append_ascii('Q')?;
                }
            }
            Notation::Castle(CastlingSide::KingSide) => {
                for ch in "O-O".chars() {
                    f.append_ascii(ch)?;
                }
            }
            Notation::Castle(CastlingSide::QueenSide) => {
                for ch in "O-O-O".chars() {
                    f.append_ascii(ch)?;
                }
            }
        }
        Ok(())
    }
}

fn split_square(s: &[u8]) -> Result<(Square, &[u8]), ParseNotationError> {
    if s.len() < 2 {
        return Err(ParseNotationError);
    }
    let (sq, rest) = s.split_at(2);
    Ok((
        Square::from_ascii(sq).map_err(|_| ParseNotationError)?,
        rest,
    ))
}

impl FromStr for Notation {
    type Err = ParseNotationError;

    fn from_str(s: &str) -> Result<Notation, ParseNotationError> {
        Notation::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Notation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<8>::new();
        let _ = self.append_to(&mut s);
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Notation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct NotationVisitor;

        impl serde::de::Visitor<'_> for NotationVisitor {
            type Value = Notation;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("move in algebraic notation")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(NotationVisitor)
    }
}
