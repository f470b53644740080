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

use core::fmt;

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`], and whether it has moved.
///
/// `moved` is only ever set for roles that
/// [track moves](Role::tracks_moves). Pieces are plain values: marking a
/// piece as moved produces a new piece.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub moved: bool,
}

impl Piece {
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    /// Parses an unmoved piece from its FEN letter, uppercase for white.
    pub const fn from_char(ch: char) -> Option<Piece> {
        let Some(role) = Role::from_char(ch) else {
            return None;
        };
        Some(role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    /// The same piece after it made a move.
    #[must_use]
    #[inline]
    pub const fn marked_moved(self) -> Piece {
        Piece {
            moved: self.role.tracks_moves(),
            ..self
        }
    }

    /// The same piece with the given role, keeping color and moved flag.
    #[must_use]
    #[inline]
    pub const fn with_role(self, role: Role) -> Piece {
        Piece { role, ..self }
    }

    #[inline]
    pub const fn is(self, color: Color, role: Role) -> bool {
        self.color as u8 == color as u8 && self.role as u8 == role as u8
    }
}

/// A request to move whatever stands on `from` to `to`.
///
/// A `Move` is not validated on construction. Both squares are always on
/// the board.
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }

    /// Row delta, negative toward black's side.
    #[inline]
    pub const fn drow(self) -> i8 {
        self.to.row() as i8 - self.from.row() as i8
    }

    /// Column delta, positive toward the h-file.
    #[inline]
    pub const fn dcol(self) -> i8 {
        self.to.col() as i8 - self.from.col() as i8
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
