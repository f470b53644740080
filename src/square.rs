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

use core::{error, fmt, hash, str::FromStr};

use crate::util::AppendAscii;

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl error::Error for ParseSquareError {}

/// A square of the 8x8 board.
///
/// Rows count from the top: row 0 is black's back rank (rank 8) and row 7
/// is white's back rank (rank 1). Columns count from the a-file.
///
/// # Examples
///
/// ```
/// use rochade::Square;
///
/// let sq = Square::new(4, 4).expect("on the board");
/// assert_eq!(sq, Square::E4);
/// assert_eq!(sq.to_string(), "e4");
/// assert_eq!(sq.rank(), 4);
///
/// assert_eq!(Square::new(8, 0), None);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Gets the square at the given row and column, or `None` if either is
    /// off the board.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Caller guarantees `row < 8 && col < 8`.
    #[inline]
    pub(crate) const fn from_row_col(row: u8, col: u8) -> Square {
        debug_assert!(row < 8 && col < 8);
        Square { row, col }
    }

    /// Gets the square with the given row-major index (`0` is a8, `63` is
    /// h1).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Square> {
        if index < 64 {
            Some(Square {
                row: (index / 8) as u8,
                col: (index % 8) as u8,
            })
        } else {
            None
        }
    }

    /// Parses a square name such as `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a file letter
    /// followed by a rank digit.
    pub const fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        if s.len() != 2 {
            return Err(ParseSquareError);
        }
        match (Square::col_from_char(s[0] as char), Square::row_from_char(s[1] as char)) {
            (Some(col), Some(row)) => Ok(Square { row, col }),
            _ => Err(ParseSquareError),
        }
    }

    /// Column of a file letter, `'a'` being column 0.
    pub const fn col_from_char(ch: char) -> Option<u8> {
        match ch {
            'a'..='h' => Some(ch as u8 - b'a'),
            _ => None,
        }
    }

    /// Row of a rank digit, `'8'` being row 0.
    pub const fn row_from_char(ch: char) -> Option<u8> {
        match ch {
            '1'..='8' => Some(b'8' - ch as u8),
            _ => None,
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index, `0` for a8 up to `63` for h1.
    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.col as usize
    }

    /// Chess rank number, `1` to `8`.
    #[inline]
    pub const fn rank(self) -> u8 {
        8 - self.row
    }

    pub const fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub const fn rank_char(self) -> char {
        (b'0' + self.rank()) as char
    }

    /// Moves by the given row and column deltas, or `None` when leaving the
    /// board.
    #[must_use]
    pub const fn offset(self, drow: i8, dcol: i8) -> Option<Square> {
        let row = self.row as i16 + drow as i16;
        let col = self.col as i16 + dcol as i16;
        if 0 <= row && row < 8 && 0 <= col && col < 8 {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Same square on the other half of the board, as seen by the opponent.
    #[must_use]
    pub const fn flip_vertical(self) -> Square {
        Square {
            row: 7 - self.row,
            col: self.col,
        }
    }

    /// All 64 squares in row-major order, starting at a8.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(|index| Square {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        })
    }

    pub(crate) fn append_to<W: AppendAscii>(self, f: &mut W) -> Result<(), W::Error> {
        f.append_ascii(self.file_char())?;
        f.append_ascii(self.rank_char())
    }

    pub const A8: Square = Square { row: 0, col: 0 };
    pub const B8: Square = Square { row: 0, col: 1 };
    pub const C8: Square = Square { row: 0, col: 2 };
    pub const D8: Square = Square { row: 0, col: 3 };
    pub const E8: Square = Square { row: 0, col: 4 };
    pub const F8: Square = Square { row: 0, col: 5 };
    pub const G8: Square = Square { row: 0, col: 6 };
    pub const H8: Square = Square { row: 0, col: 7 };
    pub const A7: Square = Square { row: 1, col: 0 };
    pub const B7: Square = Square { row: 1, col: 1 };
    pub const C7: Square = Square { row: 1, col: 2 };
    pub const D7: Square = Square { row: 1, col: 3 };
    pub const E7: Square = Square { row: 1, col: 4 };
    pub const F7: Square = Square { row: 1, col: 5 };
    pub const G7: Square = Square { row: 1, col: 6 };
    pub const H7: Square = Square { row: 1, col: 7 };
    pub const A6: Square = Square { row: 2, col: 0 };
    pub const B6: Square = Square { row: 2, col: 1 };
    pub const C6: Square = Square { row: 2, col: 2 };
    pub const D6: Square = Square { row: 2, col: 3 };
    pub const E6: Square = Square { row: 2, col: 4 };
    pub const F6: Square = Square { row: 2, col: 5 };
    pub const G6: Square = Square { row: 2, col: 6 };
    pub const H6: Square = Square { row: 2, col: 7 };
    pub const A5: Square = Square { row: 3, col: 0 };
    pub const B5: Square = Square { row: 3, col: 1 };
    pub const C5: Square = Square { row: 3, col: 2 };
    pub const D5: Square = Square { row: 3, col: 3 };
    pub const E5: Square = Square { row: 3, col: 4 };
    pub const F5: Square = Square { row: 3, col: 5 };
    pub const G5: Square = Square { row: 3, col: 6 };
    pub const H5: Square = Square { row: 3, col: 7 };
    pub const A4: Square = Square { row: 4, col: 0 };
    pub const B4: Square = Square { row: 4, col: 1 };
    pub const C4: Square = Square { row: 4, col: 2 };
    pub const D4: Square = Square { row: 4, col: 3 };
    pub const E4: Square = Square { row: 4, col: 4 };
    pub const F4: Square = Square { row: 4, col: 5 };
    pub const G4: Square = Square { row: 4, col: 6 };
    pub const H4: Square = Square { row: 4, col: 7 };
    pub const A3: Square = Square { row: 5, col: 0 };
    pub const B3: Square = Square { row: 5, col: 1 };
    pub const C3: Square = Square { row: 5, col: 2 };
    pub const D3: Square = Square { row: 5, col: 3 };
    pub const E3: Square = Square { row: 5, col: 4 };
    pub const F3: Square = Square { row: 5, col: 5 };
    pub const G3: Square = Square { row: 5, col: 6 };
    pub const H3: Square = Square { row: 5, col: 7 };
    pub const A2: Square = Square { row: 6, col: 0 };
    pub const B2: Square = Square { row: 6, col: 1 };
    pub const C2: Square = Square { row: 6, col: 2 };
    pub const D2: Square = Square { row: 6, col: 3 };
    pub const E2: Square = Square { row: 6, col: 4 };
    pub const F2: Square = Square { row: 6, col: 5 };
    pub const G2: Square = Square { row: 6, col: 6 };
    pub const H2: Square = Square { row: 6, col: 7 };
    pub const A1: Square = Square { row: 7, col: 0 };
    pub const B1: Square = Square { row: 7, col: 1 };
    pub const C1: Square = Square { row: 7, col: 2 };
    pub const D1: Square = Square { row: 7, col: 3 };
    pub const E1: Square = Square { row: 7, col: 4 };
    pub const F1: Square = Square { row: 7, col: 5 };
    pub const G1: Square = Square { row: 7, col: 6 };
    pub const H1: Square = Square { row: 7, col: 7 };
}

impl hash::Hash for Square {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        state.write_u8(self.index() as u8);
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.append_to(f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = arrayvec::ArrayString::<2>::new();
        let _ = self.append_to(&mut s);
        serializer.serialize_str(&s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}

#[cfg(feature = "arbitrary")]
impl<'a> arbitrary::Arbitrary<'a> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let index = u.int_in_range(0..=63usize)?;
        Ok(Square {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        })
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "alloc")]
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_coordinates() {
        for sq in Square::all() {
            assert_eq!(Square::new(sq.row(), sq.col()), Some(sq));
            assert_eq!(Square::from_index(sq.index()), Some(sq));
            assert_eq!(sq.flip_vertical().flip_vertical(), sq);
        }
        assert_eq!(Square::all().len(), 64);
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn test_named_squares() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H1.index(), 63);
        assert_eq!((Square::E2.row(), Square::E2.col()), (6, 4));
        assert_eq!((Square::D5.row(), Square::D5.col()), (3, 3));
        assert_eq!(Square::E1.flip_vertical(), Square::E8);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
        assert_eq!(Square::A1.offset(1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::G1.offset(-2, -1), Some(Square::F3));
    }

    #[test]
    fn test_parse() {
        assert_eq!("e4".parse::<Square>(), Ok(Square::E4));
        assert_eq!("a8".parse::<Square>(), Ok(Square::A8));
        assert_eq!("h1".parse::<Square>(), Ok(Square::H1));
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_display() {
        for sq in Square::all() {
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
        assert_eq!(Square::C6.to_string(), "c6");
    }
}
