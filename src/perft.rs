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

use crate::position::Position;

/// Counts legal move paths of a given length.
///
/// Shorter paths (due to running out of legal moves or the king going
/// missing) are not counted. Computing perft numbers is useful for
/// comparing, testing and debugging move generation correctness and
/// performance.
///
/// # Examples
///
/// ```
/// use rochade::{perft, Position};
///
/// let pos = Position::new();
/// assert_eq!(perft(&pos, 1), 20);
/// assert_eq!(perft(&pos, 2), 400);
/// ```
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = pos.legal_moves();

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .into_iter()
                .map(|m| {
                    let mut child = *pos;
                    child.play_unchecked(m);
                    perft(&child, depth - 1)
                })
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fen::Fen, square::Square, types::Move};

    #[test]
    fn test_start_position() {
        let pos = Position::new();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
    }

    #[test]
    fn test_special_moves_are_generated() {
        let pos = "r3k2r/8/8/8/3pP3/8/8/R3K2R b KQkq e3 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_position()
            .expect("legal position");
        let moves = pos.legal_moves();
        assert!(moves.contains(&Move::new(Square::E8, Square::G8)));
        assert!(moves.contains(&Move::new(Square::E8, Square::C8)));
        assert!(moves.contains(&Move::new(Square::D4, Square::E3)));
        assert_eq!(perft(&pos, 1), moves.len() as u64);
    }
}
