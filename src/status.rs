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

use crate::{attacks, board::Board, color::Color};

/// Status of a game, shown to the players after every state change.
///
/// `Check` is the only signal that does not end the game. There is no
/// checkmate or stalemate detection: a game ends when a side runs out of
/// time, or when the side to move has no king.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Status {
    #[default]
    Normal,
    /// The king of the side to move is attacked.
    Check,
    /// The given side ran out of time and loses.
    TimeOut(Color),
    /// The side to move has no king.
    KingMissing,
}

impl Status {
    pub const fn is_check(self) -> bool {
        matches!(self, Status::Check)
    }

    /// Tests if the game is over. No more moves or clock ticks are accepted.
    pub const fn is_game_over(self) -> bool {
        matches!(self, Status::TimeOut(_) | Status::KingMissing)
    }

    /// The side that lost, if the game is over.
    pub const fn loser(self, turn: Color) -> Option<Color> {
        match self {
            Status::TimeOut(color) => Some(color),
            Status::KingMissing => Some(turn),
            Status::Normal | Status::Check => None,
        }
    }

    /// Label for display, empty for [`Status::Normal`].
    pub const fn label(self) -> &'static str {
        match self {
            Status::Normal => "",
            Status::Check => "Check",
            Status::TimeOut(Color::White) => "Time over: White loses",
            Status::TimeOut(Color::Black) => "Time over: Black loses",
            Status::KingMissing => "Checkmate",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Evaluates the board for the side to move.
///
/// # Examples
///
/// ```
/// use rochade::{game_status, Board, Color, Status};
///
/// assert_eq!(game_status(&Board::new(), Color::White), Status::Normal);
///
/// let board = Board::from_board_fen(b"4k3/8/8/8/8/8/8/4R1K1").expect("valid board fen");
/// assert_eq!(game_status(&board, Color::Black), Status::Check);
/// assert_eq!(game_status(&board, Color::White), Status::Normal);
/// ```
pub fn game_status(board: &Board, turn: Color) -> Status {
    match board.king_of(turn) {
        None => Status::KingMissing,
        Some(king) if attacks::is_attacked(board, king, !turn) => Status::Check,
        Some(_) => Status::Normal,
    }
}
