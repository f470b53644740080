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

//! Click-driven game state machine with undo, redo and clocks.
//!
//! # Examples
//!
//! ```
//! use rochade::{Color, Game, Status};
//!
//! let mut game = Game::new();
//!
//! // Select the pawn on e2, then click e4.
//! assert_eq!(game.select_square(6, 4), None);
//! let notation = game.select_square(4, 4).expect("legal move");
//! assert_eq!(notation.to_string(), "e4");
//! assert_eq!(game.turn(), Color::Black);
//!
//! assert!(game.undo());
//! assert_eq!(game.turn(), Color::White);
//! assert!(game.move_list().is_empty());
//!
//! assert!(game.redo());
//! assert_eq!(game.move_list().len(), 1);
//!
//! game.tick();
//! assert_eq!(game.time_left(Color::Black), 599);
//! assert_eq!(game.status(), Status::Normal);
//! ```

use alloc::vec::Vec;
use core::num::NonZeroU32;

use log::{debug, info, trace};

use crate::{
    board::Board,
    clock::Clock,
    color::Color,
    fen::Fen,
    notation::Notation,
    position::{MoveList, PlayError, Position},
    square::Square,
    status::Status,
    types::Move,
};

/// A complete, independent copy of the game state at one point in time.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Snapshot {
    pub position: Position,
    pub clock: Clock,
    /// Number of moves in the move log at this point.
    pub plies: usize,
}

/// A game between two players at one board.
///
/// The host forwards board clicks to [`Game::select_square()`], calls
/// [`Game::tick()`] once a second, and renders from the query methods.
/// Nothing here ever fails: clicks that do not lead anywhere are ignored or
/// clear the selection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Game {
    current: Snapshot,
    selected: Option<Square>,
    status: Status,
    log: Vec<Notation>,
    history: Vec<Snapshot>,
    future: Vec<Snapshot>,
    time_control: u32,
}

impl Game {
    /// A new game with [`Clock::DEFAULT_SECONDS`] per side.
    pub fn new() -> Game {
        Game::with_time_control(Clock::DEFAULT_SECONDS)
    }

    /// A new game with `seconds` per side.
    pub fn with_time_control(seconds: u32) -> Game {
        Game::from_position(Position::new(), seconds)
    }

    /// Continues from a position, with `seconds` per side. A
    /// [restart](Game::restart) still goes back to the initial position.
    pub fn from_position(position: Position, seconds: u32) -> Game {
        let current = Snapshot {
            position,
            clock: Clock::new(seconds),
            plies: 0,
        };
        Game {
            current,
            selected: None,
            status: position.status(),
            log: Vec::new(),
            history: Vec::new(),
            future: Vec::new(),
            time_control: seconds,
        }
    }

    /// Handles a click on the square at `row` and `col`.
    ///
    /// Coordinates off the board are ignored. See [`Game::select()`].
    pub fn select_square(&mut self, row: usize, col: usize) -> Option<Notation> {
        let sq = u8::try_from(row)
            .ok()
            .zip(u8::try_from(col).ok())
            .and_then(|(row, col)| Square::new(row, col));
        match sq {
            Some(sq) => self.select(sq),
            None => {
                trace!("ignoring click off the board at ({row}, {col})");
                None
            }
        }
    }

    /// Handles a click on `sq`.
    ///
    /// A piece of the side to move becomes the selection, replacing any
    /// previous selection. Otherwise, with a piece selected, the move from
    /// the selection to `sq` is attempted. An illegal move only clears the
    /// selection.
    ///
    /// Returns the notation of a committed move.
    pub fn select(&mut self, sq: Square) -> Option<Notation> {
        if self.status.is_game_over() {
            trace!("ignoring click on {sq}, game is over");
            return None;
        }

        let turn = self.turn();
        if self.board().color_at(sq) == Some(turn) {
            debug!("{turn} selects {sq}");
            self.selected = Some(sq);
            return None;
        }

        let Some(from) = self.selected else {
            trace!("ignoring click on {sq} without selection");
            return None;
        };

        match self.play(Move::new(from, sq)) {
            Ok(notation) => Some(notation),
            Err(err) => {
                trace!("rejected {from}{sq}: {err}");
                self.selected = None;
                None
            }
        }
    }

    /// Validates and commits a move of the side to move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the game is over or the move is not legal.
    /// The game is left unchanged.
    pub fn play(&mut self, m: Move) -> Result<Notation, PlayError> {
        if self.status.is_game_over() {
            return Err(PlayError::GameOver);
        }

        let mut position = self.current.position;
        let notation = position.play(m)?;

        self.history.push(self.current);
        self.future.clear();
        self.log.truncate(self.current.plies);
        self.log.push(notation);
        self.current = Snapshot {
            position,
            clock: self.current.clock,
            plies: self.log.len(),
        };
        self.selected = None;
        self.status = self.current.position.status();

        debug!("played {m} as {notation}, status {:?}", self.status);
        Ok(notation)
    }

    /// Goes back one move. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            trace!("nothing to undo");
            return false;
        };
        self.future.push(self.current);
        self.restore(previous);
        debug!("undo to ply {}", self.current.plies);
        true
    }

    /// Replays one undone move. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            trace!("nothing to redo");
            return false;
        };
        self.history.push(self.current);
        self.restore(next);
        debug!("redo to ply {}", self.current.plies);
        true
    }

    /// Status comes from the restored board and turn alone. A side whose
    /// clock is empty loses again on its next tick.
    fn restore(&mut self, snapshot: Snapshot) {
        self.current = snapshot;
        self.selected = None;
        self.status = snapshot.position.status();
    }

    /// Starts over from the initial position with full clocks, forgetting
    /// all history.
    pub fn restart(&mut self) {
        *self = Game::with_time_control(self.time_control);
        debug!("restarted with {} seconds per side", self.time_control);
    }

    /// Takes one second from the side to move. A tick that finds the
    /// clock already empty ends the game.
    ///
    /// Does nothing once the game is over.
    pub fn tick(&mut self) {
        if self.status.is_game_over() {
            return;
        }
        let turn = self.turn();
        if self.current.clock.tick(turn) {
            self.status = Status::TimeOut(turn);
            info!("{turn} ran out of time");
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        self.current.position.board()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.current.position
    }

    #[inline]
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.current.position.turn()
    }

    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.current.position.ep_square()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.current.clock
    }

    /// Seconds left for `color`.
    pub fn time_left(&self, color: Color) -> u32 {
        self.current.clock.remaining(color)
    }

    /// Seconds per side at the start of a game.
    pub fn time_control(&self) -> u32 {
        self.time_control
    }

    /// Notation of the moves that led to the current state.
    pub fn move_list(&self) -> &[Notation] {
        &self.log[..self.current.plies.min(self.log.len())]
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Legal destinations for the piece on `from`, for highlighting. Empty
    /// once the game is over.
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        if self.status.is_game_over() {
            MoveList::new()
        } else {
            self.current.position.legal_moves_from(from)
        }
    }

    /// FEN of the current position. The fullmove number counts from the
    /// start of this game.
    pub fn fen(&self) -> Fen {
        let fullmoves = u32::try_from(self.current.plies / 2 + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        Fen {
            fullmoves,
            ..Fen::from_position(&self.current.position)
        }
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::role::Role;

    fn click(game: &mut Game, sq: Square) -> Option<Notation> {
        game.select(sq)
    }

    fn play_all(game: &mut Game, moves: &[(Square, Square)]) {
        for &(from, to) in moves {
            game.play(Move::new(from, to)).expect("legal move");
        }
    }

    #[test]
    fn test_selection() {
        let mut game = Game::new();
        assert_eq!(click(&mut game, Square::E4), None);
        assert_eq!(game.selected(), None);

        // Pieces of the side not to move can not be selected.
        assert_eq!(click(&mut game, Square::E7), None);
        assert_eq!(game.selected(), None);

        click(&mut game, Square::E2);
        assert_eq!(game.selected(), Some(Square::E2));

        // Clicking another own piece reselects.
        click(&mut game, Square::G1);
        assert_eq!(game.selected(), Some(Square::G1));
        click(&mut game, Square::G1);
        assert_eq!(game.selected(), Some(Square::G1));
    }

    #[test]
    fn test_illegal_click_clears_selection() {
        let mut game = Game::new();
        click(&mut game, Square::E2);
        assert_eq!(click(&mut game, Square::E5), None);
        assert_eq!(game.selected(), None);
        assert_eq!(game.position(), &Position::new());
        assert!(!game.can_undo());
        assert!(game.move_list().is_empty());
    }

    #[test]
    fn test_click_off_board() {
        let mut game = Game::new();
        click(&mut game, Square::E2);
        assert_eq!(game.select_square(8, 4), None);
        assert_eq!(game.select_square(4, usize::MAX), None);
        assert_eq!(game.selected(), Some(Square::E2));
    }

    #[test]
    fn test_commit() {
        let mut game = Game::new();
        click(&mut game, Square::E2);
        let notation = click(&mut game, Square::E4).expect("legal move");
        assert_eq!(notation.to_string(), "e4");
        assert_eq!(game.selected(), None);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.ep_square(), Square::new(5, 4));
        assert!(game.can_undo());
        assert!(!game.can_redo());
        assert_eq!(game.move_list(), &[notation]);
        assert_eq!(
            game.fen().to_string(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn test_undo_redo() {
        let mut game = Game::new();
        assert!(!game.undo());
        assert!(!game.redo());

        play_all(&mut game, &[(Square::E2, Square::E4), (Square::E7, Square::E5)]);
        let after = game.clone();

        assert!(game.undo());
        assert_eq!(game.move_list().len(), 1);
        assert!(game.undo());
        assert_eq!(game.position(), &Position::new());
        assert!(!game.can_undo());

        assert!(game.redo());
        assert!(game.redo());
        assert!(!game.redo());
        assert_eq!(game, after);
    }

    #[test]
    fn test_new_move_clears_future() {
        let mut game = Game::new();
        play_all(&mut game, &[(Square::E2, Square::E4), (Square::E7, Square::E5)]);
        assert!(game.undo());
        assert!(game.can_redo());

        play_all(&mut game, &[(Square::C7, Square::C5)]);
        assert!(!game.can_redo());
        let log: Vec<_> = game.move_list().iter().map(ToString::to_string).collect();
        assert_eq!(log, ["e4", "c5"]);
    }

    #[test]
    fn test_undo_restores_clock() {
        let mut game = Game::with_time_control(10);
        game.tick();
        play_all(&mut game, &[(Square::G1, Square::F3)]);
        game.tick();
        game.tick();
        assert_eq!(game.time_left(Color::White), 9);
        assert_eq!(game.time_left(Color::Black), 8);

        assert!(game.undo());
        assert_eq!(game.time_left(Color::White), 9);
        assert_eq!(game.time_left(Color::Black), 10);
    }

    #[test]
    fn test_timeout() {
        let mut game = Game::with_time_control(2);
        game.tick();
        game.tick();
        assert_eq!(game.time_left(Color::White), 0);
        assert_eq!(game.status(), Status::Normal);
        game.tick();
        assert_eq!(game.status(), Status::TimeOut(Color::White));
        assert_eq!(game.time_left(Color::White), 0);

        // Frozen.
        game.tick();
        assert_eq!(game.time_left(Color::White), 0);
        assert_eq!(game.time_left(Color::Black), 2);
        click(&mut game, Square::E2);
        assert_eq!(game.selected(), None);
        assert_eq!(
            game.play(Move::new(Square::E2, Square::E4)),
            Err(PlayError::GameOver)
        );
        assert!(game.legal_moves_from(Square::E2).is_empty());
    }

    #[test]
    fn test_undo_after_timeout() {
        let mut game = Game::with_time_control(1);
        play_all(&mut game, &[(Square::E2, Square::E4)]);
        game.tick();
        game.tick();
        assert_eq!(game.status(), Status::TimeOut(Color::Black));

        // Undo takes the status from the board. The empty clock of black is
        // kept, so black loses again on the next tick after a redo.
        assert!(game.undo());
        assert_eq!(game.status(), Status::Normal);
        assert!(game.redo());
        assert_eq!(game.status(), Status::Normal);
        assert_eq!(game.time_left(Color::Black), 0);
        game.tick();
        assert_eq!(game.status(), Status::TimeOut(Color::Black));
    }

    #[test]
    fn test_restart() {
        let mut game = Game::with_time_control(30);
        play_all(&mut game, &[(Square::D2, Square::D4)]);
        game.tick();
        game.restart();
        assert_eq!(game, Game::with_time_control(30));
        assert_eq!(game.time_left(Color::Black), 30);
        assert_eq!(game.status(), Status::Normal);
    }

    #[test]
    fn test_king_missing() {
        let board = Board::from_board_fen(b"4k3/8/8/8/8/8/4P3/8").expect("valid board fen");
        let mut game = Game::from_position(Position::from_board(board, Color::White), 60);
        assert_eq!(game.status(), Status::KingMissing);
        assert_eq!(game.status().to_string(), "Checkmate");
        click(&mut game, Square::E2);
        assert_eq!(game.selected(), None);
        game.tick();
        assert_eq!(game.time_left(Color::White), 60);
    }

    #[test]
    fn test_check_status() {
        let mut game = Game::new();
        play_all(
            &mut game,
            &[
                (Square::E2, Square::E4),
                (Square::F7, Square::F6),
                (Square::D1, Square::H5),
            ],
        );
        assert_eq!(game.status(), Status::Check);
        assert_eq!(game.status().to_string(), "Check");
        assert!(game.board().piece_at(Square::H5).is_some_and(|q| q.role == Role::Queen));

        // Only moves that answer the check are legal.
        assert!(game.legal_moves_from(Square::A7).is_empty());
        assert_eq!(
            game.legal_moves_from(Square::G7).as_slice(),
            &[Move::new(Square::G7, Square::G6)]
        );
    }
}
