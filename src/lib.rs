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

//! A library for two-player chess rules: move legality, algebraic
//! notation, game status, undo/redo history and countdown clocks.
//!
//! # Examples
//!
//! Drive a game the way a board UI does, by clicking squares:
//!
//! ```
//! use rochade::{Game, Square};
//!
//! let mut game = Game::new();
//!
//! // 1. e4
//! game.select(Square::E2);
//! let notation = game.select(Square::E4).expect("legal move");
//! assert_eq!(notation.to_string(), "e4");
//! ```
//!
//! Generate legal moves:
//!
//! ```
//! use rochade::{Position, Square};
//!
//! let pos = Position::new();
//! assert_eq!(pos.legal_moves().len(), 20);
//! assert_eq!(pos.legal_moves_from(Square::G1).len(), 2);
//! ```
//!
//! Evaluate the status and the clocks:
//!
//! ```
//! use rochade::{Color, Game, Status};
//!
//! let mut game = Game::with_time_control(1);
//! game.tick();
//! assert_eq!(game.time_left(Color::White), 0);
//! assert_eq!(game.status(), Status::Normal);
//!
//! game.tick();
//! assert_eq!(game.status(), Status::TimeOut(Color::White));
//! assert_eq!(game.status().to_string(), "Time over: White loses");
//! ```
//!
//! Also supports [FEN](fen) for setting up positions and
//! [algebraic notation](notation) for moves.
//!
//! # Feature flags
//!
//! * `alloc`: Enables APIs which require the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate
//!   (the [`Game`] state machine with its history and move log).
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `arbitrary`: Implements [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for vocabulary types.
//! * `serde`: Implements [`serde`](https://docs.rs/serde/1)
//!   serialization/deserialization for all state types. Squares and
//!   notation use their natural string representations.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.

#![no_std]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod castling_side;
mod clock;
mod color;
#[cfg(feature = "alloc")]
mod game;
mod perft;
mod position;
mod role;
mod square;
mod status;
mod types;
mod util;

pub mod attacks;
pub mod board;
pub mod fen;
pub mod notation;
pub mod rules;

pub use board::Board;
pub use castling_side::CastlingSide;
pub use clock::Clock;
pub use color::{ByColor, Color, ParseColorError};
#[cfg(feature = "alloc")]
pub use game::{Game, Snapshot};
pub use notation::{move_notation, Notation};
pub use perft::perft;
pub use position::{MoveList, PlayError, Position, PositionError, PositionErrorKinds};
pub use role::Role;
pub use rules::{is_valid_move, perform_special_moves};
pub use square::{ParseSquareError, Square};
pub use status::{game_status, Status};
pub use types::{Move, Piece};

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
