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

use crate::color::{ByColor, Color};

/// Countdown clocks, one per side, in whole seconds.
///
/// The clock has no notion of wall time. The host calls [`Clock::tick()`]
/// for the side to move once a second.
///
/// # Examples
///
/// ```
/// use rochade::{Clock, Color};
///
/// let mut clock = Clock::new(2);
/// assert!(!clock.tick(Color::White));
/// assert!(!clock.tick(Color::White));
/// assert_eq!(clock.remaining(Color::White), 0);
///
/// // Only the next tick finds the counter empty.
/// assert!(clock.tick(Color::White));
/// assert_eq!(clock.remaining(Color::White), 0);
/// assert_eq!(clock.remaining(Color::Black), 2);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Clock {
    remaining: ByColor<u32>,
}

impl Clock {
    /// Ten minutes per side.
    pub const DEFAULT_SECONDS: u32 = 600;

    /// Gives both sides the same budget.
    pub const fn new(seconds: u32) -> Clock {
        Clock {
            remaining: ByColor {
                white: seconds,
                black: seconds,
            },
        }
    }

    #[inline]
    pub const fn remaining(&self, color: Color) -> u32 {
        *self.remaining.get(color)
    }

    /// Takes one second from `color`.
    ///
    /// Returns `true` if the counter was already at zero, so that the
    /// second would have gone below it. The counter stays at zero.
    pub fn tick(&mut self, color: Color) -> bool {
        let remaining = self.remaining.get_mut(color);
        match remaining.checked_sub(1) {
            Some(left) => {
                *remaining = left;
                false
            }
            None => true,
        }
    }

    /// Tests if `color` has no time left.
    #[inline]
    pub const fn is_flagged(&self, color: Color) -> bool {
        self.remaining(color) == 0
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::new(Clock::DEFAULT_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_only_one_side() {
        let mut clock = Clock::default();
        assert!(!clock.tick(Color::Black));
        assert_eq!(clock.remaining(Color::Black), 599);
        assert_eq!(clock.remaining(Color::White), 600);
        assert!(!clock.is_flagged(Color::Black));
    }

    #[test]
    fn test_flag_falls_after_last_second() {
        let mut clock = Clock::new(1);
        assert!(!clock.tick(Color::Black));
        assert!(clock.is_flagged(Color::Black));
        for _ in 0..3 {
            assert!(clock.tick(Color::Black));
        }
        assert_eq!(clock.remaining(Color::Black), 0);
        assert!(!clock.is_flagged(Color::White));
    }

    #[test]
    fn test_zero_budget() {
        let mut clock = Clock::new(0);
        assert!(clock.is_flagged(Color::White));
        assert!(clock.tick(Color::White));
        assert_eq!(clock.remaining(Color::White), 0);
    }
}
