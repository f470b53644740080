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

use core::{fmt, fmt::Write as _};

/// Sink for the short ASCII renderings of squares, notation and FENs.
pub(crate) trait AppendAscii {
    type Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error>;

    fn append_u32(&mut self, n: u32) -> Result<(), Self::Error> {
        if n >= 10 {
            self.append_u32(n / 10)?;
        }
        self.append_ascii(char::from(b'0' + (n % 10) as u8))
    }
}

impl AppendAscii for fmt::Formatter<'_> {
    type Error = fmt::Error;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.write_char(ascii_char)
    }
}

#[cfg(feature = "alloc")]
impl AppendAscii for alloc::string::String {
    type Error = core::convert::Infallible;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.push(ascii_char);
        Ok(())
    }
}

impl<const CAP: usize> AppendAscii for arrayvec::ArrayString<CAP> {
    type Error = arrayvec::CapacityError<char>;

    fn append_ascii(&mut self, ascii_char: char) -> Result<(), Self::Error> {
        self.try_push(ascii_char)
    }
}
