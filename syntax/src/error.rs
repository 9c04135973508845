/* Description: Errors raised while parsing a pattern.

Copyright (C) 2024 Danny McClanahan <dmcC2@hypnicjerk.ai>
SPDX-License-Identifier: GPL-3.0-or-later

This file is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as
published by the Free Software Foundation; either version 3 of the
License, or (at your option) any later version.

This file is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>. */

//! Errors raised while parsing a pattern.

use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParseErrorKind {
  /// escape character at the end of the pattern
  MissingEscapeSequence,
  /// invalid hexadecimal digit
  InvalidHexNibble,
  /// `\x` escape needs exactly 2 hexadecimal digits
  InsufficientHex8Data,
  /// `\u` escape needs exactly 4 hexadecimal digits
  InsufficientHex16Data,
  /// bracket expression is never closed
  MissingClosingBracket,
  /// counted repetition is never closed
  MissingClosingCurlyBrace,
  /// group is never closed
  MissingClosingParen,
  /// closing paren without an open group
  UnmatchedClosingParen,
  /// closing bracket without a bracket expression
  UnmatchedClosingBracket,
  /// closing curly brace without a counted repetition
  UnmatchedClosingCurly,
  /// token cannot form a valid subexpression here
  InvalidSubexpression,
  /// alternation bar is not followed by a branch
  InvalidDataAfterOr,
  /// alternation bar is not preceded by a branch
  InvalidDataBeforeOr,
  /// repetition applied to another repetition
  ConsecutiveCardinalities,
  /// repetition lower bound exceeds its upper bound
  InvalidCardinalityRange,
  /// repetition with nothing to repeat
  LeadingCardinality,
  /// invalid decimal digit
  InvalidDecimalDigit,
  /// character range lower bound exceeds its upper bound
  InvalidCharacterRange,
  /// escaped code point does not fit the pattern encoding
  UnrepresentableCharacter,
}

impl ParseErrorKind {
  #[inline(always)]
  pub const fn at(self, at: usize) -> ParseError { ParseError { kind: self, at } }
}

/// {kind} at offset {at}
#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParseError {
  pub kind: ParseErrorKind,
  /// Offset into the pattern, in characters.
  pub at: usize,
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn display() {
    let e = ParseErrorKind::UnmatchedClosingParen.at(3);
    assert_eq!(
      format!("{}", e),
      "closing paren without an open group at offset 3"
    );
    assert_eq!(
      format!("{:?}", e),
      "ParseError { kind: UnmatchedClosingParen, at: 3 }"
    );
  }
}
