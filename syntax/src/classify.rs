/* Description: Character classification and escape decoding.

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

//! Character classification and escape decoding.
//!
//! Every later pass reads the pattern through [`classify`], which returns the
//! next logical character along with how many pattern characters it spans.

use core::fmt;

use crate::{
  encoding::Symbol,
  error::{ParseError, ParseErrorKind},
};

pub const ESCAPE: u32 = b'\\' as u32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub enum Structural {
  /// `(`
  OpenParen,
  /// `)`
  CloseParen,
  /// `[`
  OpenBracket,
  /// `]`
  CloseBracket,
  /// `{`
  OpenCurly,
  /// `}`
  CloseCurly,
  /// `.`
  Dot,
  /// `*`
  Star,
  /// `+`
  Plus,
  /// `?`
  Question,
  /// `|`
  Bar,
  /// `^`
  Caret,
  /// `$`
  Dollar,
}

impl Structural {
  pub const fn from_code_point(c: u32) -> Option<Self> {
    if c > 0x7F {
      return None;
    }
    Some(match c as u8 {
      b'(' => Self::OpenParen,
      b')' => Self::CloseParen,
      b'[' => Self::OpenBracket,
      b']' => Self::CloseBracket,
      b'{' => Self::OpenCurly,
      b'}' => Self::CloseCurly,
      b'.' => Self::Dot,
      b'*' => Self::Star,
      b'+' => Self::Plus,
      b'?' => Self::Question,
      b'|' => Self::Bar,
      b'^' => Self::Caret,
      b'$' => Self::Dollar,
      _ => return None,
    })
  }

  pub const fn as_char(self) -> char {
    match self {
      Self::OpenParen => '(',
      Self::CloseParen => ')',
      Self::OpenBracket => '[',
      Self::CloseBracket => ']',
      Self::OpenCurly => '{',
      Self::CloseCurly => '}',
      Self::Dot => '.',
      Self::Star => '*',
      Self::Plus => '+',
      Self::Question => '?',
      Self::Bar => '|',
      Self::Caret => '^',
      Self::Dollar => '$',
    }
  }
}

impl fmt::Display for Structural {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.as_char()) }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Class<S> {
  Structural(Structural),
  /// A plain character, or the result of decoding an escape.
  Literal(S),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Classified<S> {
  pub class: Class<S>,
  /// How many pattern characters were consumed.
  pub width: usize,
}

/// Classify the character at `at`, decoding an escape sequence if one starts
/// there.
pub fn classify<S>(pattern: &[S], at: usize) -> Result<Classified<S>, ParseError>
where S: Symbol {
  let c = pattern[at];
  let cp = c.code_point();
  if cp == ESCAPE {
    let (c, width) = decode_escape(pattern, at)?;
    return Ok(Classified {
      class: Class::Literal(c),
      width,
    });
  }
  let class = match Structural::from_code_point(cp) {
    Some(s) => Class::Structural(s),
    None => Class::Literal(c),
  };
  Ok(Classified { class, width: 1 })
}

/// Decode the escape sequence whose backslash sits at `at`.
///
/// Returns the decoded character and the number of pattern characters the
/// whole sequence spans.
pub fn decode_escape<S>(pattern: &[S], at: usize) -> Result<(S, usize), ParseError>
where S: Symbol {
  debug_assert_eq!(pattern[at].code_point(), ESCAPE);
  let Some(&escaped) = pattern.get(at + 1) else {
    return Err(ParseErrorKind::MissingEscapeSequence.at(at));
  };
  let code = match escaped.code_point() {
    c if c == u32::from(b'x') => {
      let digits = pattern
        .get(at + 2..at + 4)
        .ok_or(ParseErrorKind::InsufficientHex8Data.at(at))?;
      let value = hex_digits(digits, at + 2)?;
      return Ok((representable(value, at)?, 4));
    },
    c if c == u32::from(b'u') => {
      let digits = pattern
        .get(at + 2..at + 6)
        .ok_or(ParseErrorKind::InsufficientHex16Data.at(at))?;
      let value = hex_digits(digits, at + 2)?;
      return Ok((representable(value, at)?, 6));
    },
    c if c == u32::from(b'n') => 0x0A,
    c if c == u32::from(b'r') => 0x0D,
    c if c == u32::from(b't') => 0x09,
    _ => return Ok((escaped, 2)),
  };
  Ok((representable(code, at)?, 2))
}

fn representable<S>(code: u32, at: usize) -> Result<S, ParseError>
where S: Symbol {
  S::from_code_point(code).ok_or(ParseErrorKind::UnrepresentableCharacter.at(at))
}

#[inline]
fn is_blank(c: u32) -> bool { c == u32::from(b' ') || c == u32::from(b'\t') }

/// Strip blanks from both ends of a numeric run, returning the remaining run
/// and its offset in the pattern.
fn trim_blanks<S>(run: &[S], at: usize) -> (&[S], usize)
where S: Symbol {
  let start = run
    .iter()
    .position(|c| !is_blank(c.code_point()))
    .unwrap_or(run.len());
  let end = run
    .iter()
    .rposition(|c| !is_blank(c.code_point()))
    .map_or(start, |i| i + 1);
  (&run[start..end], at + start)
}

fn nibble(c: u32) -> Option<u32> { char::from_u32(c).and_then(|c| c.to_digit(16)) }

/// Parse exactly the given hexadecimal digits, with no blanks allowed.
fn hex_digits<S>(digits: &[S], at: usize) -> Result<u32, ParseError>
where S: Symbol {
  let mut value: u32 = 0;
  for (i, d) in digits.iter().enumerate() {
    let n = nibble(d.code_point()).ok_or(ParseErrorKind::InvalidHexNibble.at(at + i))?;
    value = (value << 4) | n;
  }
  Ok(value)
}

/// Parse a blank-delimited hexadecimal run.
pub fn parse_hex<S>(run: &[S], at: usize) -> Result<u32, ParseError>
where S: Symbol {
  let (digits, at) = trim_blanks(run, at);
  if digits.is_empty() {
    return Err(ParseErrorKind::InvalidHexNibble.at(at));
  }
  let mut value: u32 = 0;
  for (i, d) in digits.iter().enumerate() {
    let n = nibble(d.code_point()).ok_or(ParseErrorKind::InvalidHexNibble.at(at + i))?;
    value = value
      .checked_mul(16)
      .and_then(|v| v.checked_add(n))
      .ok_or(ParseErrorKind::InvalidHexNibble.at(at + i))?;
  }
  Ok(value)
}

/// Parse a blank-delimited decimal run.
pub fn parse_decimal<S>(run: &[S], at: usize) -> Result<u32, ParseError>
where S: Symbol {
  let (digits, at) = trim_blanks(run, at);
  if digits.is_empty() {
    return Err(ParseErrorKind::InvalidDecimalDigit.at(at));
  }
  let mut value: u32 = 0;
  for (i, d) in digits.iter().enumerate() {
    let n = char::from_u32(d.code_point())
      .and_then(|c| c.to_digit(10))
      .ok_or(ParseErrorKind::InvalidDecimalDigit.at(at + i))?;
    value = value
      .checked_mul(10)
      .and_then(|v| v.checked_add(n))
      .ok_or(ParseErrorKind::InvalidDecimalDigit.at(at + i))?;
  }
  Ok(value)
}

/// Parse a numeric run, which is hexadecimal when prefixed with `0x` or `0X`.
pub fn parse_number<S>(run: &[S], at: usize) -> Result<u32, ParseError>
where S: Symbol {
  let (digits, at) = trim_blanks(run, at);
  match digits {
    [zero, x, rest @ ..]
      if zero.code_point() == u32::from(b'0')
        && (x.code_point() == u32::from(b'x') || x.code_point() == u32::from(b'X')) =>
    {
      if rest.is_empty() {
        return Err(ParseErrorKind::InvalidHexNibble.at(at + 2));
      }
      parse_hex(rest, at + 2)
    },
    _ => parse_decimal(digits, at),
  }
}
