/* Description: Repetition bounds attached to atoms.

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

//! Repetition bounds attached to atoms.

use core::fmt;

use crate::{
  classify::{parse_number, ESCAPE},
  encoding::Symbol,
  error::{ParseError, ParseErrorKind},
};

/// How many times an atom must and may match. `max == None` is unbounded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct Cardinality {
  pub min: u32,
  pub max: Option<u32>,
}

impl Cardinality {
  pub const ONCE: Self = Self {
    min: 1,
    max: Some(1),
  };
  pub const PLUS: Self = Self { min: 1, max: None };
  pub const QUESTION: Self = Self {
    min: 0,
    max: Some(1),
  };
  pub const STAR: Self = Self { min: 0, max: None };

  /// Bounds from a counted repetition, rejecting `min > max`.
  pub fn bounded(min: u32, max: Option<u32>, at: usize) -> Result<Self, ParseError> {
    match max {
      Some(max) if min > max => Err(ParseErrorKind::InvalidCardinalityRange.at(at)),
      _ => Ok(Self { min, max }),
    }
  }

  #[inline(always)]
  pub const fn is_optional(&self) -> bool { self.min == 0 }

  #[inline]
  pub const fn is_repeatable(&self) -> bool {
    match self.max {
      None => true,
      Some(max) => max > 1,
    }
  }
}

impl Default for Cardinality {
  fn default() -> Self { Self::ONCE }
}

impl fmt::Display for Cardinality {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      Self::ONCE => Ok(()),
      Self::STAR => write!(f, "*"),
      Self::PLUS => write!(f, "+"),
      Self::QUESTION => write!(f, "?"),
      Self {
        min,
        max: Some(max),
      } if min == max => write!(f, "{{{}}}", min),
      Self { min, max: None } => write!(f, "{{{},}}", min),
      Self {
        min,
        max: Some(max),
      } => write!(f, "{{{},{}}}", min, max),
    }
  }
}

fn is_ascii<S: Symbol>(c: S, ascii: u8) -> bool { c.code_point() == u32::from(ascii) }

/// Parse the counted repetition whose `{` sits at `at`, returning its bounds
/// and full width.
///
/// Accepts `{m}`, `{m,}`, `{,n}`, `{m,n}` and `{,}`, with blanks allowed
/// around either number.
pub fn parse_counted_repeat<S>(pattern: &[S], at: usize) -> Result<(Cardinality, usize), ParseError>
where S: Symbol {
  debug_assert!(is_ascii(pattern[at], b'{'));
  let body_start = at + 1;
  let mut comma: Option<usize> = None;
  let mut i = body_start;
  let close = loop {
    let Some(&c) = pattern.get(i) else {
      return Err(ParseErrorKind::MissingClosingCurlyBrace.at(at));
    };
    if is_ascii(c, b'}') {
      break i;
    }
    if comma.is_none() && is_ascii(c, b',') {
      comma = Some(i);
    }
    if c.code_point() == ESCAPE {
      /* Escapes are never digits, so this only decides which error wins. */
      i += 1;
    }
    i += 1;
  };
  let width = close + 1 - at;

  let card = match comma {
    None => {
      let n = parse_number(&pattern[body_start..close], body_start)?;
      Cardinality {
        min: n,
        max: Some(n),
      }
    },
    Some(comma) => {
      let lo = &pattern[body_start..comma];
      let hi = &pattern[comma + 1..close];
      let min = if is_blank_run(lo) {
        0
      } else {
        parse_number(lo, body_start)?
      };
      let max = if is_blank_run(hi) {
        None
      } else {
        Some(parse_number(hi, comma + 1)?)
      };
      Cardinality::bounded(min, max, at)?
    },
  };
  trace!("counted repeat at {}: {}", at, card);
  Ok((card, width))
}

fn is_blank_run<S: Symbol>(run: &[S]) -> bool {
  run.iter().all(|c| is_ascii(*c, b' ') || is_ascii(*c, b'\t'))
}
