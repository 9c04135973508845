/* Description: Bracket expressions and the character sets they denote.

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

//! Bracket expressions and the character sets they denote.

use core::{fmt, hash::BuildHasherDefault};

use indexmap::IndexSet;
use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::{
  classify::{decode_escape, ESCAPE},
  encoding::Symbol,
  error::{ParseError, ParseErrorKind},
};

pub(crate) type MemberSet<S> = IndexSet<CharRange<S>, BuildHasherDefault<FxHasher>>;

#[inline]
pub(crate) fn member_set<S>() -> MemberSet<S>
where S: Symbol {
  IndexSet::with_hasher(BuildHasherDefault::default())
}

/// An inclusive range of characters. Single characters have `lo == hi`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharRange<S> {
  pub lo: S,
  pub hi: S,
}

impl<S> CharRange<S>
where S: Symbol
{
  pub const fn single(c: S) -> Self { Self { lo: c, hi: c } }

  pub fn is_single(&self) -> bool { self.lo == self.hi }

  pub fn contains(&self, c: S) -> bool {
    let c = c.code_point();
    self.lo.code_point() <= c && c <= self.hi.code_point()
  }
}

impl<S> fmt::Display for CharRange<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    fmt_member(self.lo, f)?;
    if !self.is_single() {
      write!(f, "-")?;
      fmt_member(self.hi, f)?;
    }
    Ok(())
  }
}

fn fmt_member<S>(c: S, f: &mut fmt::Formatter) -> fmt::Result
where S: Symbol {
  if c.code_point() == u32::from(b'-') {
    write!(f, "\\-")
  } else {
    c.fmt_literal(f)
  }
}

/// A possibly negated union of character ranges, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharSet<S> {
  pub negated: bool,
  pub members: SmallVec<[CharRange<S>; 4]>,
}

impl<S> CharSet<S>
where S: Symbol
{
  /// The set of every character, which is what `.` denotes.
  pub fn any() -> Self {
    Self {
      negated: true,
      members: SmallVec::new(),
    }
  }

  pub fn is_any(&self) -> bool { self.negated && self.members.is_empty() }

  /// Build a non-negated set, dropping duplicate members.
  pub fn from_members(members: impl IntoIterator<Item=CharRange<S>>) -> Self {
    let mut set = member_set();
    set.extend(members);
    Self {
      negated: false,
      members: set.into_iter().collect(),
    }
  }

  pub fn contains(&self, c: S) -> bool {
    self.members.iter().any(|r| r.contains(c)) != self.negated
  }
}

impl<S> fmt::Display for CharSet<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.is_any() {
      return write!(f, ".");
    }
    write!(f, "[")?;
    if self.negated {
      write!(f, "^")?;
    }
    for r in self.members.iter() {
      write!(f, "{}", r)?;
    }
    write!(f, "]")
  }
}

#[inline]
fn is<S: Symbol>(c: Option<&S>, ascii: u8) -> bool {
  c.is_some_and(|c| c.code_point() == u32::from(ascii))
}

/// Scan past the bracket expression opening at `at` without validating its
/// members. Returns its full width, or `None` if it is never closed.
pub fn bracket_extent<S>(pattern: &[S], at: usize) -> Option<usize>
where S: Symbol {
  let mut i = at + 1;
  if is(pattern.get(i), b'^') {
    i += 1;
  }
  let first = i;
  while let Some(c) = pattern.get(i) {
    let c = c.code_point();
    if c == ESCAPE {
      i += 2;
      continue;
    }
    if c == u32::from(b']') && i != first {
      return Some(i + 1 - at);
    }
    i += 1;
  }
  None
}

fn member<S>(pattern: &[S], at: usize) -> Result<(S, usize), ParseError>
where S: Symbol {
  let c = pattern[at];
  if c.code_point() == ESCAPE {
    decode_escape(pattern, at)
  } else {
    Ok((c, 1))
  }
}

/// Parse the bracket expression opening at `at`, returning its set and full
/// width.
pub fn parse_bracket<S>(pattern: &[S], at: usize) -> Result<(CharSet<S>, usize), ParseError>
where S: Symbol {
  debug_assert!(is(pattern.get(at), b'['));
  let mut i = at + 1;
  let negated = is(pattern.get(i), b'^');
  if negated {
    i += 1;
  }
  let first = i;
  let mut members = member_set();
  loop {
    let Some(c) = pattern.get(i) else {
      return Err(ParseErrorKind::MissingClosingBracket.at(at));
    };
    if c.code_point() == u32::from(b']') && i != first {
      i += 1;
      break;
    }
    let lo_at = i;
    let (lo, width) = member(pattern, i)?;
    i += width;
    if is(pattern.get(i), b'-') && pattern.get(i + 1).is_some() && !is(pattern.get(i + 1), b']')
    {
      let (hi, width) = member(pattern, i + 1)?;
      i += 1 + width;
      if lo.code_point() > hi.code_point() {
        return Err(ParseErrorKind::InvalidCharacterRange.at(lo_at));
      }
      members.insert(CharRange { lo, hi });
    } else {
      members.insert(CharRange::single(lo));
    }
  }
  trace!("bracket at {} has {} members", at, members.len());
  Ok((
    CharSet {
      negated,
      members: members.into_iter().collect(),
    },
    i - at,
  ))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::alloc_types::*;

  fn chars(s: &str) -> Vec<char> { s.chars().collect() }

  fn bracket(s: &str) -> Result<(CharSet<char>, usize), ParseError> {
    parse_bracket(&chars(s), 0)
  }

  #[test]
  fn simple_members() {
    let (set, width) = bracket("[a-cx]z").unwrap();
    assert_eq!(width, 6);
    assert!(!set.negated);
    assert_eq!(set.members.as_slice(), &[
      CharRange { lo: 'a', hi: 'c' },
      CharRange::single('x')
    ]);
    assert!(set.contains('b'));
    assert!(!set.contains('d'));
    assert_eq!(format!("{}", set), "[a-cx]");
  }

  #[test]
  fn leading_close_and_dashes() {
    let (set, width) = bracket("[]a]").unwrap();
    assert_eq!(width, 4);
    assert!(set.contains(']'));
    let (set, _) = bracket("[^]-]").unwrap();
    assert!(set.negated);
    assert!(!set.contains(']'));
    assert!(!set.contains('-'));
    assert!(set.contains('a'));
    let (set, _) = bracket("[-a]").unwrap();
    assert!(set.contains('-'));
    assert_eq!(format!("{}", set), "[\\-a]");
  }

  #[test]
  fn escapes_and_duplicates() {
    let (set, width) = bracket("[\\x41\\]aa]").unwrap();
    assert_eq!(width, 10);
    assert_eq!(set.members.as_slice(), &[
      CharRange::single('A'),
      CharRange::single(']'),
      CharRange::single('a'),
    ]);
  }

  #[test]
  fn errors() {
    assert_eq!(
      parse_bracket(&chars("x[abc"), 1),
      Err(ParseErrorKind::MissingClosingBracket.at(1))
    );
    assert_eq!(bracket("[]"), Err(ParseErrorKind::MissingClosingBracket.at(0)));
    assert_eq!(
      bracket("[ab-a]"),
      Err(ParseErrorKind::InvalidCharacterRange.at(2))
    );
    assert_eq!(
      bracket("[\\x4]"),
      Err(ParseErrorKind::InvalidHexNibble.at(4))
    );
  }

  #[test]
  fn extent() {
    assert_eq!(bracket_extent(&chars("[]a]b"), 0), Some(4));
    assert_eq!(bracket_extent(&chars("[^\\]|]"), 0), Some(6));
    assert_eq!(bracket_extent(&chars("[a|b"), 0), None);
  }

  #[test]
  fn any_set() {
    let dot = CharSet::<u8>::any();
    assert!(dot.is_any());
    assert!(dot.contains(b'\n'));
    assert_eq!(format!("{}", dot), ".");
    let set = CharSet::from_members([CharRange::single(b'a'), CharRange::single(b'a')]);
    assert_eq!(set.members.len(), 1);
  }
}
