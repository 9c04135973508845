/* Description: Compile regexp patterns into table-driven state automata.

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

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(not(test), no_std)]

//! Compile regexp patterns into table-driven state automata.
//!
//! ```
//! use lexregex::{ByteEncoding, Pattern, StateId};
//!
//! let p = Pattern::<ByteEncoding>::compile_bytes(b"(ab|cd)ef").unwrap();
//! assert_eq!(p.capture_groups(), 1);
//! // One group, two branches, the continuation, then the two sinks.
//! assert_eq!(p.states().len(), 6);
//! assert_eq!(p.states()[0].close_group, StateId(3));
//! ```
//!
//! Matching against a subject is left to the consumer of the compiled
//! [`Automaton`], which documents how its states are meant to be walked.

extern crate alloc;

#[allow(unused_imports)]
mod alloc_types {
  /* no_std is enabled except for test environments, so we need to use the
   * special imports from the extern alloc crate. */
  cfg_if::cfg_if! {
    if #[cfg(test)] {
      pub use std::vec::Vec;
    } else {
      pub use ::alloc::vec::Vec;
    }
  }
}

use core::{fmt, marker::PhantomData};

use displaydoc::Display;
pub use lexregex_automata::{
  self as automata, Anchor, Automaton, Lexicon, State, StateFlags, StateId, Transition,
};
pub use lexregex_syntax::{
  self as syntax,
  encoding::{ByteEncoding, LiteralEncoding, Symbol, UnicodeEncoding},
  Config, ParseError, ParseErrorKind,
};
use thiserror::Error;

use crate::alloc_types::*;

#[derive(Debug, Display, Error, Copy, Clone, PartialEq, Eq)]
pub enum RegexpError {
  /// failed to parse pattern: {0}
  ParseError(#[from] ParseError),
}

/// A compiled pattern over the characters of the encoding `L`.
pub struct Pattern<L>
where L: LiteralEncoding
{
  automaton: Automaton<L::Single>,
  _ph: PhantomData<L>,
}

impl<L> fmt::Debug for Pattern<L>
where L: LiteralEncoding
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Pattern")
      .field("automaton", &self.automaton)
      .finish()
  }
}

impl<L> fmt::Display for Pattern<L>
where L: LiteralEncoding
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.automaton, f) }
}

impl<L> Clone for Pattern<L>
where L: LiteralEncoding
{
  fn clone(&self) -> Self {
    Self {
      automaton: self.automaton.clone(),
      _ph: PhantomData,
    }
  }
}

impl<L> PartialEq for Pattern<L>
where L: LiteralEncoding
{
  fn eq(&self, other: &Self) -> bool { self.automaton == other.automaton }
}

impl<L> Eq for Pattern<L> where L: LiteralEncoding {}

impl<L> Pattern<L>
where L: LiteralEncoding
{
  pub fn compile(pattern: &[L::Single]) -> Result<Self, RegexpError> {
    Self::compile_with(pattern, &Config::new())
  }

  pub fn compile_with(pattern: &[L::Single], config: &Config) -> Result<Self, RegexpError> {
    let list = lexregex_syntax::parse(pattern, config)?;
    let automaton = lexregex_automata::build(list);
    Ok(Self {
      automaton,
      _ph: PhantomData,
    })
  }

  #[inline(always)]
  pub fn states(&self) -> &[State<L::Single>] { self.automaton.states() }

  #[inline(always)]
  pub fn automaton(&self) -> &Automaton<L::Single> { &self.automaton }

  pub fn into_automaton(self) -> Automaton<L::Single> { self.automaton }

  /// How many capture slots a matcher needs per search.
  #[inline(always)]
  pub fn capture_groups(&self) -> usize { self.automaton.capture_groups() }

  /// Whether the pattern was found to be unable to match any subject.
  #[inline(always)]
  pub fn never_matches(&self) -> bool { self.automaton.never_matches() }
}

impl Pattern<ByteEncoding> {
  pub fn compile_bytes(pattern: &[u8]) -> Result<Self, RegexpError> { Self::compile(pattern) }
}

impl Pattern<UnicodeEncoding> {
  pub fn compile_str(pattern: &str) -> Result<Self, RegexpError> {
    let chars: Vec<char> = pattern.chars().collect();
    Self::compile(&chars)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn error_display() {
    let e = Pattern::<UnicodeEncoding>::compile_str("a)").unwrap_err();
    assert_eq!(
      e,
      RegexpError::ParseError(ParseErrorKind::UnmatchedClosingParen.at(1))
    );
    assert_eq!(
      format!("{}", e),
      "failed to parse pattern: closing paren without an open group at offset 1"
    );
  }

  #[test]
  fn config_is_honored() {
    let collapsed = Pattern::<ByteEncoding>::compile_bytes(b"a|b").unwrap();
    let expanded = Pattern::<ByteEncoding>::compile_with(
      b"a|b",
      &Config::new().collapse_alternations(false),
    )
    .unwrap();
    assert_eq!(collapsed.states().len(), 3);
    assert_eq!(expanded.states().len(), 4);
    assert_ne!(collapsed, expanded);
  }

  #[test]
  fn wide_literals() {
    let p = Pattern::<UnicodeEncoding>::compile_str("\u{3b1}\\u03b2").unwrap();
    assert_eq!(
      p.states()[0].lexicon,
      Lexicon::LiteralString(vec!['\u{3b1}', '\u{3b2}'].into_boxed_slice())
    );
    let e = Pattern::<ByteEncoding>::compile_bytes(b"\\u03b2").unwrap_err();
    assert_eq!(
      e,
      RegexpError::ParseError(ParseErrorKind::UnrepresentableCharacter.at(0))
    );
  }
}
