/* Description: Validated node lists from regexp pattern strings.

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

//! Validated node lists from regexp pattern strings.
//!
//! A pattern is turned into a flat list of [`nodes::Node`]s in several passes
//! over explicit index arrays:
//!
//! 1. [`scope`] places the start and end of every alternation,
//! 2. [`assemble`] classifies each character and validates the grammar,
//! 3. [`collapse`] rewrites single-character alternations into bracket sets and
//!    merges literal runs,
//! 4. [`resolve`] links every node to its continuation.
//!
//! [`parse`] runs all of them in order.

extern crate alloc;

#[allow(unused_imports)]
mod alloc_types {
  /* no_std is enabled except for test environments, so we need to use the
   * special imports from the extern alloc crate. */
  cfg_if::cfg_if! {
    if #[cfg(test)] {
      pub use std::{boxed::Box, vec, vec::Vec};
    } else {
      pub use ::alloc::{boxed::Box, vec, vec::Vec};
    }
  }
}

#[macro_use]
mod macros;

pub mod assemble;
pub mod cardinality;
pub mod charset;
pub mod classify;
pub mod collapse;
pub mod config;
pub mod error;
pub mod nodes;
pub mod resolve;
pub mod scope;

pub use config::Config;
pub use error::{ParseError, ParseErrorKind};

pub mod encoding {
  use core::{fmt, hash::Hash};

  use crate::classify::Structural;

  /// A single pattern character, narrow or wide.
  pub trait Symbol: Copy+Eq+Ord+Hash+fmt::Debug {
    fn code_point(self) -> u32;

    fn from_code_point(c: u32) -> Option<Self>;

    /// Write this character so that it reads back as the same literal.
    fn fmt_literal(self, f: &mut fmt::Formatter) -> fmt::Result {
      let c = self.code_point();
      match c {
        0x0A => return write!(f, "\\n"),
        0x0D => return write!(f, "\\r"),
        0x09 => return write!(f, "\\t"),
        _ => (),
      }
      if c == u32::from(b'\\') || Structural::from_code_point(c).is_some() {
        /* All structural characters are ASCII. */
        return write!(f, "\\{}", char::from(c as u8));
      }
      match c {
        0x20..=0x7E => write!(f, "{}", char::from(c as u8)),
        0..=0xFF => write!(f, "\\x{:02X}", c),
        0x100..=0xFFFF => write!(f, "\\u{:04X}", c),
        _ => match char::from_u32(c) {
          Some(c) => write!(f, "{}", c),
          None => write!(f, "\\u{{{:X}}}", c),
        },
      }
    }
  }

  impl Symbol for u8 {
    #[inline(always)]
    fn code_point(self) -> u32 { u32::from(self) }

    #[inline(always)]
    fn from_code_point(c: u32) -> Option<Self> { u8::try_from(c).ok() }
  }

  impl Symbol for char {
    #[inline(always)]
    fn code_point(self) -> u32 { u32::from(self) }

    #[inline(always)]
    fn from_code_point(c: u32) -> Option<Self> { char::from_u32(c) }
  }

  pub trait LiteralEncoding {
    type Single: Symbol;
  }

  /// Narrow patterns: one byte per character.
  pub struct ByteEncoding;
  impl LiteralEncoding for ByteEncoding {
    type Single = u8;
  }

  /// Wide patterns: one unicode scalar value per character.
  pub struct UnicodeEncoding;
  impl LiteralEncoding for UnicodeEncoding {
    type Single = char;
  }
}

use alloc_types::*;
use encoding::Symbol;
use nodes::NodeList;

/// Run every syntax pass over `pattern`, producing a node list ready to be
/// numbered into automaton states.
pub fn parse<S>(pattern: &[S], config: &Config) -> Result<NodeList<S>, ParseError>
where S: Symbol {
  let scopes = scope::AlternationScopes::analyze(pattern);
  let mut list = assemble::Assembler::new(pattern, scopes.as_ref()).assemble()?;
  if config.get_collapse_alternations() && list.alternations > 0 {
    let collapsed = collapse::collapse_alternations(&mut list.nodes);
    debug!("collapsed {} of {} alternations", collapsed, list.alternations);
  }
  if config.get_coalesce_literals() {
    let merged = collapse::coalesce_literals(&mut list.nodes);
    debug!("merged {} literal nodes into strings", merged);
  }
  resolve::resolve(&mut list.nodes);
  debug!(
    "parsed pattern of length {} into {} nodes",
    pattern.len(),
    list.nodes.len()
  );
  Ok(list)
}

/// Convenience for wide patterns given as a string.
pub fn parse_str(pattern: &str, config: &Config) -> Result<NodeList<char>, ParseError> {
  let chars: Vec<char> = pattern.chars().collect();
  parse(&chars[..], config)
}

#[cfg(test)]
mod test {
  use super::*;

  struct Lit<S>(S);

  impl<S: Symbol> core::fmt::Display for Lit<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result { self.0.fmt_literal(f) }
  }

  #[test]
  fn literal_formatting() {
    assert_eq!(format!("{}", Lit('a')), "a");
    assert_eq!(format!("{}", Lit('(')), "\\(");
    assert_eq!(format!("{}", Lit('\\')), "\\\\");
    assert_eq!(format!("{}", Lit('\n')), "\\n");
    assert_eq!(format!("{}", Lit(0x01u8)), "\\x01");
    assert_eq!(format!("{}", Lit('\u{3b1}')), "\\u03B1");
    assert_eq!(format!("{}", Lit('\u{1F600}')), "\u{1F600}");
  }

  #[test]
  fn symbol_code_points() {
    assert_eq!(u8::from_code_point(0x41), Some(b'A'));
    assert_eq!(u8::from_code_point(0x100), None);
    assert_eq!(char::from_code_point(0xD800), None);
    assert_eq!('z'.code_point(), 0x7A);
  }

  #[test]
  fn parse_runs_all_passes() {
    let list = parse_str("(ab|cd)ef", &Config::new()).unwrap();
    assert_eq!(list.capture_groups, 1);
    assert_eq!(list.alternations, 1);
    assert!(!list.never_matches);
  }
}
