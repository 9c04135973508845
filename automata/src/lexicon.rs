/* Description: What each state matches against the subject.

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

//! What each state matches against the subject.

use core::fmt;

use lexregex_syntax::{charset::CharSet, encoding::Symbol, nodes::NodeKind};

use crate::alloc_types::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Anchor {
  /// Start of the subject.
  Start,
  /// End of the subject.
  End,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lexicon<S> {
  Literal(S),
  /// Inclusive.
  Range {
    lo: S,
    hi: S,
  },
  BracketSet(CharSet<S>),
  /// Any single character.
  Dot,
  LiteralString(Box<[S]>),
  /// Zero-width entry into a group.
  GroupMarker,
  Anchor(Anchor),
  /// Held by the accepting and error sinks.
  EndMarker,
}

impl<S> Lexicon<S>
where S: Symbol
{
  /// Pick the narrowest lexicon that matches exactly the members of `set`.
  pub fn for_charset(set: CharSet<S>) -> Self {
    if set.is_any() {
      return Self::Dot;
    }
    if !set.negated && set.members.len() == 1 {
      let r = set.members[0];
      return if r.is_single() {
        Self::Literal(r.lo)
      } else {
        Self::Range { lo: r.lo, hi: r.hi }
      };
    }
    Self::BracketSet(set)
  }

  /// The lexicon for a state-bearing node, or `None` for any other node.
  pub fn for_node_kind(kind: &NodeKind<S>) -> Option<Self> {
    Some(match kind {
      NodeKind::GroupOpen => Self::GroupMarker,
      NodeKind::Literal(cs) => match cs.as_slice() {
        [c] => Self::Literal(*c),
        cs => Self::LiteralString(cs.into()),
      },
      NodeKind::Bracket(set) | NodeKind::CollapsedAlternationStart(set) => {
        Self::for_charset(set.clone())
      },
      NodeKind::Dot => Self::Dot,
      NodeKind::AnchorStart => Self::Anchor(Anchor::Start),
      NodeKind::AnchorEnd => Self::Anchor(Anchor::End),
      _ => return None,
    })
  }

  /// Whether this lexicon can consume `c` as its first character.
  pub fn matches(&self, c: S) -> bool {
    match self {
      Self::Literal(l) => *l == c,
      Self::Range { lo, hi } => {
        let c = c.code_point();
        lo.code_point() <= c && c <= hi.code_point()
      },
      Self::BracketSet(set) => set.contains(c),
      Self::Dot => true,
      Self::LiteralString(s) => s.first() == Some(&c),
      Self::GroupMarker | Self::Anchor(_) | Self::EndMarker => false,
    }
  }

  /// How many characters a successful match consumes.
  pub fn width(&self) -> usize {
    match self {
      Self::Literal(_) | Self::Range { .. } | Self::BracketSet(_) | Self::Dot => 1,
      Self::LiteralString(s) => s.len(),
      Self::GroupMarker | Self::Anchor(_) | Self::EndMarker => 0,
    }
  }

  pub fn is_zero_width(&self) -> bool { self.width() == 0 }

  /// Try to match at `pos`, returning the number of characters consumed.
  ///
  /// Zero-width lexicons return `Some(0)` when they hold. The end marker
  /// never matches.
  pub fn match_at(&self, haystack: &[S], pos: usize) -> Option<usize> {
    match self {
      Self::LiteralString(s) => haystack
        .get(pos..)
        .filter(|rest| rest.starts_with(s))
        .map(|_| s.len()),
      Self::GroupMarker => Some(0),
      Self::Anchor(Anchor::Start) => (pos == 0).then_some(0),
      Self::Anchor(Anchor::End) => (pos == haystack.len()).then_some(0),
      Self::EndMarker => None,
      single => haystack
        .get(pos)
        .filter(|c| single.matches(**c))
        .map(|_| 1),
    }
  }
}

impl<S> fmt::Display for Lexicon<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Literal(c) => c.fmt_literal(f),
      Self::Range { lo, hi } => {
        write!(f, "[")?;
        lo.fmt_literal(f)?;
        write!(f, "-")?;
        hi.fmt_literal(f)?;
        write!(f, "]")
      },
      Self::BracketSet(set) => write!(f, "{}", set),
      Self::Dot => write!(f, "."),
      Self::LiteralString(s) => {
        write!(f, "\"")?;
        for c in s.iter() {
          c.fmt_literal(f)?;
        }
        write!(f, "\"")
      },
      Self::GroupMarker => write!(f, "(group)"),
      Self::Anchor(Anchor::Start) => write!(f, "^"),
      Self::Anchor(Anchor::End) => write!(f, "$"),
      Self::EndMarker => write!(f, "(end)"),
    }
  }
}
