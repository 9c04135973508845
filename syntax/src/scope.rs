/* Description: Locate where each alternation begins and ends.

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

//! Locate where each alternation begins and ends.
//!
//! An alternation spans the whole body of the group containing its bars, or
//! the whole pattern for bars outside any group. A backward sweep counts bars
//! per nesting depth to find the starts, and a forward sweep does the same to
//! find the ends. Malformed input is tolerated here: the assembler reports
//! the errors.

use crate::{
  alloc_types::*,
  charset::bracket_extent,
  classify::{Structural, ESCAPE},
  encoding::Symbol,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Event {
  Open,
  Close,
  Bar,
}

/// Marker tables indexed by pattern offset, with one extra slot for the end
/// of the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternationScopes {
  /// An alternation starts right before the character at this offset.
  pub starts: Vec<bool>,
  /// An alternation ends right before the character at this offset.
  pub ends: Vec<bool>,
}

impl AlternationScopes {
  /// Returns `None` when the pattern has no alternation at all.
  pub fn analyze<S>(pattern: &[S]) -> Option<Self>
  where S: Symbol {
    let events = Self::events(pattern);
    if !events.iter().any(|(_, e)| *e == Event::Bar) {
      return None;
    }
    let len = pattern.len();
    let mut scopes = Self {
      starts: vec![false; len + 1],
      ends: vec![false; len + 1],
    };

    let mut bars: Vec<usize> = vec![0];
    for &(pos, event) in events.iter().rev() {
      match event {
        Event::Close => bars.push(0),
        Event::Bar => {
          if let Some(n) = bars.last_mut() {
            *n += 1;
          }
        },
        Event::Open => {
          if bars.len() > 1 && bars.pop().is_some_and(|n| n > 0) {
            scopes.starts[pos + 1] = true;
          }
        },
      }
    }
    if bars[0] > 0 {
      scopes.starts[0] = true;
    }

    let mut bars: Vec<usize> = vec![0];
    for &(pos, event) in events.iter() {
      match event {
        Event::Open => bars.push(0),
        Event::Bar => {
          if let Some(n) = bars.last_mut() {
            *n += 1;
          }
        },
        Event::Close => {
          if bars.len() > 1 && bars.pop().is_some_and(|n| n > 0) {
            scopes.ends[pos] = true;
          }
        },
      }
    }
    if bars[0] > 0 {
      scopes.ends[len] = true;
    }

    trace!(
      "alternation scopes: {} starts, {} ends",
      scopes.starts.iter().filter(|s| **s).count(),
      scopes.ends.iter().filter(|e| **e).count()
    );
    Some(scopes)
  }

  fn events<S>(pattern: &[S]) -> Vec<(usize, Event)>
  where S: Symbol {
    let mut events = Vec::new();
    let mut i = 0;
    while let Some(c) = pattern.get(i) {
      let c = c.code_point();
      if c == ESCAPE {
        i += 2;
        continue;
      }
      match Structural::from_code_point(c) {
        Some(Structural::OpenBracket) => match bracket_extent(pattern, i) {
          Some(width) => {
            i += width;
            continue;
          },
          /* Everything after an unclosed bracket belongs to it. */
          None => break,
        },
        Some(Structural::OpenParen) => events.push((i, Event::Open)),
        Some(Structural::CloseParen) => events.push((i, Event::Close)),
        Some(Structural::Bar) => events.push((i, Event::Bar)),
        _ => (),
      }
      i += 1;
    }
    events
  }

  #[inline]
  pub fn starts_at(&self, at: usize) -> bool { self.starts.get(at).copied().unwrap_or(false) }

  #[inline]
  pub fn ends_at(&self, at: usize) -> bool { self.ends.get(at).copied().unwrap_or(false) }
}

#[cfg(test)]
mod test {
  use super::*;

  fn scopes(s: &str) -> Option<(Vec<usize>, Vec<usize>)> {
    let chars: Vec<char> = s.chars().collect();
    AlternationScopes::analyze(&chars).map(|a| {
      let marked = |v: &[bool]| {
        v.iter()
          .enumerate()
          .filter(|(_, b)| **b)
          .map(|(i, _)| i)
          .collect::<Vec<_>>()
      };
      (marked(&a.starts), marked(&a.ends))
    })
  }

  #[test]
  fn no_alternation() {
    assert_eq!(scopes("abc"), None);
    assert_eq!(scopes("[a|b]"), None);
    assert_eq!(scopes("a\\|b"), None);
  }

  #[test]
  fn top_level() {
    assert_eq!(scopes("a|b"), Some((vec![0], vec![3])));
    assert_eq!(scopes("(x)a|b"), Some((vec![0], vec![6])));
  }

  #[test]
  fn grouped() {
    assert_eq!(scopes("(ab|cd)ef"), Some((vec![1], vec![6])));
    assert_eq!(scopes("(a(b|c)|d)"), Some((vec![1, 3], vec![6, 9])));
    assert_eq!(scopes("(a(b)|c)"), Some((vec![1], vec![7])));
  }

  #[test]
  fn tolerates_malformed() {
    assert_eq!(scopes("a|[b"), Some((vec![0], vec![4])));
    assert!(scopes("a|b)").is_some());
    assert!(scopes("(a|b").is_some());
  }
}
