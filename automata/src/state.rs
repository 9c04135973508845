/* Description: Numbered automaton states and the automaton that owns them.

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

//! Numbered automaton states and the automaton that owns them.

use core::fmt;

use lexregex_syntax::{cardinality::Cardinality, encoding::Symbol};

use crate::{alloc_types::*, lexicon::Lexicon};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StateId(pub usize);

static_assertions::assert_eq_size!(StateId, usize);

impl fmt::Display for StateId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

/// Packed state flags. The raw bits double as the index into the transition
/// tables.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StateFlags(u8);

bitflags::bitflags! {
  impl StateFlags: u8 {
    const OPTIONAL = 1 << 0;
    const SUBEXPRESSION_MEMBER = 1 << 1;
    const REPEATABLE = 1 << 2;
    /// Only meaningful together with [`Self::SUBEXPRESSION_MEMBER`].
    const ENDS_SUBEXPRESSION = 1 << 3;
    const GROUP_OPEN = 1 << 4;
  }
}

static_assertions::const_assert!(
  StateFlags::all().bits() as usize + 1 == crate::transitions::WEIGHTS
);

impl StateFlags {
  /// Index into the transition tables.
  #[inline(always)]
  pub const fn weight(self) -> usize { self.bits() as usize }
}

impl fmt::Display for StateFlags {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for (flag, c) in [
      (Self::GROUP_OPEN, 'G'),
      (Self::ENDS_SUBEXPRESSION, 'E'),
      (Self::REPEATABLE, 'R'),
      (Self::SUBEXPRESSION_MEMBER, 'S'),
      (Self::OPTIONAL, 'O'),
    ] {
      write!(f, "{}", if self.contains(flag) { c } else { '-' })?;
    }
    Ok(())
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Transition {
  /// No transition: the matcher falls back to the state's fail link.
  Halt,
  Goto(StateId),
}

impl fmt::Display for Transition {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Halt => write!(f, "halt"),
      Self::Goto(id) => write!(f, "{}", id),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State<S> {
  pub id: StateId,
  /// Continuation after this state matches.
  pub on_match_goto: StateId,
  /// Entry of the next alternation branch, or the error sink.
  pub on_fail_goto: StateId,
  /// The group-open state this state belongs to, or the error sink at the
  /// top level.
  pub enclosing_group: StateId,
  /// Continuation after the group this state opens. Every other state points
  /// at the accepting sink.
  pub close_group: StateId,
  pub cardinality: Cardinality,
  pub flags: StateFlags,
  pub lexicon: Lexicon<S>,
  pub primary: Transition,
  pub failed: Transition,
  pub lookahead: Transition,
}

impl<S> State<S> {
  /// Matches required before `failed` may be followed.
  #[inline(always)]
  pub fn min_visits(&self) -> u32 { self.cardinality.min }

  /// `None` means unbounded.
  #[inline(always)]
  pub fn max_visits(&self) -> Option<u32> { self.cardinality.max }
}

impl<S> fmt::Display for State<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let Self {
      id,
      on_match_goto,
      on_fail_goto,
      enclosing_group,
      close_group,
      cardinality,
      flags,
      lexicon,
      primary,
      failed,
      lookahead,
    } = self;
    write!(
      f,
      "{id:>3}: {lexicon}{cardinality} [{flags}] match={on_match_goto} fail={on_fail_goto} \
       group={enclosing_group} close={close_group} | primary={primary} failed={failed} \
       lookahead={lookahead}"
    )
  }
}

/// A compiled pattern.
///
/// States only refer to each other by [`StateId`]. The last two states are
/// the accepting sink and the error sink, whose transitions all loop on
/// themselves.
///
/// A matcher walking this automaton:
/// - starts at state 0, with one capture slot per [`Self::capture_groups`],
/// - at a consuming state, follows `primary` when the lexicon matches and
///   `failed` otherwise, but only follows `failed` once the state has been
///   matched [`State::min_visits`] times,
/// - follows `on_fail_goto` whenever the chosen transition is
///   [`Transition::Halt`],
/// - at a zero-width state, follows `lookahead` when the lexicon holds,
/// - never mutates the automaton, so one automaton may serve many searches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Automaton<S> {
  states: Box<[State<S>]>,
  capture_groups: usize,
  never_matches: bool,
}

impl<S> Automaton<S> {
  pub(crate) fn new(states: Box<[State<S>]>, capture_groups: usize, never_matches: bool) -> Self {
    debug_assert!(states.len() >= 2);
    Self {
      states,
      capture_groups,
      never_matches,
    }
  }

  #[inline(always)]
  pub fn states(&self) -> &[State<S>] { &self.states }

  #[inline(always)]
  pub fn len(&self) -> usize { self.states.len() }

  #[inline(always)]
  pub fn lookup_state(&self, id: StateId) -> &State<S> { &self.states[id.0] }

  #[inline(always)]
  pub fn start_state(&self) -> StateId { StateId(0) }

  #[inline(always)]
  pub fn accept_state(&self) -> StateId { StateId(self.states.len() - 2) }

  #[inline(always)]
  pub fn error_state(&self) -> StateId { StateId(self.states.len() - 1) }

  #[inline(always)]
  pub fn capture_groups(&self) -> usize { self.capture_groups }

  #[inline(always)]
  pub fn never_matches(&self) -> bool { self.never_matches }
}

impl<S> fmt::Display for Automaton<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    writeln!(
      f,
      "automaton: {} states, {} groups{}",
      self.states.len(),
      self.capture_groups,
      if self.never_matches {
        ", never matches"
      } else {
        ""
      }
    )?;
    for state in self.states.iter() {
      writeln!(f, "{}", state)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn flags() {
    let mut flags = StateFlags::OPTIONAL | StateFlags::REPEATABLE;
    assert_eq!(flags.weight(), 5);
    assert!(flags.contains(StateFlags::OPTIONAL));
    assert!(!flags.contains(StateFlags::GROUP_OPEN));
    flags.set(StateFlags::OPTIONAL, false);
    flags.set(StateFlags::GROUP_OPEN, true);
    assert_eq!(flags.bits(), 20);
    assert_eq!(format!("{}", flags), "G-R--");
    assert_eq!(StateFlags::from_bits_truncate(0xFF), StateFlags::all());
    assert_eq!(StateFlags::empty().weight(), 0);
  }

  #[test]
  fn display() {
    let state: State<char> = State {
      id: StateId(0),
      on_match_goto: StateId(1),
      on_fail_goto: StateId(3),
      enclosing_group: StateId(3),
      close_group: StateId(2),
      cardinality: Cardinality::PLUS,
      flags: StateFlags::REPEATABLE,
      lexicon: Lexicon::Literal('a'),
      primary: Transition::Goto(StateId(0)),
      failed: Transition::Goto(StateId(1)),
      lookahead: Transition::Halt,
    };
    assert_eq!(
      format!("{}", state),
      "  0: a+ [--R--] match=1 fail=3 group=3 close=2 | primary=0 failed=1 lookahead=halt"
    );
  }
}
