/* Description: Constant transition tables indexed by packed state flags.

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

//! Constant transition tables indexed by packed state flags.
//!
//! A state's [`StateFlags`](crate::state::StateFlags) weight selects one [`Target`] from each table:
//! - [`PRIMARY`], taken after the lexicon matches,
//! - [`FAILED`], taken when it does not match,
//! - [`LOOKAHEAD`], taken at zero-width states.
//!
//! The ends-subexpression flag only has an effect together with the
//! subexpression-member flag.

use core::fmt;

use lexregex_syntax::encoding::Symbol;

use crate::state::{State, Transition};

pub const WEIGHTS: usize = 32;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Target {
  SelfLoop,
  Next,
  Parent,
  Close,
  Halt,
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let s = match self {
      Self::SelfLoop => "self",
      Self::Next => "next",
      Self::Parent => "parent",
      Self::Close => "close",
      Self::Halt => "halt",
    };
    write!(f, "{}", s)
  }
}

use Target::{Close as C, Halt as H, Next as N, Parent as P, SelfLoop as L};

/* Weights: 1 optional, 2 subexpression member, 4 repeatable, 8 ends
 * subexpression, 16 group open. */

#[rustfmt::skip]
pub const PRIMARY: [Target; WEIGHTS] = [
  N, N, N, N, L, L, L, L,
  N, N, P, P, L, L, L, L,
  N, N, N, N, N, N, N, N,
  N, N, N, N, N, N, N, N,
];

#[rustfmt::skip]
pub const FAILED: [Target; WEIGHTS] = [
  H, N, H, N, N, N, N, N,
  H, N, H, P, N, N, P, P,
  C, C, C, C, C, C, C, C,
  C, C, C, C, C, C, C, C,
];

#[rustfmt::skip]
pub const LOOKAHEAD: [Target; WEIGHTS] = [
  N, N, N, N, N, N, N, N,
  N, N, P, P, N, N, P, P,
  N, C, N, C, N, C, N, C,
  N, C, N, C, N, C, N, C,
];

static_assertions::const_assert_eq!(PRIMARY.len(), WEIGHTS);
static_assertions::const_assert_eq!(FAILED.len(), WEIGHTS);
static_assertions::const_assert_eq!(LOOKAHEAD.len(), WEIGHTS);

impl<S> State<S> {
  fn resolve(&self, target: Target) -> Transition {
    match target {
      Target::SelfLoop => Transition::Goto(self.id),
      Target::Next => Transition::Goto(self.on_match_goto),
      Target::Parent => Transition::Goto(self.enclosing_group),
      Target::Close => Transition::Goto(self.close_group),
      Target::Halt => Transition::Halt,
    }
  }
}

/// Fill in the transitions of every state. The last two states are sinks and
/// loop on themselves.
pub fn compile<S>(states: &mut [State<S>])
where S: Symbol {
  let sinks = states.len().saturating_sub(2);
  for (i, state) in states.iter_mut().enumerate() {
    if i >= sinks {
      let here = Transition::Goto(state.id);
      state.primary = here;
      state.failed = here;
      state.lookahead = here;
      continue;
    }
    let w = state.flags.weight();
    state.primary = state.resolve(PRIMARY[w]);
    state.failed = state.resolve(FAILED[w]);
    state.lookahead = state.resolve(LOOKAHEAD[w]);
    trace!(
      "state {} [{}]: primary={} failed={} lookahead={}",
      state.id,
      state.flags,
      state.primary,
      state.failed,
      state.lookahead
    );
  }
}

#[cfg(test)]
mod test {
  use lexregex_syntax::cardinality::Cardinality;

  use super::*;
  use crate::{
    lexicon::Lexicon,
    state::{StateFlags, StateId},
  };

  fn has(w: usize, flag: StateFlags) -> bool {
    StateFlags::from_bits_truncate(w as u8).contains(flag)
  }

  fn ends(w: usize) -> bool {
    has(w, StateFlags::ENDS_SUBEXPRESSION) && has(w, StateFlags::SUBEXPRESSION_MEMBER)
  }

  fn primary_rule(w: usize) -> Target {
    if has(w, StateFlags::GROUP_OPEN) {
      Target::Next
    } else if has(w, StateFlags::REPEATABLE) {
      Target::SelfLoop
    } else if ends(w) {
      Target::Parent
    } else {
      Target::Next
    }
  }

  fn failed_rule(w: usize) -> Target {
    if has(w, StateFlags::GROUP_OPEN) {
      Target::Close
    } else if has(w, StateFlags::OPTIONAL) || has(w, StateFlags::REPEATABLE) {
      if ends(w) {
        Target::Parent
      } else {
        Target::Next
      }
    } else {
      Target::Halt
    }
  }

  fn lookahead_rule(w: usize) -> Target {
    if has(w, StateFlags::GROUP_OPEN) {
      if has(w, StateFlags::OPTIONAL) {
        Target::Close
      } else {
        Target::Next
      }
    } else if ends(w) {
      Target::Parent
    } else {
      Target::Next
    }
  }

  #[test]
  fn tables_follow_flag_rules() {
    for w in 0..WEIGHTS {
      assert_eq!(PRIMARY[w], primary_rule(w), "primary at {}", w);
      assert_eq!(FAILED[w], failed_rule(w), "failed at {}", w);
      assert_eq!(LOOKAHEAD[w], lookahead_rule(w), "lookahead at {}", w);
    }
  }

  fn state(id: usize, flags: StateFlags) -> State<char> {
    State {
      id: StateId(id),
      on_match_goto: StateId(id + 1),
      on_fail_goto: StateId(9),
      enclosing_group: StateId(0),
      close_group: StateId(7),
      cardinality: Cardinality::ONCE,
      flags,
      lexicon: Lexicon::Literal('a'),
      primary: Transition::Halt,
      failed: Transition::Halt,
      lookahead: Transition::Halt,
    }
  }

  #[test]
  fn resolves_targets() {
    let mut states = vec![
      state(0, StateFlags::GROUP_OPEN | StateFlags::OPTIONAL),
      state(
        1,
        StateFlags::SUBEXPRESSION_MEMBER | StateFlags::ENDS_SUBEXPRESSION,
      ),
      state(2, StateFlags::REPEATABLE),
      state(3, StateFlags::empty()),
      state(4, StateFlags::empty()),
    ];
    compile(&mut states);
    assert_eq!(states[0].primary, Transition::Goto(StateId(1)));
    assert_eq!(states[0].failed, Transition::Goto(StateId(7)));
    assert_eq!(states[0].lookahead, Transition::Goto(StateId(7)));
    assert_eq!(states[1].primary, Transition::Goto(StateId(0)));
    assert_eq!(states[1].failed, Transition::Halt);
    assert_eq!(states[2].primary, Transition::Goto(StateId(2)));
    assert_eq!(states[2].failed, Transition::Goto(StateId(3)));
    for sink in &states[3..] {
      assert_eq!(sink.primary, Transition::Goto(sink.id));
      assert_eq!(sink.failed, Transition::Goto(sink.id));
      assert_eq!(sink.lookahead, Transition::Goto(sink.id));
    }
  }
}
