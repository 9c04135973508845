/* Description: Number the state-bearing nodes and wire up their links.

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

//! Number the state-bearing nodes and wire up their links.

use lexregex_syntax::{
  cardinality::Cardinality,
  encoding::Symbol,
  nodes::{NodeIndex, NodeKind, NodeList},
};

use crate::{
  alloc_types::*,
  lexicon::Lexicon,
  state::{Automaton, State, StateFlags, StateId, Transition},
  transitions,
};

/// Fail-link bookkeeping for one alternation.
#[derive(Debug, Default)]
struct Book {
  /// States of the current branch.
  pending: Vec<StateId>,
  /// States of the previous branch, waiting for the next branch's entry.
  awaiting: Vec<StateId>,
}

struct Draft<S> {
  lexicon: Lexicon<S>,
  cardinality: Cardinality,
  enclosing: Option<StateId>,
  fail: Option<StateId>,
  next: Option<NodeIndex>,
  close: Option<NodeIndex>,
  ends_group: bool,
  opens_group: bool,
}

/// Build the automaton for a resolved node list. Any node list produced by
/// [`lexregex_syntax::parse`] is accepted.
pub fn build<S>(list: NodeList<S>) -> Automaton<S>
where S: Symbol {
  let NodeList {
    nodes,
    capture_groups,
    never_matches,
    ..
  } = list;

  let mut node_states: Vec<Option<StateId>> = vec![None; nodes.len()];
  let mut drafts: Vec<Draft<S>> = Vec::new();
  let mut groups: Vec<StateId> = Vec::new();
  let mut books: Vec<Book> = Vec::new();
  let mut last_atom: Option<StateId> = None;

  for (i, node) in nodes.iter().enumerate() {
    if let Some(lexicon) = Lexicon::for_node_kind(&node.kind) {
      let id = StateId(drafts.len());
      node_states[i] = Some(id);
      for book in books.iter_mut() {
        for waiting in book.awaiting.drain(..) {
          drafts[waiting.0].fail = Some(id);
        }
      }
      if let Some(book) = books.last_mut() {
        book.pending.push(id);
      }
      let opens_group = matches!(node.kind, NodeKind::GroupOpen);
      drafts.push(Draft {
        lexicon,
        cardinality: Cardinality::ONCE,
        enclosing: groups.last().copied(),
        fail: None,
        next: node.next,
        close: node.close,
        ends_group: node.ends_group,
        opens_group,
      });
      if opens_group {
        groups.push(id);
      }
      last_atom = Some(id);
      continue;
    }
    if let Some(card) = node.kind.quantifier() {
      if let Some(atom) = last_atom {
        drafts[atom.0].cardinality = card;
      }
      continue;
    }
    match node.kind {
      NodeKind::GroupClose { .. } => {
        last_atom = groups.pop();
      },
      NodeKind::AlternationStart => books.push(Book::default()),
      NodeKind::AlternationBar => {
        if let Some(book) = books.last_mut() {
          let pending = core::mem::take(&mut book.pending);
          book.awaiting.extend(pending);
        }
      },
      NodeKind::AlternationEnd => {
        /* The last branch falls back to wherever the enclosing alternation's
         * branch falls back to. */
        if let Some(done) = books.pop() {
          if let Some(outer) = books.last_mut() {
            outer.pending.extend(done.pending);
          }
        }
      },
      _ => (),
    }
  }

  let n = drafts.len();
  let accept = StateId(n);
  let error = StateId(n + 1);
  let state_for = |i: Option<NodeIndex>| i.and_then(|i| node_states[i.0]);

  let mut states: Vec<State<S>> = drafts
    .into_iter()
    .enumerate()
    .map(|(i, d)| {
      let mut flags = StateFlags::empty();
      flags.set(StateFlags::OPTIONAL, d.cardinality.is_optional());
      flags.set(StateFlags::REPEATABLE, d.cardinality.is_repeatable());
      flags.set(StateFlags::SUBEXPRESSION_MEMBER, d.enclosing.is_some());
      flags.set(StateFlags::ENDS_SUBEXPRESSION, d.ends_group);
      flags.set(StateFlags::GROUP_OPEN, d.opens_group);
      let close_group = if d.opens_group {
        state_for(d.close).unwrap_or(accept)
      } else {
        accept
      };
      State {
        id: StateId(i),
        on_match_goto: state_for(d.next).unwrap_or(accept),
        on_fail_goto: d.fail.unwrap_or(error),
        enclosing_group: d.enclosing.unwrap_or(error),
        close_group,
        cardinality: d.cardinality,
        flags,
        lexicon: d.lexicon,
        primary: Transition::Halt,
        failed: Transition::Halt,
        lookahead: Transition::Halt,
      }
    })
    .collect();

  for id in [accept, error] {
    states.push(State {
      id,
      on_match_goto: id,
      on_fail_goto: id,
      enclosing_group: id,
      close_group: id,
      cardinality: Cardinality::ONCE,
      flags: StateFlags::empty(),
      lexicon: Lexicon::EndMarker,
      primary: Transition::Halt,
      failed: Transition::Halt,
      lookahead: Transition::Halt,
    });
  }

  transitions::compile(&mut states);
  debug!(
    "built {} states ({} groups) from {} nodes",
    states.len(),
    capture_groups,
    nodes.len()
  );
  Automaton::new(states.into_boxed_slice(), capture_groups, never_matches)
}
