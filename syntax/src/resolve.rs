/* Description: Link every state-bearing node to its continuation.

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

//! Link every state-bearing node to its continuation.
//!
//! One backward scan carries the node that follows the current position.
//! Crossing a group close remembers the continuation after that group, and
//! crossing an alternation end remembers the continuation after the
//! alternation, so that each branch can resume from there when its bar is
//! crossed. `None` continues to the accepting state.

use crate::{
  alloc_types::*,
  encoding::Symbol,
  nodes::{Node, NodeIndex, NodeKind},
};

pub fn resolve<S>(nodes: &mut [Node<S>])
where S: Symbol {
  let mut follow: Option<NodeIndex> = None;
  /* Continuation after each group we are inside of. */
  let mut closes: Vec<Option<NodeIndex>> = Vec::new();
  /* Whether the next state found is the last one of its group body or
   * branch. The bottom entry is the top level, which never ends a group. */
  let mut tails: Vec<bool> = vec![false];
  /* Continuation after each alternation we are inside of. */
  let mut gamma: Vec<Option<NodeIndex>> = Vec::new();

  for i in (0..nodes.len()).rev() {
    let node = &mut nodes[i];
    match node.kind {
      NodeKind::GroupClose { .. } => {
        closes.push(follow);
        tails.push(true);
        continue;
      },
      NodeKind::AlternationEnd => {
        gamma.push(follow);
        continue;
      },
      NodeKind::AlternationBar => {
        follow = gamma.last().copied().flatten();
        let depth = tails.len();
        if depth > 1 {
          tails[depth - 1] = true;
        }
        continue;
      },
      NodeKind::AlternationStart => {
        gamma.pop();
        continue;
      },
      NodeKind::GroupOpen => {
        node.close = closes.pop().flatten();
        tails.pop();
      },
      _ if node.kind.is_state_bearing() => (),
      _ => continue,
    }
    node.next = follow;
    if let Some(t) = tails.last_mut() {
      if *t {
        node.ends_group = true;
        *t = false;
      }
    }
    trace!("resolved {}: {}", i, node);
    follow = Some(NodeIndex(i));
  }
}
