/* Description: Rewrites that shrink the node list without changing what it matches.

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

//! Rewrites that shrink the node list without changing what it matches.
//!
//! Neither pass removes nodes: replaced nodes become [`NodeKind::Inert`], so
//! every [`crate::nodes::NodeIndex`] stays valid.

use crate::{
  alloc_types::*,
  charset::{member_set, CharRange, CharSet},
  encoding::Symbol,
  nodes::{Node, NodeKind},
};

/// Union of every branch, if each branch is exactly one single-character
/// atom.
fn collapsible<S>(region: &[Node<S>]) -> Option<CharSet<S>>
where S: Symbol {
  if region.len() % 2 == 0 {
    return None;
  }
  let mut members = member_set();
  let mut any = false;
  for (i, node) in region.iter().enumerate() {
    if i % 2 == 1 {
      if !matches!(node.kind, NodeKind::AlternationBar) {
        return None;
      }
      continue;
    }
    match &node.kind {
      NodeKind::Literal(cs) if cs.len() == 1 => {
        members.insert(CharRange::single(cs[0]));
      },
      NodeKind::Bracket(set) if !set.negated => {
        members.extend(set.members.iter().copied());
      },
      NodeKind::Dot => {
        any = true;
      },
      _ => return None,
    }
  }
  Some(if any {
    CharSet::any()
  } else {
    CharSet::from_members(members)
  })
}

/// Replace each alternation whose branches are all single characters with
/// one set. Returns how many were replaced.
pub fn collapse_alternations<S>(nodes: &mut [Node<S>]) -> usize
where S: Symbol {
  let mut starts: Vec<usize> = Vec::new();
  let mut collapsed = 0;
  for end in 0..nodes.len() {
    match nodes[end].kind {
      NodeKind::AlternationStart => starts.push(end),
      NodeKind::AlternationEnd => {
        let Some(start) = starts.pop() else {
          continue;
        };
        let Some(set) = collapsible(&nodes[start + 1..end]) else {
          continue;
        };
        trace!("collapsing alternation {}..{} into {}", start, end, set);
        nodes[start].length = nodes[end].offset - nodes[start].offset;
        nodes[start].kind = NodeKind::CollapsedAlternationStart(set);
        for node in nodes[start + 1..end].iter_mut() {
          node.kind = NodeKind::Inert;
        }
        nodes[end].kind = NodeKind::CollapsedAlternationEnd;
        collapsed += 1;
      },
      _ => (),
    }
  }
  collapsed
}

/// Merge runs of single-character literals into the first literal of each
/// run. A literal followed by a quantifier is left alone, since the
/// quantifier applies to it only. Returns how many nodes were absorbed.
pub fn coalesce_literals<S>(nodes: &mut [Node<S>]) -> usize
where S: Symbol {
  let mut head: Option<usize> = None;
  let mut merged = 0;
  for i in 0..nodes.len() {
    let single = match &nodes[i].kind {
      NodeKind::Literal(cs) if cs.len() == 1 => Some(cs[0]),
      _ => None,
    };
    let quantified = nodes
      .get(i + 1)
      .is_some_and(|n| n.kind.quantifier().is_some());
    let Some(c) = single.filter(|_| !quantified) else {
      head = None;
      continue;
    };
    let Some(h) = head else {
      head = Some(i);
      continue;
    };
    let end = nodes[i].offset + nodes[i].length;
    let head_node = &mut nodes[h];
    if let NodeKind::Literal(cs) = &mut head_node.kind {
      cs.push(c);
    }
    head_node.length = end - head_node.offset;
    nodes[i].kind = NodeKind::Inert;
    merged += 1;
  }
  merged
}

#[cfg(test)]
mod test {
  use proptest::prelude::*;
  use smallvec::smallvec;

  use super::*;
  use crate::{assemble::Assembler, charset::CharRange, nodes::NodeList, scope::AlternationScopes};

  fn assemble(s: &str) -> NodeList<char> {
    let chars: Vec<char> = s.chars().collect();
    let scopes = AlternationScopes::analyze(&chars);
    Assembler::new(&chars, scopes.as_ref()).assemble().unwrap()
  }

  fn kinds(list: &NodeList<char>) -> Vec<String> {
    list.nodes.iter().map(|n| format!("{}", n.kind)).collect()
  }

  #[test]
  fn collapses_single_chars() {
    let mut list = assemble("(a|b|[c-d])x");
    assert_eq!(collapse_alternations(&mut list.nodes), 1);
    assert_eq!(kinds(&list), vec![
      "(", "[abc-d]", "~", "~", "~", "~", "~", "set>", ")#0", "x", "null", "null"
    ]);
    assert_eq!(list.nodes[1].offset, 1);
    assert_eq!(list.nodes[1].length, 9);
  }

  #[test]
  fn top_level_and_dot() {
    let mut list = assemble("a|.");
    assert_eq!(collapse_alternations(&mut list.nodes), 1);
    assert_eq!(
      list.nodes[0].kind,
      NodeKind::CollapsedAlternationStart(CharSet::any())
    );
    assert_eq!(list.nodes[0].length, 3);
  }

  #[test]
  fn leaves_complex_branches() {
    for p in ["(a|bc)", "(a|b*)", "(a|[^b])", "(a|(b))", "(a|^)"] {
      let mut list = assemble(p);
      let before = list.clone();
      assert_eq!(collapse_alternations(&mut list.nodes), 0, "{}", p);
      assert_eq!(list, before);
    }
  }

  #[test]
  fn nested() {
    let mut list = assemble("(x|(b|c))");
    assert_eq!(collapse_alternations(&mut list.nodes), 1);
    assert!(matches!(
      list.nodes[5].kind,
      NodeKind::CollapsedAlternationStart(_)
    ));
    assert_eq!(list.nodes[1].kind, NodeKind::AlternationStart);
  }

  #[test]
  fn coalesce() {
    let mut list = assemble("abc*de(fg)");
    assert_eq!(coalesce_literals(&mut list.nodes), 3);
    assert_eq!(list.nodes[0].kind, NodeKind::Literal(smallvec!['a', 'b']));
    assert_eq!(list.nodes[0].length, 2);
    assert_eq!(list.nodes[1].kind, NodeKind::Inert);
    assert_eq!(list.nodes[2].kind, NodeKind::Literal(smallvec!['c']));
    assert_eq!(list.nodes[4].kind, NodeKind::Literal(smallvec!['d', 'e']));
    assert_eq!(list.nodes[7].kind, NodeKind::Literal(smallvec!['f', 'g']));
  }

  #[test]
  fn coalesce_escapes() {
    let mut list = assemble("a\\x42c");
    assert_eq!(coalesce_literals(&mut list.nodes), 2);
    assert_eq!(
      list.nodes[0].kind,
      NodeKind::Literal(smallvec!['a', 'B', 'c'])
    );
    assert_eq!(list.nodes[0].length, 6);
  }

  #[derive(Debug, Clone)]
  enum Branch {
    Lit(char),
    Range(char, char),
    Dot,
  }

  impl Branch {
    fn matches(&self, c: char) -> bool {
      match *self {
        Self::Lit(l) => l == c,
        Self::Range(lo, hi) => CharRange { lo, hi }.contains(c),
        Self::Dot => true,
      }
    }

    fn pattern(&self) -> String {
      match *self {
        Self::Lit(l) => l.to_string(),
        Self::Range(lo, hi) => format!("[{}-{}]", lo, hi),
        Self::Dot => ".".to_string(),
      }
    }
  }

  fn branch() -> impl Strategy<Value=Branch> {
    prop_oneof![
      4 => proptest::char::range('a', 'z').prop_map(Branch::Lit),
      2 => (proptest::char::range('a', 'z'), 0u32..5).prop_map(|(lo, d)| {
        let hi = char::from_u32((lo as u32 + d).min('z' as u32)).unwrap();
        Branch::Range(lo, hi)
      }),
      1 => Just(Branch::Dot),
    ]
  }

  proptest! {
    #[test]
    fn collapsed_set_matches_same_chars(branches in prop::collection::vec(branch(), 2..6)) {
      let body: Vec<String> = branches.iter().map(Branch::pattern).collect();
      let p = format!("({})", body.join("|"));
      let mut list = assemble(&p);
      prop_assert_eq!(collapse_alternations(&mut list.nodes), 1);
      let NodeKind::CollapsedAlternationStart(set) = &list.nodes[1].kind else {
        panic!("expected a collapsed alternation in {}", p);
      };
      for c in ('a'..='z').chain(['0', '\n']) {
        prop_assert_eq!(set.contains(c), branches.iter().any(|b| b.matches(c)));
      }
    }
  }
}
