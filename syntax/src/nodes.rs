/* Description: The flat node list every syntax pass reads and rewrites.

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

//! The flat node list every syntax pass reads and rewrites.
//!
//! Nodes never hold references to each other, only [`NodeIndex`] values into
//! the same list.

use core::fmt;

use smallvec::SmallVec;

use crate::{alloc_types::*, cardinality::Cardinality, charset::CharSet, encoding::Symbol};

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct NodeIndex(pub usize);

static_assertions::assert_eq_size!(NodeIndex, usize);

impl fmt::Display for NodeIndex {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind<S> {
  GroupOpen,
  GroupClose { open: NodeIndex },
  AlternationStart,
  AlternationBar,
  AlternationEnd,
  /// One character, or a run of them after coalescing.
  Literal(SmallVec<[S; 4]>),
  Bracket(CharSet<S>),
  Dot,
  AnchorStart,
  AnchorEnd,
  Star,
  Plus,
  Question,
  CountedRepeat(Cardinality),
  /// An alternation of single characters rewritten into one set. The nodes
  /// it replaced are left as [`Self::Inert`].
  CollapsedAlternationStart(CharSet<S>),
  CollapsedAlternationEnd,
  Inert,
  /// Trailing sentinel.
  Null,
}

impl<S> NodeKind<S> {
  /// Whether this node becomes an automaton state.
  pub fn is_state_bearing(&self) -> bool {
    matches!(
      self,
      Self::GroupOpen
        | Self::Literal(_)
        | Self::Bracket(_)
        | Self::Dot
        | Self::AnchorStart
        | Self::AnchorEnd
        | Self::CollapsedAlternationStart(_)
    )
  }

  pub fn quantifier(&self) -> Option<Cardinality> {
    match self {
      Self::Star => Some(Cardinality::STAR),
      Self::Plus => Some(Cardinality::PLUS),
      Self::Question => Some(Cardinality::QUESTION),
      Self::CountedRepeat(c) => Some(*c),
      _ => None,
    }
  }

  /// Whether this node consumes exactly one character per match.
  pub fn is_single_char_atom(&self) -> bool {
    match self {
      Self::Literal(cs) => cs.len() == 1,
      Self::Bracket(_) | Self::Dot | Self::CollapsedAlternationStart(_) => true,
      _ => false,
    }
  }
}

impl<S> fmt::Display for NodeKind<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::GroupOpen => write!(f, "("),
      Self::GroupClose { open } => write!(f, "){}", open),
      Self::AlternationStart => write!(f, "<alt"),
      Self::AlternationBar => write!(f, "|"),
      Self::AlternationEnd => write!(f, "alt>"),
      Self::Literal(cs) => {
        for c in cs.iter() {
          c.fmt_literal(f)?;
        }
        Ok(())
      },
      Self::Bracket(set) | Self::CollapsedAlternationStart(set) => write!(f, "{}", set),
      Self::Dot => write!(f, "."),
      Self::AnchorStart => write!(f, "^"),
      Self::AnchorEnd => write!(f, "$"),
      Self::Star | Self::Plus | Self::Question | Self::CountedRepeat(_) => {
        /* Every quantifier kind has a cardinality. */
        match self.quantifier() {
          Some(c) => write!(f, "{}", c),
          None => Ok(()),
        }
      },
      Self::CollapsedAlternationEnd => write!(f, "set>"),
      Self::Inert => write!(f, "~"),
      Self::Null => write!(f, "null"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node<S> {
  pub kind: NodeKind<S>,
  /// Offset of the first pattern character this node came from.
  pub offset: usize,
  /// Number of pattern characters this node spans.
  pub length: usize,
  /// The node to continue with after this one matches.
  pub next: Option<NodeIndex>,
  /// For group opens, the node to continue with after the whole group.
  pub close: Option<NodeIndex>,
  pub enclosing_group: Option<NodeIndex>,
  /// Whether this is the last state of a group body or of a branch inside
  /// a group.
  pub ends_group: bool,
}

impl<S> Node<S> {
  pub fn new(kind: NodeKind<S>, offset: usize, length: usize) -> Self {
    Self {
      kind,
      offset,
      length,
      next: None,
      close: None,
      enclosing_group: None,
      ends_group: false,
    }
  }
}

fn fmt_link(link: Option<NodeIndex>, f: &mut fmt::Formatter) -> fmt::Result {
  match link {
    Some(i) => write!(f, "{}", i),
    None => write!(f, "-"),
  }
}

impl<S> fmt::Display for Node<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{} @{}+{} next=", self.kind, self.offset, self.length)?;
    fmt_link(self.next, f)?;
    write!(f, " close=")?;
    fmt_link(self.close, f)?;
    write!(f, " group=")?;
    fmt_link(self.enclosing_group, f)?;
    if self.ends_group {
      write!(f, " ends")?;
    }
    Ok(())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeList<S> {
  pub nodes: Vec<Node<S>>,
  pub capture_groups: usize,
  /// Set when the pattern can be proven to never match anything.
  pub never_matches: bool,
  /// Number of alternations found, before any collapsing.
  pub alternations: usize,
}

impl<S> NodeList<S> {
  pub fn state_bearing(&self) -> impl Iterator<Item=(NodeIndex, &Node<S>)>+'_ {
    self
      .nodes
      .iter()
      .enumerate()
      .filter(|(_, n)| n.kind.is_state_bearing())
      .map(|(i, n)| (NodeIndex(i), n))
  }
}

impl<S> fmt::Display for NodeList<S>
where S: Symbol
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for (i, node) in self.nodes.iter().enumerate() {
      writeln!(f, "{}: {}", i, node)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use smallvec::smallvec;

  use super::*;

  #[test]
  fn kinds() {
    let lit: NodeKind<char> = NodeKind::Literal(smallvec!['a', '(']);
    assert!(lit.is_state_bearing());
    assert!(!lit.is_single_char_atom());
    assert_eq!(format!("{}", lit), "a\\(");
    assert!(!NodeKind::<char>::Star.is_state_bearing());
    assert_eq!(
      NodeKind::<char>::Question.quantifier(),
      Some(Cardinality::QUESTION)
    );
    assert_eq!(format!("{}", NodeKind::<u8>::Plus), "+");
  }

  #[test]
  fn node_display() {
    let mut node: Node<char> = Node::new(NodeKind::Dot, 2, 1);
    node.next = Some(NodeIndex(4));
    node.enclosing_group = Some(NodeIndex(0));
    node.ends_group = true;
    assert_eq!(format!("{}", node), ". @2+1 next=#4 close=- group=#0 ends");
  }
}
