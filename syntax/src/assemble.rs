/* Description: Build and validate the flat node list in one scan.

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

//! Build and validate the flat node list in one scan.
//!
//! Each character is classified and turned into a node, after any
//! alternation markers placed at its offset by [`crate::scope`] have been
//! emitted. A small token state machine rejects every sequence the grammar
//! forbids, reporting the offset of the offending token.

use smallvec::smallvec;

use crate::{
  alloc_types::*,
  cardinality::parse_counted_repeat,
  charset::parse_bracket,
  classify::{classify, Class, Structural},
  encoding::Symbol,
  error::{ParseError, ParseErrorKind},
  nodes::{Node, NodeIndex, NodeKind, NodeList},
  scope::AlternationScopes,
};

/// What the validator tracks about each emitted token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Token {
  Start,
  Data,
  AnchorStart,
  AnchorEnd,
  GroupOpen,
  GroupClose,
  AlternationStart,
  Bar,
  AlternationEnd,
  Quantifier,
  End,
}

fn admit(prev: Token, next: Token) -> Result<(), ParseErrorKind> {
  use Token::*;
  match (prev, next) {
    (Quantifier, Quantifier) => Err(ParseErrorKind::ConsecutiveCardinalities),
    (Bar, Quantifier) => Err(ParseErrorKind::InvalidDataAfterOr),
    (Start | GroupOpen | AlternationStart | AnchorStart | AnchorEnd, Quantifier) => {
      Err(ParseErrorKind::LeadingCardinality)
    },
    (Start | GroupOpen | AlternationStart | Bar, Bar) => Err(ParseErrorKind::InvalidDataBeforeOr),
    (Bar, GroupClose | AlternationEnd | End) => Err(ParseErrorKind::InvalidDataAfterOr),
    (GroupOpen, GroupClose) => Err(ParseErrorKind::InvalidSubexpression),
    (AnchorEnd, Data | GroupOpen | AnchorStart) => Err(ParseErrorKind::InvalidSubexpression),
    _ => Ok(()),
  }
}

/// Satisfiability of the group body or alternation being assembled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Reach {
  /// The current branch holds a `^` that can never be satisfied.
  branch_dead: bool,
  /// Every branch before the current one was dead. Holds vacuously before
  /// the first bar.
  earlier_dead: bool,
}

impl Reach {
  const LIVE: Self = Self {
    branch_dead: false,
    earlier_dead: true,
  };

  fn bar(&mut self) {
    self.earlier_dead &= self.branch_dead;
    self.branch_dead = false;
  }

  fn is_dead(self) -> bool { self.earlier_dead && self.branch_dead }
}

pub struct Assembler<'a, S> {
  pattern: &'a [S],
  scopes: Option<&'a AlternationScopes>,
  nodes: Vec<Node<S>>,
  groups: Vec<NodeIndex>,
  open_alternations: usize,
  prev: Token,
  /// Whether the most recent atom must consume input before anything after
  /// it can match.
  required_atom_before: bool,
  capture_groups: usize,
  alternations: usize,
  /// One entry per open group or alternation, above the whole pattern.
  reach: Vec<Reach>,
  /// A group that can never match was just closed. It only spoils the
  /// enclosing branch if no optional quantifier follows.
  dead_group: bool,
}

impl<'a, S> Assembler<'a, S>
where S: Symbol
{
  pub fn new(pattern: &'a [S], scopes: Option<&'a AlternationScopes>) -> Self {
    Self {
      pattern,
      scopes,
      nodes: Vec::with_capacity(pattern.len() + 2),
      groups: Vec::new(),
      open_alternations: 0,
      prev: Token::Start,
      required_atom_before: false,
      capture_groups: 0,
      alternations: 0,
      reach: vec![Reach::LIVE],
      dead_group: false,
    }
  }

  fn advance(&mut self, next: Token, at: usize) -> Result<(), ParseError> {
    admit(self.prev, next).map_err(|kind| kind.at(at))?;
    if core::mem::take(&mut self.dead_group) {
      self.kill_branch();
    }
    self.required_atom_before = next == Token::Data;
    self.prev = next;
    Ok(())
  }

  fn kill_branch(&mut self) {
    if let Some(reach) = self.reach.last_mut() {
      reach.branch_dead = true;
    }
  }

  /// Close the innermost group or alternation, returning whether it can
  /// never match. The whole-pattern entry is never popped.
  fn pop_reach(&mut self) -> bool {
    if self.reach.len() > 1 {
      self.reach.pop().is_some_and(Reach::is_dead)
    } else {
      false
    }
  }

  fn push(&mut self, kind: NodeKind<S>, offset: usize, length: usize) -> NodeIndex {
    let index = NodeIndex(self.nodes.len());
    let mut node = Node::new(kind, offset, length);
    node.enclosing_group = self.groups.last().copied();
    trace!("node {}: {}", index, node);
    self.nodes.push(node);
    index
  }

  fn flush_markers(&mut self, at: usize) -> Result<(), ParseError> {
    let Some(scopes) = self.scopes else {
      return Ok(());
    };
    if scopes.ends_at(at) && self.open_alternations > 0 {
      self.advance(Token::AlternationEnd, at)?;
      self.push(NodeKind::AlternationEnd, at, 0);
      self.open_alternations -= 1;
      if self.pop_reach() {
        self.kill_branch();
      }
    }
    if scopes.starts_at(at) {
      self.advance(Token::AlternationStart, at)?;
      self.push(NodeKind::AlternationStart, at, 0);
      self.reach.push(Reach::LIVE);
      self.open_alternations += 1;
      self.alternations += 1;
    }
    Ok(())
  }

  fn quantifier(&mut self, kind: NodeKind<S>, at: usize, width: usize) -> Result<(), ParseError> {
    let after_data = self.prev == Token::Data;
    let min = kind.quantifier().map_or(0, |c| c.min);
    if min == 0 {
      self.dead_group = false;
    }
    self.advance(Token::Quantifier, at)?;
    self.push(kind, at, width);
    self.required_atom_before = after_data && min >= 1;
    Ok(())
  }

  fn atom(&mut self, kind: NodeKind<S>, at: usize, width: usize) -> Result<(), ParseError> {
    self.advance(Token::Data, at)?;
    self.push(kind, at, width);
    Ok(())
  }

  fn structural(&mut self, s: Structural, at: usize) -> Result<usize, ParseError> {
    match s {
      Structural::OpenParen => {
        self.advance(Token::GroupOpen, at)?;
        let open = self.push(NodeKind::GroupOpen, at, 1);
        self.groups.push(open);
        self.reach.push(Reach::LIVE);
        self.capture_groups += 1;
      },
      Structural::CloseParen => {
        if self.groups.is_empty() {
          return Err(ParseErrorKind::UnmatchedClosingParen.at(at));
        }
        self.advance(Token::GroupClose, at)?;
        if let Some(open) = self.groups.pop() {
          self.push(NodeKind::GroupClose { open }, at, 1);
          self.dead_group = self.pop_reach();
        }
      },
      Structural::OpenBracket => {
        let (set, width) = parse_bracket(self.pattern, at)?;
        self.atom(NodeKind::Bracket(set), at, width)?;
        return Ok(width);
      },
      Structural::CloseBracket => return Err(ParseErrorKind::UnmatchedClosingBracket.at(at)),
      Structural::OpenCurly => {
        let (card, width) = parse_counted_repeat(self.pattern, at)?;
        self.quantifier(NodeKind::CountedRepeat(card), at, width)?;
        return Ok(width);
      },
      Structural::CloseCurly => return Err(ParseErrorKind::UnmatchedClosingCurly.at(at)),
      Structural::Dot => self.atom(NodeKind::Dot, at, 1)?,
      Structural::Star => self.quantifier(NodeKind::Star, at, 1)?,
      Structural::Plus => self.quantifier(NodeKind::Plus, at, 1)?,
      Structural::Question => self.quantifier(NodeKind::Question, at, 1)?,
      Structural::Bar => {
        self.advance(Token::Bar, at)?;
        self.push(NodeKind::AlternationBar, at, 1);
        if let Some(reach) = self.reach.last_mut() {
          reach.bar();
        }
      },
      Structural::Caret => {
        let after_required = self.required_atom_before;
        self.advance(Token::AnchorStart, at)?;
        if after_required {
          trace!("start anchor at {} follows a required atom", at);
          self.kill_branch();
        }
        self.push(NodeKind::AnchorStart, at, 1);
      },
      Structural::Dollar => {
        self.advance(Token::AnchorEnd, at)?;
        self.push(NodeKind::AnchorEnd, at, 1);
      },
    }
    Ok(1)
  }

  pub fn assemble(mut self) -> Result<NodeList<S>, ParseError> {
    let len = self.pattern.len();
    let mut i = 0;
    while i < len {
      self.flush_markers(i)?;
      let classified = classify(self.pattern, i)?;
      let width = match classified.class {
        Class::Literal(c) => {
          self.atom(NodeKind::Literal(smallvec![c]), i, classified.width)?;
          classified.width
        },
        Class::Structural(s) => self.structural(s, i)?,
      };
      i += width;
    }
    self.flush_markers(len)?;
    if let Some(open) = self.groups.last() {
      let at = self.nodes[open.0].offset;
      return Err(ParseErrorKind::MissingClosingParen.at(at));
    }
    self.advance(Token::End, len)?;
    let never_matches = self.reach.first().is_some_and(|r| r.is_dead());
    if never_matches {
      debug!("every path through the pattern crosses an unsatisfiable start anchor");
    }
    self.push(NodeKind::Null, len, 0);
    self.push(NodeKind::Null, len, 0);
    debug!(
      "assembled {} nodes: {} groups, {} alternations",
      self.nodes.len(),
      self.capture_groups,
      self.alternations
    );
    Ok(NodeList {
      nodes: self.nodes,
      capture_groups: self.capture_groups,
      never_matches,
      alternations: self.alternations,
    })
  }
}
