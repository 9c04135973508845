/* Description: End-to-end compilation of patterns through the public API.

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

use lexregex::{
  ByteEncoding, Lexicon, ParseErrorKind, Pattern, RegexpError, StateFlags, UnicodeEncoding,
};
use proptest::prelude::*;

fn wide(p: &str) -> Result<Pattern<UnicodeEncoding>, RegexpError> {
  Pattern::<UnicodeEncoding>::compile_str(p)
}

fn error(p: &str) -> (ParseErrorKind, usize) {
  match wide(p) {
    Err(RegexpError::ParseError(e)) => (e.kind, e.at),
    Ok(_) => panic!("{:?} should not compile", p),
  }
}

#[test]
fn error_offsets() {
  assert_eq!(error("(a"), (ParseErrorKind::MissingClosingParen, 0));
  assert_eq!(error("a)"), (ParseErrorKind::UnmatchedClosingParen, 1));
  assert_eq!(error("[abc"), (ParseErrorKind::MissingClosingBracket, 0));
  assert_eq!(error("a{2,"), (ParseErrorKind::MissingClosingCurlyBrace, 1));
  assert_eq!(error("*a"), (ParseErrorKind::LeadingCardinality, 0));
  assert_eq!(error("a**"), (ParseErrorKind::ConsecutiveCardinalities, 2));
  assert_eq!(error("a|*b"), (ParseErrorKind::InvalidDataAfterOr, 2));
  assert_eq!(error("a{3,1}"), (ParseErrorKind::InvalidCardinalityRange, 1));
  assert_eq!(error("ab\\"), (ParseErrorKind::MissingEscapeSequence, 2));
  assert_eq!(error("\\x4"), (ParseErrorKind::InsufficientHex8Data, 0));
  assert_eq!(error("\\u12"), (ParseErrorKind::InsufficientHex16Data, 0));
  assert_eq!(error("\\xZZ"), (ParseErrorKind::InvalidHexNibble, 2));
  assert_eq!(error("a{x}"), (ParseErrorKind::InvalidDecimalDigit, 2));
  assert_eq!(error("[z-a]"), (ParseErrorKind::InvalidCharacterRange, 1));
}

#[test]
fn grouped_alternation_structure() {
  let p = wide("(ab|cd)ef").unwrap();
  assert_eq!(p.capture_groups(), 1);
  assert!(!p.never_matches());

  let states = p.states();
  let groups: Vec<_> = states
    .iter()
    .filter(|s| s.flags.contains(StateFlags::GROUP_OPEN))
    .collect();
  assert_eq!(groups.len(), 1);
  let group = groups[0];
  let ef = &states[group.close_group.0];
  assert_eq!(
    ef.lexicon,
    Lexicon::LiteralString(vec!['e', 'f'].into_boxed_slice())
  );

  let branches: Vec<_> = states
    .iter()
    .filter(|s| s.enclosing_group == group.id)
    .collect();
  assert_eq!(branches.len(), 2);
  assert_eq!(branches[0].on_fail_goto, branches[1].id);
  for b in branches {
    assert_eq!(b.on_match_goto, ef.id);
    assert!(b.flags.contains(StateFlags::ENDS_SUBEXPRESSION));
  }
}

#[test]
fn narrow_and_wide_agree() {
  for p in ["(ab|cd)ef", "a+b?c*", "^[a-c]{2,3}$", "x(y|z)+", "."] {
    let narrow = Pattern::<ByteEncoding>::compile_bytes(p.as_bytes()).unwrap();
    let wide = wide(p).unwrap();
    assert_eq!(narrow.states().len(), wide.states().len(), "{}", p);
    for (n, w) in narrow.states().iter().zip(wide.states()) {
      assert_eq!(n.flags, w.flags, "{}", p);
      assert_eq!(n.on_match_goto, w.on_match_goto, "{}", p);
      assert_eq!(n.on_fail_goto, w.on_fail_goto, "{}", p);
      assert_eq!(n.primary, w.primary, "{}", p);
    }
  }
}

#[test]
fn unsatisfiable_anchors() {
  for p in ["a^", "a^|b^", "(x^|y^)z", "(a^)+"] {
    assert!(wide(p).unwrap().never_matches(), "{}", p);
  }
  for p in ["^a", "ab|c^", "x|y^", "(a^|b)", "(a^)?b"] {
    assert!(!wide(p).unwrap().never_matches(), "{}", p);
  }
  let narrow = Pattern::<ByteEncoding>::compile_bytes(b"ab|c^").unwrap();
  assert!(!narrow.never_matches());
}

fn structural_soup() -> impl Strategy<Value=String> {
  prop::collection::vec(
    prop::sample::select(vec![
      'a', 'b', '(', ')', '[', ']', '{', '}', ',', '1', '2', '.', '*', '+', '?', '|', '^', '$',
      '\\', '-', 'x',
    ]),
    0..16,
  )
  .prop_map(|cs| cs.into_iter().collect())
}

proptest! {
  #[test]
  fn compilation_is_deterministic(p in structural_soup()) {
    let first = wide(&p);
    let second = wide(&p);
    prop_assert_eq!(first, second);
  }

  #[test]
  fn inverted_counts_are_rejected(min in 1u32..500, below in 1u32..500) {
    let max = min - below.min(min);
    let p = format!("a{{{},{}}}", min, max);
    prop_assert_eq!(error(&p), (ParseErrorKind::InvalidCardinalityRange, 1));
  }

  #[test]
  fn valid_groups_are_closed(depth in 1usize..6, branches in 1usize..4) {
    let body: Vec<String> = (0..branches).map(|i| format!("b{}", i)).collect();
    let mut p = body.join("|");
    for _ in 0..depth {
      p = format!("({})", p);
    }
    let compiled = wide(&p).unwrap();
    prop_assert_eq!(compiled.capture_groups(), depth);
    for s in compiled.states() {
      if s.flags.contains(StateFlags::GROUP_OPEN) {
        prop_assert!(s.close_group > s.id);
      }
    }
  }
}
