/* Description: Table-driven automaton states compiled from regexp node lists.

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

//! Table-driven automaton states compiled from regexp node lists.
//!
//! [`builder::build`] numbers the state-bearing nodes of a resolved
//! [`lexregex_syntax::nodes::NodeList`], wires up their links, and fills in
//! each state's transitions from the constant tables in [`transitions`].

#![warn(rustdoc::missing_crate_level_docs)]
// #![warn(missing_docs)]
#![deny(unsafe_code)]
/* Ensure any doctest warnings fails the doctest! */
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[allow(unused_imports)]
mod alloc_types {
  /* no_std is enabled except for test environments, so we need to use the
   * special imports from the extern alloc crate. */
  cfg_if::cfg_if! {
    if #[cfg(test)] {
      pub use std::{boxed::Box, vec, vec::Vec};
    } else {
      pub use ::alloc::{boxed::Box, vec, vec::Vec};
    }
  }
}

#[macro_use]
mod macros;

pub mod builder;
pub mod lexicon;
pub mod state;
pub mod transitions;

pub use builder::build;
pub use lexicon::{Anchor, Lexicon};
pub use state::{Automaton, State, StateFlags, StateId, Transition};
