/* Description: Knobs for the optional syntax rewrites.

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

//! Knobs for the optional syntax rewrites.

/// Unset fields take their default when read through the `get_*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
  collapse_alternations: Option<bool>,
  coalesce_literals: Option<bool>,
}

impl Config {
  pub fn new() -> Self { Self::default() }

  /// Rewrite alternations of single characters into one bracket set.
  ///
  /// Enabled by default.
  pub fn collapse_alternations(mut self, yes: bool) -> Self {
    self.collapse_alternations = Some(yes);
    self
  }

  /// Merge runs of unquantified literals into literal strings.
  ///
  /// Enabled by default.
  pub fn coalesce_literals(mut self, yes: bool) -> Self {
    self.coalesce_literals = Some(yes);
    self
  }

  pub fn get_collapse_alternations(&self) -> bool { self.collapse_alternations.unwrap_or(true) }

  pub fn get_coalesce_literals(&self) -> bool { self.coalesce_literals.unwrap_or(true) }

  /// Fields set in `o` win over fields set in `self`.
  pub fn overwrite(self, o: Self) -> Self {
    Self {
      collapse_alternations: o.collapse_alternations.or(self.collapse_alternations),
      coalesce_literals: o.coalesce_literals.or(self.coalesce_literals),
    }
  }
}
