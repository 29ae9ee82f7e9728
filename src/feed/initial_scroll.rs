// chat_feed — A terminal chat feed with windowed rendering
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::rows;
use super::virtualizer::VirtualItems;

/// One-shot latch: on the first non-empty visible set, ask for the newest
/// message to be aligned to the bottom edge. Never fires again for the
/// lifetime of the view.
#[derive(Debug, Default)]
pub struct InitialScroll {
    fired: bool,
}

impl InitialScroll {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the logical row to scroll to, at most once.
    pub fn observe(
        &mut self,
        visible: &VirtualItems,
        window_len: usize,
        has_loader_row: bool,
    ) -> Option<usize> {
        if self.fired || visible.is_empty() {
            return None;
        }
        let target = rows::last_message_row(window_len, has_loader_row)?;
        self.fired = true;
        tracing::debug!(target_row = target, "initial scroll to newest message");
        Some(target)
    }
}
