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

//! Logical row mapping between the windowing engine and the loaded window.
//!
//! When more history is available, a synthetic loader row sits at logical
//! index 0 and shifts every message row down by one. Everything here is pure.

use super::store::Message;

/// What a logical row should render as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContent<'a> {
    Loader,
    Message(&'a Message),
    /// Index/window mismatch. Rendered as nothing; the next recompute fixes it.
    Empty,
}

/// Stable identity of a row across pagination. Logical indices shift when
/// a page is prepended; store positions never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Loader,
    Message(usize),
}

#[must_use]
pub fn row_count(window_len: usize, has_loader_row: bool) -> usize {
    window_len + usize::from(has_loader_row)
}

#[must_use]
pub fn resolve(logical_index: usize, has_loader_row: bool, window: &[Message]) -> RowContent<'_> {
    if has_loader_row && logical_index == 0 {
        return RowContent::Loader;
    }
    let position = if has_loader_row { logical_index - 1 } else { logical_index };
    window.get(position).map_or(RowContent::Empty, RowContent::Message)
}

/// `window_start` is the store position of `window[0]`.
#[must_use]
pub fn row_key(logical_index: usize, has_loader_row: bool, window_start: usize) -> RowKey {
    if has_loader_row {
        match logical_index {
            0 => RowKey::Loader,
            i => RowKey::Message(window_start + i - 1),
        }
    } else {
        RowKey::Message(window_start + logical_index)
    }
}

/// Logical index of the newest message, `None` for an empty window.
#[must_use]
pub fn last_message_row(window_len: usize, has_loader_row: bool) -> Option<usize> {
    if window_len == 0 {
        return None;
    }
    Some(if has_loader_row { window_len } else { window_len - 1 })
}
