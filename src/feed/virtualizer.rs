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

//! Windowing engine: turns a row count plus per-row heights into the slice of
//! rows that intersect the viewport.
//!
//! Heights are in terminal lines. Unmeasured rows use the estimate; once a
//! row has been rendered its measured height replaces the estimate. Heights
//! are keyed by [`RowKey`] rather than logical index so prepending a page
//! does not misattribute measurements.

use super::rows::RowKey;
use std::collections::HashMap;

pub const DEFAULT_ROW_ESTIMATE: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualItem {
    pub index: usize,
    pub key: RowKey,
    /// Offset of the row's top edge from the top of the content.
    pub start: usize,
    pub size: u16,
}

impl VirtualItem {
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + usize::from(self.size)
    }
}

/// One frame's view of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualItems {
    /// Rows intersecting the viewport, topmost first.
    pub items: Vec<VirtualItem>,
    pub total_size: usize,
    pub scroll_offset: usize,
    pub viewport: u16,
}

impl VirtualItems {
    #[must_use]
    pub fn first(&self) -> Option<&VirtualItem> {
        self.items.first()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollRequest {
    /// Fresh `scroll_to`, resolved to a key on the next compute.
    Index(usize, Align),
    /// Bottom-follow: re-applied every compute until the user scrolls.
    Pinned(RowKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    key: RowKey,
    offset_in_view: isize,
}

#[derive(Debug)]
pub struct Virtualizer {
    estimate: u16,
    measured: HashMap<RowKey, u16>,
    width: u16,
    scroll_offset: usize,
    scroll: Option<ScrollRequest>,
    anchor: Option<Anchor>,
    restore: Option<Anchor>,
    max_offset: usize,
}

impl Virtualizer {
    pub fn new(estimate: u16) -> Self {
        Self {
            estimate: estimate.max(1),
            measured: HashMap::new(),
            width: 0,
            scroll_offset: 0,
            scroll: None,
            anchor: None,
            restore: None,
            max_offset: 0,
        }
    }

    #[must_use]
    pub fn is_following_end(&self) -> bool {
        matches!(
            self.scroll,
            Some(ScrollRequest::Pinned(_) | ScrollRequest::Index(_, Align::End))
        )
    }

    #[must_use]
    pub fn size_of(&self, key: RowKey) -> u16 {
        self.measured.get(&key).copied().unwrap_or(self.estimate)
    }

    /// Record a rendered height. Returns `true` if it differs from what the
    /// last layout assumed.
    pub fn measure(&mut self, key: RowKey, size: u16) -> bool {
        let size = size.max(1);
        let previous = self.size_of(key);
        self.measured.insert(key, size);
        previous != size
    }

    /// Wrapping depends on width, so every measurement is dropped when it
    /// changes.
    pub fn set_width(&mut self, width: u16) -> bool {
        if self.width == width {
            return false;
        }
        self.width = width;
        self.measured.clear();
        true
    }

    /// Queue a scroll so row `index` is aligned to the viewport edge on the
    /// next compute. `Align::End` keeps following that row until the user
    /// scrolls manually.
    pub fn scroll_to(&mut self, index: usize, align: Align) {
        self.scroll = Some(ScrollRequest::Index(index, align));
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = None;
        // A pending anchor means rows were inserted since the last compute,
        // so `scroll_offset` no longer points where the user is looking.
        if let Some(anchor) = self.restore.as_mut() {
            anchor.offset_in_view = anchor.offset_in_view.saturating_sub(delta);
            return;
        }
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(self.max_offset);
    }

    /// Keep the topmost visible message row at its screen position across
    /// the next compute, even if rows are inserted above it. A pending anchor
    /// is kept as is.
    pub fn preserve_anchor(&mut self) {
        if self.restore.is_none() {
            self.restore = self.anchor;
        }
    }

    pub fn compute(
        &mut self,
        count: usize,
        key_of: impl Fn(usize) -> RowKey,
        viewport: u16,
    ) -> VirtualItems {
        let mut keys = Vec::with_capacity(count);
        let mut starts = Vec::with_capacity(count);
        let mut ends = Vec::with_capacity(count);
        let mut total = 0usize;
        for i in 0..count {
            let key = key_of(i);
            starts.push(total);
            total += usize::from(self.size_of(key));
            ends.push(total);
            keys.push(key);
        }
        let viewport_len = usize::from(viewport);
        self.max_offset = total.saturating_sub(viewport_len);

        if let Some(anchor) = self.restore.take()
            && let Some(idx) = keys.iter().position(|k| *k == anchor.key)
        {
            self.scroll_offset = starts[idx].saturating_add_signed(-anchor.offset_in_view);
        }

        match self.scroll {
            Some(ScrollRequest::Index(idx, align)) if idx < count => match align {
                Align::Start => {
                    self.scroll_offset = starts[idx];
                    self.scroll = None;
                }
                Align::End => self.scroll = Some(ScrollRequest::Pinned(keys[idx])),
            },
            Some(ScrollRequest::Index(..)) => self.scroll = None,
            _ => {}
        }
        if let Some(ScrollRequest::Pinned(key)) = self.scroll {
            match keys.iter().rposition(|k| *k == key) {
                Some(idx) => self.scroll_offset = ends[idx].saturating_sub(viewport_len),
                None => self.scroll = None,
            }
        }
        self.scroll_offset = self.scroll_offset.min(self.max_offset);

        let mut items = Vec::new();
        if viewport_len > 0 {
            let view_end = self.scroll_offset + viewport_len;
            let first = ends.partition_point(|&end| end <= self.scroll_offset);
            for idx in first..count {
                if starts[idx] >= view_end {
                    break;
                }
                let size = u16::try_from(ends[idx] - starts[idx]).unwrap_or(u16::MAX);
                items.push(VirtualItem { index: idx, key: keys[idx], start: starts[idx], size });
            }
        }

        // Anchor on the first message row whose top edge is on screen. The
        // loader row stays at index 0 across a prepend, so anchoring on it
        // would pin the view to the top and keep re-triggering pagination.
        let scroll_offset = self.scroll_offset;
        let anchor_item = items
            .iter()
            .find(|item| item.key != RowKey::Loader && item.start >= scroll_offset)
            .or_else(|| items.iter().find(|item| item.key != RowKey::Loader))
            .or_else(|| items.first());
        self.anchor = anchor_item.map(|item| Anchor {
            key: item.key,
            offset_in_view: signed(item.start) - signed(self.scroll_offset),
        });

        VirtualItems { items, total_size: total, scroll_offset: self.scroll_offset, viewport }
    }
}

fn signed(v: usize) -> isize {
    isize::try_from(v).unwrap_or(isize::MAX)
}
