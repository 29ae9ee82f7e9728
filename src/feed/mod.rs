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

//! Windowed chat feed with backward pagination.
//!
//! [`FeedView`] ties the pieces together for one view lifetime: the
//! pagination controller owns the loaded window, the virtualizer decides
//! which rows are on screen, and after every recompute the initial-scroll
//! latch and the fetch bridge get a look at the visible set.

pub mod bridge;
pub mod fetch;
pub mod initial_scroll;
pub mod pagination;
pub mod rows;
pub mod source;
pub mod store;
pub mod virtualizer;

pub use fetch::{FeedEvent, FetchSettings, PageFetcher};
pub use pagination::{Applied, PageOutcome, PageRequest, PageResponse, PaginationController};
pub use rows::{RowContent, RowKey};
pub use store::{Message, MessageStore, StoreError};
pub use virtualizer::{Align, VirtualItem, VirtualItems, Virtualizer};

use crate::config::FeedConfig;
use bridge::FetchBridge;
use initial_scroll::InitialScroll;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Measuring a row can change its height, which moves every row below it.
/// A few passes settle any realistic frame.
const MAX_LAYOUT_PASSES: usize = 4;

pub struct FeedView {
    store: Arc<MessageStore>,
    pagination: PaginationController,
    virtualizer: Virtualizer,
    bridge: FetchBridge,
    initial_scroll: InitialScroll,
    fetcher: PageFetcher,
    /// Viewport height from the last recompute, for paging.
    viewport: u16,
}

impl FeedView {
    pub fn new(
        store: Arc<MessageStore>,
        config: &FeedConfig,
        event_tx: mpsc::UnboundedSender<FeedEvent>,
    ) -> Self {
        let pagination = PaginationController::new(store.len(), config.page_size);
        tracing::info!(
            store = store.len(),
            window = pagination.window_len(),
            has_more_older = pagination.has_more_older(),
            "feed view mounted"
        );
        Self {
            store,
            pagination,
            virtualizer: Virtualizer::new(config.row_estimate),
            bridge: FetchBridge::new(config.retry_backoff),
            initial_scroll: InitialScroll::new(),
            fetcher: PageFetcher::new(config.fetch, event_tx),
            viewport: 0,
        }
    }

    #[must_use]
    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    /// The loaded window, oldest first.
    #[must_use]
    pub fn window(&self) -> &[Message] {
        self.store.suffix(self.pagination.start_index())
    }

    #[must_use]
    pub fn has_loader_row(&self) -> bool {
        self.pagination.has_more_older()
    }

    #[must_use]
    pub fn resolve(&self, logical_index: usize) -> RowContent<'_> {
        rows::resolve(logical_index, self.has_loader_row(), self.window())
    }

    #[must_use]
    pub fn is_following_end(&self) -> bool {
        self.virtualizer.is_following_end()
    }


    /// Lay out one frame. `measure` reports the rendered height of a row at
    /// `width`; the virtualizer uses it in place of the estimate from then on.
    ///
    /// After layout the initial-scroll latch and the fetch bridge run against
    /// the visible set, in that order, so the mount frame settles at the
    /// bottom before pagination looks at it.
    pub fn recompute(
        &mut self,
        width: u16,
        height: u16,
        measure: &mut dyn FnMut(RowContent<'_>) -> u16,
    ) -> VirtualItems {
        if self.virtualizer.set_width(width) && !self.virtualizer.is_following_end() {
            // Rewrapping changes every height above the top row.
            self.virtualizer.preserve_anchor();
        }
        let mut visible = self.layout(height, measure);

        if let Some(target) = self.initial_scroll.observe(
            &visible,
            self.pagination.window_len(),
            self.has_loader_row(),
        ) {
            self.virtualizer.scroll_to(target, Align::End);
            visible = self.layout(height, measure);
        }

        if let Some(request) = self.bridge.evaluate(&visible, &mut self.pagination, Instant::now())
        {
            self.fetcher.fetch(request);
        }

        self.viewport = visible.viewport;
        visible
    }

    fn layout(
        &mut self,
        height: u16,
        measure: &mut dyn FnMut(RowContent<'_>) -> u16,
    ) -> VirtualItems {
        let has_loader = self.pagination.has_more_older();
        let start = self.pagination.start_index();
        let count = rows::row_count(self.pagination.window_len(), has_loader);
        let window = self.store.suffix(start);

        let mut visible = VirtualItems::default();
        for pass in 0..MAX_LAYOUT_PASSES {
            if pass > 0 && !self.virtualizer.is_following_end() {
                self.virtualizer.preserve_anchor();
            }
            visible =
                self.virtualizer.compute(count, |i| rows::row_key(i, has_loader, start), height);
            let mut changed = false;
            for item in &visible.items {
                let content = rows::resolve(item.index, has_loader, window);
                changed |= self.virtualizer.measure(item.key, measure(content));
            }
            if !changed {
                break;
            }
        }
        visible
    }

    pub fn handle_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::PageFetched(response) => {
                let previous_oldest = self.window().first().map(|msg| msg.id.clone());
                match self.pagination.apply(response) {
                    Applied::Prepended { added } => {
                        // Resolved on the next compute; scrolls handled before
                        // then are applied relative to it.
                        self.virtualizer.preserve_anchor();
                        self.check_continuity(previous_oldest.as_deref(), added);
                    }
                    Applied::Failed => self.bridge.note_failure(Instant::now()),
                    Applied::Stale => {}
                }
            }
        }
    }

    /// The message that was oldest before a prepend must now sit directly
    /// after the new page.
    fn check_continuity(&self, previous_oldest: Option<&str>, added: usize) {
        let start = self.pagination.start_index();
        let found = previous_oldest.and_then(|id| self.store.position_of(id));
        if found != Some(start + added) {
            tracing::warn!(?found, expected = start + added, "loaded window is not contiguous");
        }
        if let Some(oldest) = self.store.get(start) {
            tracing::debug!(id = %oldest.id, position = start, "oldest loaded message");
        }
    }

    pub fn scroll_by(&mut self, lines: isize) {
        self.virtualizer.scroll_by(lines);
    }

    pub fn page_up(&mut self) {
        self.virtualizer.scroll_by(-self.page_lines());
    }

    pub fn page_down(&mut self) {
        self.virtualizer.scroll_by(self.page_lines());
    }

    /// One viewport minus a line of overlap.
    fn page_lines(&self) -> isize {
        isize::try_from(self.viewport.saturating_sub(1).max(1)).unwrap_or(1)
    }

    /// Jump to the top of what is loaded. If a loader row is there, the
    /// bridge picks it up on the next frame.
    pub fn scroll_to_oldest(&mut self) {
        self.virtualizer.scroll_to(0, Align::Start);
    }

    pub fn scroll_to_newest(&mut self) {
        if let Some(target) =
            rows::last_message_row(self.pagination.window_len(), self.has_loader_row())
        {
            self.virtualizer.scroll_to(target, Align::End);
        }
    }

    /// Cancel any in-flight fetch. Also happens on drop.
    pub fn shutdown(&self) {
        self.fetcher.cancel_all();
    }
}
