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

//! Backward pagination over the message store.
//!
//! The loaded window is always the suffix `store[start_index..]`. It only
//! ever grows toward the oldest message, one page per completed fetch, and
//! at most one fetch is in flight at a time.

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// An older page the controller has committed to fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub id: u64,
    /// Store positions of the older slice, `new_start..old_start`.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    pub request: PageRequest,
    pub outcome: PageOutcome,
}

/// Result of applying a [`PageResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Prepended { added: usize },
    Failed,
    /// Did not match the in-flight request; state untouched.
    Stale,
}

#[derive(Debug)]
pub struct PaginationController {
    store_len: usize,
    page_size: usize,
    start_index: usize,
    has_more_older: bool,
    in_flight: Option<PageRequest>,
    next_request_id: u64,
    last_error: Option<String>,
}

impl PaginationController {
    /// Start with the newest `page_size` messages (or all of them if the
    /// store is smaller). `page_size` must be non-zero.
    pub fn new(store_len: usize, page_size: usize) -> Self {
        let start_index = store_len.saturating_sub(page_size);
        Self {
            store_len,
            page_size,
            start_index,
            has_more_older: start_index > 0,
            in_flight: None,
            next_request_id: 1,
            last_error: None,
        }
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn window_len(&self) -> usize {
        self.store_len - self.start_index
    }

    #[must_use]
    pub fn store_len(&self) -> usize {
        self.store_len
    }

    #[must_use]
    pub fn has_more_older(&self) -> bool {
        self.has_more_older
    }

    #[must_use]
    pub fn is_fetching_older(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Message from the most recent failed fetch, cleared by the next attempt.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Claim the next older page. Returns `None` (and changes nothing) while a
    /// fetch is in flight or once the window covers the whole store.
    pub fn load_older_page(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() || !self.has_more_older {
            return None;
        }
        let old_start = self.start_index;
        let new_start = old_start.saturating_sub(self.page_size);
        let request = PageRequest { id: self.next_request_id, range: new_start..old_start };
        self.next_request_id += 1;
        self.last_error = None;
        self.in_flight = Some(request.clone());
        tracing::debug!(id = request.id, range = ?request.range, "older page requested");
        Some(request)
    }

    /// Apply a completed fetch. Window growth, the has-more flag and the
    /// in-flight flag all change in this one call.
    pub fn apply(&mut self, response: PageResponse) -> Applied {
        let matches_in_flight = self.in_flight.as_ref() == Some(&response.request)
            && response.request.range.end == self.start_index;
        if !matches_in_flight {
            tracing::warn!(id = response.request.id, "ignoring stale page response");
            return Applied::Stale;
        }

        match response.outcome {
            PageOutcome::Loaded => {
                let new_start = response.request.range.start;
                let added = self.start_index - new_start;
                self.start_index = new_start;
                if new_start == 0 {
                    self.has_more_older = false;
                }
                self.in_flight = None;
                tracing::info!(
                    added,
                    start_index = self.start_index,
                    window = self.window_len(),
                    has_more_older = self.has_more_older,
                    "older page applied"
                );
                Applied::Prepended { added }
            }
            PageOutcome::Failed(err) => {
                tracing::warn!(id = response.request.id, error = %err, "older page fetch failed");
                self.last_error = Some(err);
                self.in_flight = None;
                Applied::Failed
            }
        }
    }
}
