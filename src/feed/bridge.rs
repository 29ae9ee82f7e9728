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

//! Turns "the loader row scrolled into view" into a page request.

use super::pagination::{PageRequest, PaginationController};
use super::virtualizer::VirtualItems;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Pure trigger condition: the topmost visible row is logical index 0 and
/// there is something left to fetch that is not already being fetched.
#[must_use]
pub fn should_fetch(first_visible: Option<usize>, has_more_older: bool, is_fetching: bool) -> bool {
    first_visible == Some(0) && has_more_older && !is_fetching
}

#[derive(Debug)]
pub struct FetchBridge {
    retry_backoff: Duration,
    last_failure: Option<Instant>,
}

impl FetchBridge {
    pub fn new(retry_backoff: Duration) -> Self {
        Self { retry_backoff, last_failure: None }
    }

    /// Delays the next trigger so a persistent failure does not turn into a
    /// retry loop at frame rate.
    pub fn note_failure(&mut self, at: Instant) {
        self.last_failure = Some(at);
    }

    /// Run after every visible-set recomputation. Safe to call repeatedly:
    /// the controller claims the in-flight slot synchronously.
    pub fn evaluate(
        &mut self,
        visible: &VirtualItems,
        pagination: &mut PaginationController,
        now: Instant,
    ) -> Option<PageRequest> {
        let first = visible.first().map(|item| item.index);
        if !should_fetch(first, pagination.has_more_older(), pagination.is_fetching_older()) {
            return None;
        }
        if let Some(failed_at) = self.last_failure {
            if now.saturating_duration_since(failed_at) < self.retry_backoff {
                return None;
            }
            self.last_failure = None;
        }
        let request = pagination.load_older_page()?;
        tracing::debug!(id = request.id, "loader row visible, requesting older page");
        Some(request)
    }
}

impl Default for FetchBridge {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_BACKOFF)
    }
}
