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

//! Simulated network fetch for older pages.
//!
//! The store is already in memory, so a fetch is just a delayed completion
//! event. Each request becomes a spawned task that sleeps and then posts
//! `FeedEvent::PageFetched` back to the event loop, which applies it.

use super::pagination::{PageOutcome, PageRequest, PageResponse};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(1000);

/// Events posted back into the UI loop by background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    PageFetched(PageResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSettings {
    pub delay: Duration,
    /// Fail every Nth fetch (1-based). `None` never fails.
    pub fail_every: Option<u64>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self { delay: DEFAULT_FETCH_DELAY, fail_every: None }
    }
}

/// Owns the cancellation scope for every fetch a view has started. Dropping
/// the fetcher cancels whatever is still sleeping so nothing is posted to a
/// torn-down view.
pub struct PageFetcher {
    settings: FetchSettings,
    event_tx: mpsc::UnboundedSender<FeedEvent>,
    cancel: CancellationToken,
    issued: u64,
}

impl PageFetcher {
    pub fn new(settings: FetchSettings, event_tx: mpsc::UnboundedSender<FeedEvent>) -> Self {
        Self { settings, event_tx, cancel: CancellationToken::new(), issued: 0 }
    }

    /// Must be called from within a tokio runtime.
    pub fn fetch(&mut self, request: PageRequest) {
        self.issued += 1;
        let fail = self.settings.fail_every.is_some_and(|n| n > 0 && self.issued % n == 0);
        let delay = self.settings.delay;
        let tx = self.event_tx.clone();
        let cancel = self.cancel.child_token();

        tracing::info!(id = request.id, range = ?request.range, ?delay, "older page fetch scheduled");
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!(id = request.id, "older page fetch cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    let outcome = if fail {
                        PageOutcome::Failed("simulated network error".to_owned())
                    } else {
                        PageOutcome::Loaded
                    };
                    let _ = tx.send(FeedEvent::PageFetched(PageResponse { request, outcome }));
                }
            }
        });
    }

    pub fn cancel_all(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PageFetcher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
