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

use crate::config::FeedConfig;
use crate::feed::{FeedEvent, FeedView, MessageStore};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct App {
    pub feed: FeedView,
    pub should_quit: bool,
    pub spinner_frame: usize,
    /// Where the messages came from, shown in the header.
    pub source_label: String,
    pub event_rx: mpsc::UnboundedReceiver<FeedEvent>,
    /// Area where the feed was last rendered. Wheel events outside it are
    /// ignored.
    pub rendered_feed_area: ratatui::layout::Rect,
    /// Force a full terminal clear on next render frame.
    pub force_redraw: bool,
}

impl App {
    pub fn new(store: Arc<MessageStore>, config: &FeedConfig, source_label: String) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let feed = FeedView::new(store, config, event_tx);
        Self {
            feed,
            should_quit: false,
            spinner_frame: 0,
            source_label,
            event_rx,
            rendered_feed_area: ratatui::layout::Rect::default(),
            force_redraw: false,
        }
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.feed.pagination().is_fetching_older()
    }
}
