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

mod events;
mod state;

pub use events::{handle_feed_event, handle_terminal_event};
pub use state::App;

use crate::config::FeedConfig;
use crate::error::AppError;
use crate::feed::MessageStore;
use crate::feed::source::MessageSource;
use crossterm::event::EventStream;
use futures::{FutureExt as _, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pull every message out of `source` once and freeze it into a store.
pub fn load_store(source: &dyn MessageSource) -> Result<MessageStore, AppError> {
    let messages = source.load_all()?;
    Ok(MessageStore::new(messages)?)
}

pub fn create_app(store: Arc<MessageStore>, config: &FeedConfig, source_label: String) -> App {
    App::new(store, config, source_label)
}

// ---------------------------------------------------------------------------
// TUI event loop
// ---------------------------------------------------------------------------

pub async fn run_tui(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Mouse capture for wheel scrolling (ignore error on unsupported terminals)
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::EnableMouseCapture);

    let mut events = EventStream::new();
    let tick_duration = Duration::from_millis(16);
    let mut last_render = Instant::now();

    let result: anyhow::Result<()> = loop {
        // Phase 1: wait for at least one event or the next frame tick
        let time_to_next = tick_duration.saturating_sub(last_render.elapsed());
        tokio::select! {
            Some(Ok(event)) = events.next() => {
                events::handle_terminal_event(app, event);
            }
            Some(event) = app.event_rx.recv() => {
                events::handle_feed_event(app, event);
            }
            () = tokio::time::sleep(time_to_next) => {}
        }

        // Phase 2: drain all remaining queued events (non-blocking), one at a time
        loop {
            // Try terminal events first (keeps scrolling responsive)
            if let Some(Some(Ok(event))) = events.next().now_or_never() {
                events::handle_terminal_event(app, event);
                continue;
            }
            match app.event_rx.try_recv() {
                Ok(event) => events::handle_feed_event(app, event),
                Err(_) => break,
            }
        }

        if app.should_quit {
            break Ok(());
        }

        // Phase 3: render once; the feed recomputes its visible rows here
        if app.is_fetching() {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
        }
        if app.force_redraw {
            if let Err(e) = terminal.clear() {
                break Err(e.into());
            }
            app.force_redraw = false;
        }
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, app)) {
            break Err(e.into());
        }
        last_render = Instant::now();
    };

    // --- Graceful shutdown ---
    app.feed.shutdown();
    let _ = crossterm::execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    result
}
