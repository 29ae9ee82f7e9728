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

use super::App;
use crate::feed::FeedEvent;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::layout::Position;

const MOUSE_SCROLL_LINES: isize = 3;

pub fn handle_terminal_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => {
            if !app.rendered_feed_area.contains(Position::new(mouse.column, mouse.row)) {
                return;
            }
            match mouse.kind {
                MouseEventKind::ScrollUp => app.feed.scroll_by(-MOUSE_SCROLL_LINES),
                MouseEventKind::ScrollDown => app.feed.scroll_by(MOUSE_SCROLL_LINES),
                _ => {}
            }
        }
        Event::Resize(..) => app.force_redraw = true,
        _ => {}
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), m) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,
        (KeyCode::Char('q') | KeyCode::Esc, _) => app.should_quit = true,
        (KeyCode::Up | KeyCode::Char('k'), _) => app.feed.scroll_by(-1),
        (KeyCode::Down | KeyCode::Char('j'), _) => app.feed.scroll_by(1),
        (KeyCode::PageUp, _) => app.feed.page_up(),
        (KeyCode::PageDown, _) => app.feed.page_down(),
        (KeyCode::Home | KeyCode::Char('g'), _) => app.feed.scroll_to_oldest(),
        (KeyCode::End | KeyCode::Char('G'), _) => app.feed.scroll_to_newest(),
        (KeyCode::Char('l'), m) if m.contains(KeyModifiers::CONTROL) => app.force_redraw = true,
        _ => {}
    }
}

pub fn handle_feed_event(app: &mut App, event: FeedEvent) {
    app.feed.handle_event(event);
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 6
    // =====

    use super::*;
    use crate::config::FeedConfig;
    use crate::feed::{Message, MessageStore};
    use crossterm::event::{KeyEventState, MouseEvent};
    use ratatui::layout::Rect;
    use std::sync::Arc;

    fn app() -> App {
        let msgs = (0..300).map(|i| Message::new(format!("m{i}"), "Ada", "hi")).collect();
        let store = Arc::new(MessageStore::new(msgs).unwrap());
        App::new(store, &FeedConfig::default(), "test".to_owned())
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn quit_keys() {
        for event in [
            press(KeyCode::Char('q'), KeyModifiers::NONE),
            press(KeyCode::Esc, KeyModifiers::NONE),
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            handle_terminal_event(&mut app, event);
            assert!(app.should_quit);
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app();
        handle_terminal_event(
            &mut app,
            Event::Key(KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            }),
        );
        assert!(!app.should_quit);
    }

    #[test]
    fn scrolling_up_leaves_follow_mode() {
        let mut app = app();
        app.feed.scroll_to_newest();
        assert!(app.feed.is_following_end());
        handle_terminal_event(&mut app, press(KeyCode::Up, KeyModifiers::NONE));
        assert!(!app.feed.is_following_end());
    }

    fn wheel_up(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn mouse_wheel_scrolls_feed() {
        let mut app = app();
        app.rendered_feed_area = Rect::new(0, 2, 80, 20);
        app.feed.scroll_to_newest();
        handle_terminal_event(&mut app, wheel_up(10, 5));
        assert!(!app.feed.is_following_end());
    }

    #[test]
    fn mouse_wheel_outside_feed_is_ignored() {
        let mut app = app();
        app.rendered_feed_area = Rect::new(0, 2, 80, 20);
        app.feed.scroll_to_newest();
        // Header row.
        handle_terminal_event(&mut app, wheel_up(10, 0));
        assert!(app.feed.is_following_end());
    }

    #[test]
    fn page_keys_leave_follow_mode() {
        let mut app = app();
        app.feed.scroll_to_newest();
        handle_terminal_event(&mut app, press(KeyCode::PageUp, KeyModifiers::NONE));
        assert!(!app.feed.is_following_end());
        handle_terminal_event(&mut app, press(KeyCode::End, KeyModifiers::NONE));
        assert!(app.feed.is_following_end());
    }
}
