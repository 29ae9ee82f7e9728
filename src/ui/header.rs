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

use crate::app::App;
use crate::ui::theme;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const TITLE: &str = "Livestream Chat Feed";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new(header_line(app, area.width)), area);
}

fn header_line(app: &App, width: u16) -> Line<'static> {
    let pagination = app.feed.pagination();
    let state = if pagination.is_fetching_older() {
        format!("{} fetching", theme::spinner(app.spinner_frame))
    } else if pagination.has_more_older() {
        String::new()
    } else {
        "all history loaded".to_owned()
    };
    let mut status = format!("{} of {} loaded", pagination.window_len(), pagination.store_len());
    if !state.is_empty() {
        status = format!("{status} \u{b7} {state}");
    }
    let status = format!("{status} \u{b7} {}", app.source_label);

    let title = Span::styled(
        format!(" {TITLE}"),
        Style::default().fg(theme::RUST_ORANGE).add_modifier(Modifier::BOLD),
    );
    let used = title.content.width();
    let available = usize::from(width).saturating_sub(used + 2);
    let status = fit(&status, available);
    let gap = usize::from(width).saturating_sub(used + status.width() + 1);

    Line::from(vec![
        title,
        Span::raw(" ".repeat(gap)),
        Span::styled(status, Style::default().fg(theme::DIM)),
    ])
}

/// Truncate `text` to `max` columns, marking the cut with an ellipsis.
fn fit(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_owned();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('\u{2026}');
    out
}
