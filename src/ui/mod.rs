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

mod feed;
mod header;
mod layout;
mod message;
pub mod theme;

use crate::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, app: &mut App) {
    let areas = layout::compute(frame.area());

    // Feed first: its recompute may start a fetch the header should show.
    feed::render(frame, areas.body, app);

    if areas.header.height > 0 {
        header::render(frame, areas.header, app);
        render_separator(frame, areas.header_sep);
    }

    if let Some(footer_area) = areas.footer {
        render_separator(frame, areas.footer_sep);
        render_footer(frame, footer_area, app);
    }
}

const FOOTER_PAD: u16 = 2;
const FOOTER_COLUMN_GAP: u16 = 1;

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let padded = Rect {
        x: area.x + FOOTER_PAD,
        y: area.y,
        width: area.width.saturating_sub(FOOTER_PAD * 2),
        height: area.height,
    };
    let (left, right) = split_footer_columns(padded);

    let hints = Line::from(vec![
        Span::styled("\u{2191}\u{2193}", Style::default().fg(Color::White)),
        Span::styled(" scroll  ", Style::default().fg(theme::DIM)),
        Span::styled("g/G", Style::default().fg(Color::White)),
        Span::styled(" oldest/newest  ", Style::default().fg(theme::DIM)),
        Span::styled("q", Style::default().fg(Color::White)),
        Span::styled(" quit", Style::default().fg(theme::DIM)),
    ]);
    frame.render_widget(Paragraph::new(hints), left);

    let (text, color) = if app.feed.is_following_end() {
        ("following live", theme::RUST_ORANGE)
    } else {
        ("scrolled back \u{b7} G to jump", theme::DIM)
    };
    let line = Line::from(Span::styled(text, Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), right);
}

fn split_footer_columns(area: Rect) -> (Rect, Rect) {
    if area.width == 0 {
        return (area, Rect { width: 0, ..area });
    }

    let gap = if area.width > 2 { FOOTER_COLUMN_GAP } else { 0 };
    let usable_width = area.width.saturating_sub(gap);
    let left_width = usable_width.saturating_add(1) / 2;
    let right_width = usable_width.saturating_sub(left_width);

    let left = Rect { width: left_width, ..area };
    let right = Rect {
        x: area.x.saturating_add(left_width).saturating_add(gap),
        width: right_width,
        ..area
    };
    (left, right)
}

fn render_separator(frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    let sep_str = theme::SEPARATOR_CHAR.repeat(usize::from(area.width));
    let line = Line::from(Span::styled(sep_str, Style::default().fg(theme::DIM)));
    frame.render_widget(Paragraph::new(line), area);
}
