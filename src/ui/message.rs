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

use crate::feed::RowContent;
use crate::ui::theme;
use ratatui::layout::Alignment;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

/// What the loader row should say this frame.
#[derive(Debug, Clone, Default)]
pub struct LoaderStatus {
    pub error: Option<String>,
    pub fetching: bool,
    pub spinner_frame: usize,
}

pub fn row_lines(row: RowContent<'_>, loader: &LoaderStatus) -> Vec<Line<'static>> {
    match row {
        RowContent::Loader => loader_lines(loader),
        RowContent::Message(msg) => vec![
            Line::from(Span::styled(
                format!("{}:", msg.author),
                Style::default().fg(theme::AUTHOR).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(msg.body.clone(), Style::default().fg(theme::BODY))),
            Line::default(),
        ],
        RowContent::Empty => Vec::new(),
    }
}

fn loader_lines(loader: &LoaderStatus) -> Vec<Line<'static>> {
    let line = match (&loader.error, loader.fetching) {
        (Some(err), false) => Line::from(Span::styled(
            format!("Couldn't load older messages: {err}. Retrying shortly..."),
            Style::default().fg(theme::LOADER_ERROR),
        )),
        _ => Line::from(Span::styled(
            format!("{} Loading older messages...", theme::spinner(loader.spinner_frame)),
            Style::default().fg(theme::LOADER).add_modifier(Modifier::BOLD),
        )),
    };
    vec![line.alignment(Alignment::Center), Line::default()]
}

pub fn row_paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
    Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false })
}

/// Rendered height of `row` at `width`, in lines.
pub fn row_height(row: RowContent<'_>, loader: &LoaderStatus, width: u16) -> u16 {
    if matches!(row, RowContent::Empty) {
        return 1;
    }
    let count = row_paragraph(row_lines(row, loader)).line_count(width);
    u16::try_from(count).unwrap_or(u16::MAX)
}
