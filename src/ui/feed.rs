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
use crate::feed::RowContent;
use crate::ui::message::{self, LoaderStatus};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Blank columns kept on each side of the feed.
const SIDE_PAD: u16 = 1;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    app.rendered_feed_area = area;
    if area.width <= SIDE_PAD * 2 || area.height == 0 {
        return;
    }
    let content = Rect::new(area.x + SIDE_PAD, area.y, area.width - SIDE_PAD * 2, area.height);

    let pagination = app.feed.pagination();
    let status = LoaderStatus {
        error: pagination.last_error().map(str::to_owned),
        fetching: pagination.is_fetching_older(),
        spinner_frame: app.spinner_frame,
    };
    let width = content.width;
    let mut measure = |row: RowContent<'_>| message::row_height(row, &status, width);
    let visible = app.feed.recompute(width, content.height, &mut measure);

    // Short feeds sit against the bottom edge, like a chat.
    let bottom_pad = usize::from(visible.viewport).saturating_sub(visible.total_size);
    let viewport = usize::from(content.height);

    for item in &visible.items {
        let row = app.feed.resolve(item.index);
        if matches!(row, RowContent::Empty) {
            continue;
        }
        let top = item.start + bottom_pad;
        let bottom = item.end() + bottom_pad;
        if bottom <= visible.scroll_offset || top >= visible.scroll_offset + viewport {
            continue;
        }
        let skip = visible.scroll_offset.saturating_sub(top);
        let y = top.saturating_sub(visible.scroll_offset);
        let height = (bottom - top - skip).min(viewport - y);
        let (Ok(skip), Ok(y), Ok(height)) =
            (u16::try_from(skip), u16::try_from(y), u16::try_from(height))
        else {
            continue;
        };

        let rect = Rect::new(content.x, content.y + y, content.width, height);
        let paragraph = message::row_paragraph(message::row_lines(row, &status)).scroll((skip, 0));
        frame.render_widget(paragraph, rect);
    }
}
