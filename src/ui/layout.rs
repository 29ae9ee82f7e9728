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

use ratatui::layout::{Constraint, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub header_sep: Rect,
    pub body: Rect,
    pub footer_sep: Rect,
    pub footer: Option<Rect>,
}

pub fn compute(area: Rect) -> AppLayout {
    let zero = Rect::new(area.x, area.y, area.width, 0);

    if area.height < 6 {
        // Ultra-compact: the feed gets everything
        AppLayout { header: zero, header_sep: zero, body: area, footer_sep: zero, footer: None }
    } else {
        let [header, header_sep, body, footer_sep, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        AppLayout { header, header_sep, body, footer_sep, footer: Some(footer) }
    }
}

#[cfg(test)]
mod tests {
    // =====
    // TESTS: 5
    // =====

    use super::*;
    use pretty_assertions::assert_eq;

    fn area(w: u16, h: u16) -> Rect {
        Rect::new(0, 0, w, h)
    }

    fn total_height(layout: &AppLayout) -> u16 {
        layout.header.height
            + layout.header_sep.height
            + layout.body.height
            + layout.footer_sep.height
            + layout.footer.map_or(0, |f| f.height)
    }

    #[test]
    fn normal_terminal_has_chrome() {
        let layout = compute(area(80, 24));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.header_sep.height, 1);
        assert_eq!(layout.body.height, 20);
        assert_eq!(layout.footer.unwrap().height, 1);
    }

    #[test]
    fn areas_sum_to_total() {
        for h in [6, 10, 24, 80] {
            assert_eq!(total_height(&compute(area(80, h))), h);
        }
    }

    #[test]
    fn areas_are_ordered() {
        let layout = compute(area(80, 24));
        assert!(layout.header.bottom() <= layout.header_sep.y);
        assert!(layout.header_sep.bottom() <= layout.body.y);
        assert!(layout.body.bottom() <= layout.footer_sep.y);
        assert!(layout.footer_sep.bottom() <= layout.footer.unwrap().y);
    }

    #[test]
    fn ultra_compact_is_body_only() {
        let layout = compute(area(80, 5));
        assert_eq!(layout.body, area(80, 5));
        assert_eq!(layout.header.height, 0);
        assert!(layout.footer.is_none());
    }

    #[test]
    fn zero_height_terminal() {
        let layout = compute(area(80, 0));
        assert_eq!(layout.body.height, 0);
        assert!(layout.footer.is_none());
    }
}
