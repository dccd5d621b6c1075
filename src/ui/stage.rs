//! The stage: the hero canvas and, once released, the document below it.
//!
//! While the hero is pinned it owns the viewport.  After release the hero
//! becomes the first block of a scrolling document followed by one blank
//! row and the page body.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::Stage;
use crate::core::page::HeroPosition;

use super::canvas::CanvasWidget;
use super::theme::Theme;

pub struct StageView<'a> {
    pub stage: &'a Stage,
    pub page_lines: &'a [String],
}

impl StageView<'_> {
    fn hero_rows(&self) -> u16 {
        self.stage
            .canvas
            .size()
            .height
            .div_ceil(2)
            .min(u16::MAX as u32) as u16
    }

    fn body(&self) -> Vec<Line<'_>> {
        self.page_lines
            .iter()
            .map(|l| match l.strip_prefix("# ") {
                Some(heading) => Line::from(Span::styled(heading, Theme::heading_style())),
                None => Line::from(Span::styled(l.as_str(), Theme::page_text_style())),
            })
            .collect()
    }
}

impl Widget for StageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let pixels = self.stage.canvas.pixels();

        if self.stage.page.hero_position() == HeroPosition::Fixed {
            CanvasWidget::new(pixels).render(area, buf);
            return;
        }

        let offset = self.stage.page.scroll_offset();
        let hero_rows = self.hero_rows();

        let hero_visible = hero_rows.saturating_sub(offset).min(area.height);
        if hero_visible > 0 {
            let hero_area = Rect::new(area.x, area.y, area.width, hero_visible);
            CanvasWidget::new(pixels).skip_rows(offset).render(hero_area, buf);
        }

        // Body starts one blank row below the hero.
        let body_top = hero_rows.saturating_add(1);
        let body_y = body_top.saturating_sub(offset);
        if body_y >= area.height {
            return;
        }
        let body_scroll = offset.saturating_sub(body_top);
        let body_area = Rect::new(area.x, area.y + body_y, area.width, area.height - body_y);
        Paragraph::new(self.body())
            .scroll((body_scroll, 0))
            .render(body_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::controller::ScrollHost;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn stage_with_canvas(rows_px: u32) -> Stage {
        let mut stage = Stage::new(&AppConfig::default());
        let frame = Arc::new(RgbaImage::from_pixel(10, rows_px, Rgba([1, 2, 3, 255])));
        stage.sequence.mark_loaded(0, frame).unwrap();
        stage.fit_canvas(10);
        stage.draw_frame(0);
        stage
    }

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn pinned_hero_hides_body() {
        let stage = stage_with_canvas(4);
        let lines = vec!["hello".to_string()];
        let area = Rect::new(0, 0, 10, 6);
        let mut buf = Buffer::empty(area);
        StageView { stage: &stage, page_lines: &lines }.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "▀");
        assert!(!(0..6).any(|y| row_text(&buf, y, 10).contains("hello")));
    }

    #[test]
    fn released_page_shows_body_below_hero() {
        let mut stage = stage_with_canvas(4);
        stage.release_scroll();
        let lines = vec!["hello".to_string()];
        let area = Rect::new(0, 0, 10, 6);
        let mut buf = Buffer::empty(area);
        StageView { stage: &stage, page_lines: &lines }.render(area, &mut buf);
        // 4 px → 2 hero rows, a gap, then the body.
        assert_eq!(buf[(0, 1)].symbol(), "▀");
        assert!(row_text(&buf, 3, 10).starts_with("hello"));
    }

    #[test]
    fn scrolling_moves_hero_out() {
        let mut stage = stage_with_canvas(4);
        stage.release_scroll();
        stage.page.scroll_by(3, 10);
        let lines = vec!["a".to_string(), "b".to_string()];
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        StageView { stage: &stage, page_lines: &lines }.render(area, &mut buf);
        assert!(row_text(&buf, 0, 10).starts_with('a'));
        assert!(row_text(&buf, 1, 10).starts_with('b'));
    }
}
