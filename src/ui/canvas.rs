//! Half-block canvas blitter.
//!
//! Draws the composed canvas with Unicode `▀` half-blocks: each cell carries
//! two vertically stacked pixels (foreground = top, background = bottom), so
//! one column is one pixel wide and one row is two pixels tall.  The canvas
//! is already at display resolution; nothing is resampled here.

use image::RgbaImage;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};

pub struct CanvasWidget<'a> {
    pixels: &'a RgbaImage,
    /// Cell rows clipped off the top (the hero scrolling out of view).
    skip_rows: u16,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(pixels: &'a RgbaImage) -> Self {
        Self {
            pixels,
            skip_rows: 0,
        }
    }

    pub fn skip_rows(mut self, rows: u16) -> Self {
        self.skip_rows = rows;
        self
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (iw, ih) = self.pixels.dimensions();
        if area.width == 0 || area.height == 0 || iw == 0 || ih == 0 {
            return;
        }

        let visible_w = iw.min(area.width as u32) as u16;
        // Centre horizontally within the area.
        let col_offset = area.width.saturating_sub(visible_w) / 2;

        for row in 0..area.height {
            let yt = (row as u32 + self.skip_rows as u32) * 2;
            let yb = yt + 1;
            if yt >= ih {
                break;
            }
            for col in 0..visible_w {
                let t = self.pixels.get_pixel(col as u32, yt);
                let fg = Color::Rgb(t[0], t[1], t[2]);
                let bg = if yb < ih {
                    let b = self.pixels.get_pixel(col as u32, yb);
                    Color::Rgb(b[0], b[1], b[2])
                } else {
                    Color::Reset
                };
                if let Some(cell) =
                    buf.cell_mut(Position::new(area.x + col_offset + col, area.y + row))
                {
                    cell.set_char('▀').set_fg(fg).set_bg(bg);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn striped(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |_, y| Rgba([y as u8, 0, 0, 255]))
    }

    #[test]
    fn two_pixel_rows_per_cell() {
        let img = striped(2, 4);
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&img).render(area, &mut buf);

        let cell = &buf[(0, 1)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(2, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(3, 0, 0));
    }

    #[test]
    fn odd_height_leaves_bottom_half_blank() {
        let img = striped(1, 3);
        let area = Rect::new(0, 0, 1, 4);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&img).render(area, &mut buf);
        assert_eq!(buf[(0, 1)].bg, Color::Reset);
        assert_eq!(buf[(0, 2)].symbol(), " ");
    }

    #[test]
    fn skip_rows_clips_top() {
        let img = striped(1, 6);
        let area = Rect::new(0, 0, 1, 3);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&img).skip_rows(2).render(area, &mut buf);
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(4, 0, 0));
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }

    #[test]
    fn narrow_canvas_is_centred() {
        let img = striped(2, 2);
        let area = Rect::new(0, 0, 6, 1);
        let mut buf = Buffer::empty(area);
        CanvasWidget::new(&img).render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), " ");
        assert_eq!(buf[(2, 0)].symbol(), "▀");
        assert_eq!(buf[(3, 0)].symbol(), "▀");
        assert_eq!(buf[(4, 0)].symbol(), " ");
    }
}
