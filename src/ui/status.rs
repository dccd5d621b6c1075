//! Bottom status bar: load state, scrub progress, or a release hint.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::AppState;

use super::theme::Theme;

/// Width of the inline progress meter, in cells.
const METER_WIDTH: usize = 20;

pub struct StatusBar<'a> {
    pub state: &'a AppState,
}

impl StatusBar<'_> {
    fn meter(progress: f64) -> String {
        let filled = ((progress / 100.0) * METER_WIDTH as f64).round() as usize;
        let filled = filled.min(METER_WIDTH);
        format!("{}{}", "█".repeat(filled), "░".repeat(METER_WIDTH - filled))
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;

        if let Some(msg) = &state.status_message {
            Paragraph::new(format!(" {msg}"))
                .style(Theme::error_style())
                .render(area, buf);
            return;
        }

        let controller = &state.controller;
        let line = if controller.is_complete() {
            Line::from(" Scroll freely · ↑/↓ PgUp/PgDn · q quit")
        } else if !controller.is_listening() {
            let seq = &state.stage.sequence;
            Line::from(format!(" Loading frames {}/{} · q quit", seq.loaded(), seq.total()))
        } else {
            Line::from(vec![
                Span::raw(" Scroll or drag to scrub "),
                Span::styled(Self::meter(controller.progress()), Theme::progress_fill_style()),
                Span::raw(format!(
                    " {:>3.0}% · frame {}/{}{} · q quit",
                    controller.progress(),
                    controller.frame_index() + 1,
                    controller.total_frames(),
                    if controller.is_animating() {
                        format!(" · coasting {:+.2}", controller.velocity())
                    } else {
                        String::new()
                    },
                )),
            ])
        };

        Paragraph::new(line)
            .style(Theme::status_bar_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_fills_proportionally() {
        assert_eq!(StatusBar::meter(0.0), "░".repeat(METER_WIDTH));
        assert_eq!(StatusBar::meter(100.0), "█".repeat(METER_WIDTH));
        assert_eq!(StatusBar::meter(50.0).chars().filter(|c| *c == '█').count(), 10);
    }
}
