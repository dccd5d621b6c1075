//! Screen split: the stage on top, one status row at the bottom.

use ratatui::layout::{Constraint, Layout, Rect};

/// The stage holds the pinned hero and, once released, the document
/// scrolling under it.  The status row never scrolls.
pub struct AppLayout {
    pub stage_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let [stage_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        Self {
            stage_area,
            status_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_takes_the_last_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.stage_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
    }
}
