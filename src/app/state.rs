//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    canvas::{canvas_size, Canvas, ScaleCache},
    controller::{ScrollController, ScrollHost},
    page::HostPage,
    sequence::FrameSequence,
};

/// Everything the controller draws into or toggles: the frames, the canvas,
/// and the surrounding page.
pub struct Stage {
    pub sequence: FrameSequence,
    pub canvas: Canvas,
    /// Frames resampled for the current canvas size.
    scaled: ScaleCache,
    pub page: HostPage,
    /// Frame currently painted on the canvas.
    pub painted_frame: Option<usize>,
    /// `true` while wheel/drag input is routed to the controller.
    pub input_hijacked: bool,
    max_canvas_width: u32,
}

impl Stage {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            sequence: FrameSequence::new(config.frame_count),
            canvas: Canvas::new(config.background),
            scaled: ScaleCache::new(config.frame_count),
            page: HostPage::new(),
            painted_frame: None,
            input_hijacked: true,
            max_canvas_width: config.max_canvas_width,
        }
    }

    /// Size the canvas for a container `width` pixels wide, using the first
    /// frame's aspect ratio.  Returns `false` until that frame has loaded.
    pub fn fit_canvas(&mut self, container_width: u16) -> bool {
        let Some(aspect) = self.sequence.reference_aspect() else {
            return false;
        };
        let size = canvas_size(container_width as u32, self.max_canvas_width, aspect);
        if size != self.canvas.size() {
            self.canvas.resize(size);
            self.scaled.invalidate(size);
            tracing::debug!("canvas size: {}x{}", size.width, size.height);
            // Resizing cleared the pixels; repaint what was showing.
            if let Some(index) = self.painted_frame {
                self.paint(index);
            }
        }
        true
    }

    fn paint(&mut self, index: usize) {
        let Some(frame) = self.sequence.frame(index) else {
            return;
        };
        let scaled = self.scaled.get_or_scale(&self.canvas, index, frame);
        self.canvas.clear();
        if let Some(scaled) = scaled {
            self.canvas.blit(scaled);
        }
        self.painted_frame = Some(index);
    }
}

impl ScrollHost for Stage {
    fn draw_frame(&mut self, index: usize) {
        self.paint(index);
    }

    fn release_scroll(&mut self) {
        if self.page.release() {
            tracing::info!("page scroll released");
        }
    }

    fn detach_input(&mut self) {
        self.input_hijacked = false;
    }
}

/// Top-level application state.
pub struct AppState {
    pub controller: ScrollController,
    pub stage: Stage,
    pub config: AppConfig,
    /// Body of the document below the hero.
    pub page_lines: Vec<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Last known terminal size.
    pub terminal_area: Rect,
    /// Monotonically increasing tick counter (drives the spinner).
    pub tick: u64,
}

impl AppState {
    pub fn new(config: AppConfig, page_lines: Vec<String>) -> Self {
        Self {
            controller: ScrollController::new(config.frame_count, config.scroll_tuning()),
            stage: Stage::new(&config),
            config,
            page_lines,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            tick: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    fn frame(w: u32, h: u32) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255])))
    }

    #[test]
    fn canvas_waits_for_first_frame() {
        let mut stage = Stage::new(&AppConfig::default());
        stage.sequence.mark_loaded(3, frame(4, 2)).unwrap();
        assert!(!stage.fit_canvas(100));
        stage.sequence.mark_loaded(0, frame(4, 2)).unwrap();
        assert!(stage.fit_canvas(100));
        assert_eq!(stage.canvas.size().width, 100);
        assert_eq!(stage.canvas.size().height, 50);
    }

    #[test]
    fn resize_keeps_first_frame_aspect() {
        let mut stage = Stage::new(&AppConfig::default());
        stage.sequence.mark_loaded(0, frame(4, 2)).unwrap();
        stage.sequence.mark_loaded(1, frame(1, 4)).unwrap();
        stage.fit_canvas(100);
        stage.draw_frame(1);
        stage.fit_canvas(60);
        assert_eq!(stage.canvas.size().height, 30);
        assert_eq!(stage.painted_frame, Some(1));
    }

    #[test]
    fn frames_are_resampled_once_per_canvas_size() {
        let mut stage = Stage::new(&AppConfig::default());
        stage.sequence.mark_loaded(0, frame(4, 2)).unwrap();
        stage.sequence.mark_loaded(1, frame(4, 2)).unwrap();
        stage.fit_canvas(100);
        stage.draw_frame(0);
        stage.draw_frame(1);
        stage.draw_frame(0);
        assert_eq!(stage.scaled.cached(), 2);

        stage.fit_canvas(60);
        // Only the repainted frame is resampled at the new size.
        assert_eq!(stage.scaled.cached(), 1);
        assert_eq!(stage.painted_frame, Some(0));
        assert_eq!(*stage.canvas.pixels().get_pixel(59, 29), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn width_capped_by_config() {
        let mut cfg = AppConfig::default();
        cfg.max_canvas_width = 40;
        let mut stage = Stage::new(&cfg);
        stage.sequence.mark_loaded(0, frame(2, 1)).unwrap();
        stage.fit_canvas(300);
        assert_eq!(stage.canvas.size().width, 40);
    }

    #[test]
    fn host_callbacks_flip_page_and_input() {
        let mut stage = Stage::new(&AppConfig::default());
        stage.release_scroll();
        stage.detach_input();
        assert!(!stage.page.is_scroll_locked());
        assert!(!stage.input_hijacked);
    }
}
