//! Input handling — maps key/mouse/preload events to state mutations.
//!
//! While the scrub is running the wheel and left-button drag belong to the
//! controller.  Once it completes they fall through to the document.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::core::controller::WheelDirection;
use crate::core::sequence::frame_file_name;
use crate::ui::layout::AppLayout;

use super::preload_runtime::PreloadUpdate;
use super::state::AppState;

/// Rows the document moves per wheel notch once released.
const PAGE_WHEEL_ROWS: i32 = 3;

/// Process a key event.  Keys never drive the scrub; they quit, and scroll
/// the document after release.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let page_rows = AppLayout::from_area(state.terminal_area).stage_area.height as i32;
    let rows = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return;
        }
        KeyCode::Down | KeyCode::Char('j') => 1,
        KeyCode::Up | KeyCode::Char('k') => -1,
        KeyCode::PageDown | KeyCode::Char(' ') => page_rows.max(1),
        KeyCode::PageUp => -page_rows.max(1),
        KeyCode::Home => i32::MIN / 2,
        KeyCode::End => i32::MAX / 2,
        _ => return,
    };
    scroll_document(state, rows);
}

/// Process a mouse event read at `at`.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, at: Instant) {
    if !state.stage.input_hijacked {
        match mouse.kind {
            MouseEventKind::ScrollDown => scroll_document(state, PAGE_WHEEL_ROWS),
            MouseEventKind::ScrollUp => scroll_document(state, -PAGE_WHEEL_ROWS),
            _ => {}
        }
        return;
    }

    let y = mouse.row as f64 * state.config.drag_px_per_row;
    let AppState {
        controller, stage, ..
    } = state;

    match mouse.kind {
        MouseEventKind::ScrollDown => controller.on_wheel(WheelDirection::Down, stage),
        MouseEventKind::ScrollUp => controller.on_wheel(WheelDirection::Up, stage),
        MouseEventKind::Down(MouseButton::Left) => controller.on_touch_start(y, at),
        MouseEventKind::Drag(MouseButton::Left) => controller.on_touch_move(y, at, stage),
        MouseEventKind::Up(MouseButton::Left) => {
            controller.on_touch_end();
        }
        _ => {}
    }
}

/// One inertia step.  Returns `true` while more frames are wanted.
pub fn handle_animation_frame(state: &mut AppState) -> bool {
    state.controller.inertia_tick(&mut state.stage)
}

pub fn handle_resize(state: &mut AppState, width: u16, height: u16) {
    state.terminal_area = ratatui::layout::Rect::new(0, 0, width, height);
    let stage_width = AppLayout::from_area(state.terminal_area).stage_area.width;
    state.stage.fit_canvas(stage_width);
    let max = document_max_offset(state);
    state.stage.page.clamp_offset(max);
}

pub fn apply_preload_update(state: &mut AppState, update: PreloadUpdate) {
    match update {
        PreloadUpdate::Loaded { index, image } => {
            let milestones = match state.stage.sequence.mark_loaded(index, image) {
                Ok(m) => m,
                Err(e) => {
                    tracing::warn!("{e}");
                    return;
                }
            };
            let sequence = &state.stage.sequence;
            tracing::debug!(
                complete = sequence.is_fully_loaded(),
                "Loaded {}/{}",
                sequence.loaded(),
                sequence.total()
            );
            if milestones.reference_ready {
                let stage_width = AppLayout::from_area(state.terminal_area).stage_area.width;
                state.stage.fit_canvas(stage_width);
            }
            if milestones.all_loaded {
                tracing::info!("all {} frames loaded", state.stage.sequence.total());
                let AppState {
                    controller, stage, ..
                } = state;
                controller.activate(stage);
            }
        }
        PreloadUpdate::Failed { index, error } => {
            state.stage.sequence.mark_failed(index);
            tracing::error!(missing = state.stage.sequence.failed().len(), "{error}");
            state.status_message = Some(format!("Failed to load {}", frame_file_name(index)));
        }
    }
}

/// Rows of the hero (canvas) in the document flow.
pub fn hero_rows(state: &AppState) -> u16 {
    let px = state.stage.canvas.size().height;
    px.div_ceil(2).min(u16::MAX as u32) as u16
}

/// Furthest the document can scroll: hero + gap + body, minus the viewport.
pub fn document_max_offset(state: &AppState) -> u16 {
    let viewport = AppLayout::from_area(state.terminal_area).stage_area.height as usize;
    let document = hero_rows(state) as usize + 1 + state.page_lines.len();
    document.saturating_sub(viewport).min(u16::MAX as usize) as u16
}

fn scroll_document(state: &mut AppState, rows: i32) {
    let max = document_max_offset(state);
    state.stage.page.scroll_by(rows, max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::sequence::SequenceError;
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;
    use std::time::Duration;

    fn state_with_frames(total: usize) -> AppState {
        let mut cfg = AppConfig::default();
        cfg.frame_count = total;
        let mut state = AppState::new(cfg, (0..40).map(|i| format!("line {i}")).collect());
        handle_resize(&mut state, 80, 24);
        state
    }

    fn load_all(state: &mut AppState) {
        for index in 0..state.stage.sequence.total() {
            let image = Arc::new(RgbaImage::from_pixel(8, 4, Rgba([index as u8, 0, 0, 255])));
            apply_preload_update(state, PreloadUpdate::Loaded { index, image });
        }
    }

    fn mouse(kind: MouseEventKind, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Feed `events` as if read off the terminal `step` apart.
    fn mouse_at(state: &mut AppState, events: &[(MouseEventKind, u16)], step: Duration) {
        let t0 = Instant::now();
        for (i, (kind, row)) in events.iter().enumerate() {
            handle_mouse(state, mouse(*kind, *row), t0 + step * i as u32);
        }
    }

    fn wheel(state: &mut AppState, kind: MouseEventKind) {
        handle_mouse(state, mouse(kind, 5), Instant::now());
    }

    fn drag_two_rows() -> [(MouseEventKind, u16); 4] {
        [
            (MouseEventKind::Down(MouseButton::Left), 20),
            (MouseEventKind::Drag(MouseButton::Left), 19),
            (MouseEventKind::Drag(MouseButton::Left), 18),
            (MouseEventKind::Up(MouseButton::Left), 18),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn input_waits_for_all_frames() {
        let mut state = state_with_frames(3);
        wheel(&mut state, MouseEventKind::ScrollDown);
        assert!(!state.controller.is_listening());
        assert_eq!(state.controller.progress(), 0.0);

        load_all(&mut state);
        assert!(state.controller.is_listening());
        assert_eq!(state.stage.painted_frame, Some(0));
        wheel(&mut state, MouseEventKind::ScrollDown);
        assert_eq!(state.controller.progress(), 2.0);
    }

    #[test]
    fn canvas_sized_when_first_frame_arrives() {
        let mut state = state_with_frames(2);
        let image = Arc::new(RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255])));
        apply_preload_update(&mut state, PreloadUpdate::Loaded { index: 0, image });
        assert_eq!(state.stage.canvas.size().width, 80);
        assert_eq!(state.stage.canvas.size().height, 40);
        assert!(!state.controller.is_listening());
    }

    #[test]
    fn failed_frame_blocks_activation() {
        let mut state = state_with_frames(2);
        let image = Arc::new(RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255])));
        apply_preload_update(&mut state, PreloadUpdate::Loaded { index: 0, image });
        let error = SequenceError::OutOfRange { index: 9, total: 2 };
        apply_preload_update(&mut state, PreloadUpdate::Failed { index: 1, error });
        assert!(!state.controller.is_listening());
        assert_eq!(state.status_message.as_deref(), Some("Failed to load frame_002.png"));
    }

    #[test]
    fn wheel_to_completion_releases_page() {
        let mut state = state_with_frames(25);
        load_all(&mut state);
        for _ in 0..50 {
            wheel(&mut state, MouseEventKind::ScrollDown);
        }
        assert!(state.controller.is_complete());
        assert_eq!(state.controller.frame_index(), 24);
        assert_eq!(state.stage.painted_frame, Some(24));
        assert!(!state.stage.input_hijacked);
        assert!(!state.stage.page.is_scroll_locked());

        // The wheel now scrolls the document instead.
        wheel(&mut state, MouseEventKind::ScrollDown);
        assert_eq!(state.stage.page.scroll_offset(), 3);
        assert_eq!(state.controller.progress(), 100.0);
    }

    #[test]
    fn drag_release_then_frames_coast() {
        let mut state = state_with_frames(25);
        load_all(&mut state);
        // 16 px every 16 ms: 1 px/ms at release.
        mouse_at(&mut state, &drag_two_rows(), Duration::from_millis(16));
        let after_drag = state.controller.progress();
        assert!((after_drag - 2.0 * 16.0 * 0.15).abs() < 1e-9);
        assert!(state.controller.is_animating());
        assert!((state.controller.velocity() - 1.0).abs() < 1e-9);

        assert!(handle_animation_frame(&mut state));
        assert!((state.controller.progress() - (after_drag + 2.0)).abs() < 1e-9);

        while handle_animation_frame(&mut state) {}
        assert!(!state.controller.is_animating());
        assert!(!state.controller.is_complete());
        let progress = state.controller.progress();
        assert!(progress > after_drag + 30.0 && progress < 100.0);
        assert_eq!(state.stage.painted_frame, Some(state.controller.frame_index()));
        assert!(!handle_animation_frame(&mut state));
    }

    #[test]
    fn release_velocity_uses_read_timestamps() {
        let mut state = state_with_frames(25);
        load_all(&mut state);
        // Handled back to back, but read 100 ms apart: 0.16 px/ms.
        mouse_at(&mut state, &drag_two_rows(), Duration::from_millis(100));
        assert!((state.controller.velocity() - 0.16).abs() < 1e-9);

        assert!(handle_animation_frame(&mut state));
        assert!((state.controller.progress() - (4.8 + 0.32)).abs() < 1e-9);
        assert!(!state.controller.is_complete());
    }

    #[test]
    fn slow_drag_does_not_coast() {
        let mut state = state_with_frames(25);
        load_all(&mut state);
        mouse_at(&mut state, &drag_two_rows(), Duration::from_millis(200));
        assert!(!state.controller.is_animating());
        assert!(!handle_animation_frame(&mut state));
        assert!((state.controller.progress() - 4.8).abs() < 1e-9);
    }

    #[test]
    fn keys_scroll_only_after_release() {
        let mut state = state_with_frames(1);
        load_all(&mut state);
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.stage.page.scroll_offset(), 0);

        wheel(&mut state, MouseEventKind::ScrollDown);
        for _ in 0..49 {
            wheel(&mut state, MouseEventKind::ScrollDown);
        }
        assert!(state.controller.is_complete());
        handle_key(&mut state, key(KeyCode::Down));
        assert_eq!(state.stage.page.scroll_offset(), 1);
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.stage.page.scroll_offset(), document_max_offset(&state));
    }

    #[test]
    fn quit_keys() {
        let mut state = state_with_frames(1);
        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);
    }
}
