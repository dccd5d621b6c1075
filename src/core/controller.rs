//! Scroll progress controller — input capture → progress → frame → redraw.
//!
//! The controller owns every piece of mutable scrub state and talks to its
//! surroundings only through [`ScrollHost`], so the whole pipeline can be
//! driven from tests without a terminal.

use std::time::Instant;

use super::inertia::{Inertia, InertiaTuning};
use super::progress::{frame_for, Applied, Progress};
use super::velocity::VelocityWindow;

/// Side effects the controller asks of whatever hosts it.
pub trait ScrollHost {
    /// Paint frame `index` of the sequence.
    fn draw_frame(&mut self, index: usize);
    /// Give scrolling back to the document (scroll-lock off, hero unpinned).
    fn release_scroll(&mut self);
    /// Stop routing wheel/touch input to the controller.
    fn detach_input(&mut self);
}

/// Per-source input scaling plus inertia tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTuning {
    /// Progress per wheel notch.
    pub wheel_step: f64,
    /// Progress per pixel of touch drag.
    pub touch_scale: f64,
    pub inertia: InertiaTuning,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            wheel_step: 2.0,
            touch_scale: 0.15,
            inertia: InertiaTuning::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Toward the end of the sequence.
    Down,
    /// Back toward the first frame.
    Up,
}

#[derive(Debug, Clone, Copy)]
struct TouchPoint {
    y: f64,
    at: Instant,
}

pub struct ScrollController {
    tuning: ScrollTuning,
    total_frames: usize,
    progress: Progress,
    /// Last index handed to the host, used to skip redundant draws.
    rendered_frame: Option<usize>,
    listening: bool,
    touch: Option<TouchPoint>,
    velocity: VelocityWindow,
    inertia: Inertia,
}

impl ScrollController {
    /// Create an inactive controller.  Input is ignored until [`activate`].
    ///
    /// [`activate`]: Self::activate
    pub fn new(total_frames: usize, tuning: ScrollTuning) -> Self {
        Self {
            tuning,
            total_frames: total_frames.max(1),
            progress: Progress::new(),
            rendered_frame: None,
            listening: false,
            touch: None,
            velocity: VelocityWindow::new(),
            inertia: Inertia::new(tuning.inertia),
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn frame_index(&self) -> usize {
        frame_for(self.progress.value(), self.total_frames)
    }

    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    pub fn is_complete(&self) -> bool {
        self.progress.is_complete()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_animating(&self) -> bool {
        self.inertia.is_running()
    }

    pub fn velocity(&self) -> f64 {
        self.inertia.velocity()
    }

    #[cfg(test)]
    pub fn velocity_window(&self) -> &VelocityWindow {
        &self.velocity
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Paint the first frame and start accepting input.  Called once the
    /// whole sequence is loaded.
    pub fn activate(&mut self, host: &mut impl ScrollHost) {
        if self.listening || self.is_complete() {
            return;
        }
        let index = self.frame_index();
        host.draw_frame(index);
        self.rendered_frame = Some(index);
        self.listening = true;
    }

    /// Detach from input and stop any running inertia.  Idempotent.
    pub fn teardown(&mut self, host: &mut impl ScrollHost) {
        self.inertia.halt();
        self.touch = None;
        if self.listening {
            self.listening = false;
            host.detach_input();
        }
    }

    // ── accumulator ─────────────────────────────────────────────

    /// Add `delta` to progress, redraw if the frame changed, and release the
    /// page when progress reaches the top.
    pub fn apply_delta(&mut self, delta: f64, host: &mut impl ScrollHost) {
        match self.progress.apply(delta) {
            Applied::Ignored => {}
            Applied::Moved(_) => self.sync_frame(host),
            Applied::Completed => {
                self.sync_frame(host);
                tracing::info!("scrub complete, releasing page scroll");
                host.release_scroll();
                self.teardown(host);
            }
        }
    }

    fn sync_frame(&mut self, host: &mut impl ScrollHost) {
        let index = self.frame_index();
        if self.rendered_frame != Some(index) {
            host.draw_frame(index);
            self.rendered_frame = Some(index);
        }
    }

    // ── input capture ───────────────────────────────────────────

    pub fn on_wheel(&mut self, direction: WheelDirection, host: &mut impl ScrollHost) {
        if !self.listening {
            return;
        }
        let delta = match direction {
            WheelDirection::Down => self.tuning.wheel_step,
            WheelDirection::Up => -self.tuning.wheel_step,
        };
        self.apply_delta(delta, host);
    }

    /// Finger down at `y` (pixels).  Clears the velocity window and grabs
    /// any motion still coasting from the previous release.
    pub fn on_touch_start(&mut self, y: f64, at: Instant) {
        if !self.listening {
            return;
        }
        if self.inertia.is_running() {
            tracing::debug!("touch start halted inertia");
            self.inertia.halt();
        }
        self.velocity.clear();
        self.touch = Some(TouchPoint { y, at });
    }

    /// Finger moved to `y`.  Upward motion (decreasing y) advances progress.
    pub fn on_touch_move(&mut self, y: f64, at: Instant, host: &mut impl ScrollHost) {
        if !self.listening {
            return;
        }
        let Some(prev) = self.touch.replace(TouchPoint { y, at }) else {
            // No touch start seen; treat this sample as the start.
            return;
        };
        let distance = prev.y - y;
        self.velocity.record(distance, prev.at, at);
        self.apply_delta(distance * self.tuning.touch_scale, host);
    }

    /// Finger lifted.  Starts inertia from the mean window velocity when
    /// fast enough; returns whether a loop was started.
    pub fn on_touch_end(&mut self) -> bool {
        if !self.listening || self.touch.take().is_none() {
            return false;
        }
        if self.is_complete() || self.inertia.is_running() {
            return false;
        }
        let velocity = self.velocity.mean();
        let started = self.inertia.start(velocity);
        if started {
            tracing::debug!(velocity, "inertia started");
        }
        started
    }

    // ── inertia loop ────────────────────────────────────────────

    /// Advance the inertia loop by one animation frame.  Returns `true` while
    /// another tick should be scheduled.
    pub fn inertia_tick(&mut self, host: &mut impl ScrollHost) -> bool {
        if self.is_complete() {
            self.inertia.halt();
            return false;
        }
        let Some(delta) = self.inertia.step() else {
            return false;
        };
        self.apply_delta(delta, host);
        if self.is_complete() {
            self.inertia.halt();
        }
        let running = self.inertia.is_running();
        if !running {
            tracing::debug!(velocity = self.inertia.velocity(), "inertia settled");
        }
        running
    }
}
