//! Sliding-window touch velocity estimate.
//!
//! Each touch-move contributes one `distance / elapsed_ms` sample.  The
//! window keeps the most recent [`WINDOW_CAPACITY`] samples (oldest evicted
//! first) and the release velocity is their arithmetic mean.

use std::collections::VecDeque;
use std::time::Instant;

/// Number of speed samples kept for the release estimate.
pub const WINDOW_CAPACITY: usize = 5;

/// FIFO window of recent speed samples (units per millisecond).
#[derive(Debug, Clone, Default)]
pub struct VelocityWindow {
    samples: VecDeque<f64>,
}

impl VelocityWindow {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW_CAPACITY),
        }
    }

    /// Push a sample, evicting the oldest one when full.
    pub fn push(&mut self, speed: f64) {
        if !speed.is_finite() {
            return;
        }
        if self.samples.len() == WINDOW_CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(speed);
    }

    /// Record the speed between two touch points.  Samples with no elapsed
    /// time are skipped (two events in the same millisecond carry no speed).
    pub fn record(&mut self, distance: f64, from: Instant, to: Instant) {
        let elapsed_ms = to.saturating_duration_since(from).as_secs_f64() * 1000.0;
        if elapsed_ms > 0.0 {
            self.push(distance / elapsed_ms);
        }
    }

    /// Arithmetic mean of the window, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.samples().sum::<f64>() / self.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}
