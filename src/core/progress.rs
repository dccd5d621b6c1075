//! Bounded scrub progress and the progress → frame mapping.
//!
//! Progress is a 0–100 scalar.  Every mutation clamps it back into range,
//! and once it reaches the top the accumulator freezes for good.

/// Upper bound of the progress scale.
pub const PROGRESS_MAX: f64 = 100.0;

/// Map a progress value to a frame index in a sequence of `total_frames`.
///
/// `floor((progress / 100) * (total_frames - 1))`.  Out-of-range progress
/// is clamped first, so the result is always a valid index (or 0 for an
/// empty or single-frame sequence).
pub fn frame_for(progress: f64, total_frames: usize) -> usize {
    if total_frames <= 1 {
        return 0;
    }
    let last = total_frames - 1;
    let fraction = progress.clamp(0.0, PROGRESS_MAX) / PROGRESS_MAX;
    ((fraction * last as f64).floor() as usize).min(last)
}

/// What a single `apply` did to the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Applied {
    /// Already complete — the delta was dropped.
    Ignored,
    /// Progress moved (or was clamped in place) and is still below the top.
    Moved(f64),
    /// This delta carried progress to the top.  Reported exactly once.
    Completed,
}

/// Clamped progress accumulator.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    value: f64,
    complete: bool,
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Add `delta`, clamping into `[0, 100]`.  Overshoot is clamped rather
    /// than rejected, so one large delta can jump straight to completion.
    pub fn apply(&mut self, delta: f64) -> Applied {
        if self.complete {
            return Applied::Ignored;
        }
        // NaN would poison every later comparison.
        if delta.is_nan() {
            return Applied::Moved(self.value);
        }
        self.value = (self.value + delta).clamp(0.0, PROGRESS_MAX);
        if self.value >= PROGRESS_MAX {
            self.complete = true;
            Applied::Completed
        } else {
            Applied::Moved(self.value)
        }
    }
}
