//! Post-release inertia with geometric decay.
//!
//! A pure state machine: `Idle` until a release hands it a fast enough
//! velocity, then each [`Inertia::step`] yields one delta and decays the
//! velocity until it falls under the stop threshold.  Scheduling the steps
//! is the caller's job (see `app::ticker`).

/// Tunables for the inertia phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InertiaTuning {
    /// Minimum `|velocity|` (units/ms) a release needs to start the loop.
    pub min_release_velocity: f64,
    /// The loop goes idle once `|velocity|` drops below this.
    pub stop_velocity: f64,
    /// Per-step multiplier, `0 < decay < 1`.
    pub decay: f64,
    /// Delta applied per step is `velocity * gain`.
    pub gain: f64,
}

impl Default for InertiaTuning {
    fn default() -> Self {
        Self {
            min_release_velocity: 0.1,
            stop_velocity: 0.05,
            decay: 0.95,
            gain: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InertiaPhase {
    #[default]
    Idle,
    Running,
}

#[derive(Debug, Clone)]
pub struct Inertia {
    tuning: InertiaTuning,
    phase: InertiaPhase,
    velocity: f64,
}

impl Inertia {
    pub fn new(tuning: InertiaTuning) -> Self {
        Self {
            tuning,
            phase: InertiaPhase::Idle,
            velocity: 0.0,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> InertiaPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == InertiaPhase::Running
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Try to enter `Running` with the release velocity.  Refused while a
    /// loop is already running or when the release is too slow.
    pub fn start(&mut self, velocity: f64) -> bool {
        if self.is_running() || !velocity.is_finite() {
            return false;
        }
        if velocity.abs() <= self.tuning.min_release_velocity {
            return false;
        }
        self.velocity = velocity;
        self.phase = InertiaPhase::Running;
        true
    }

    /// One animation tick: returns the delta to apply, then decays.
    /// Returns `None` when idle.
    pub fn step(&mut self) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        let delta = self.velocity * self.tuning.gain;
        self.velocity *= self.tuning.decay;
        if self.velocity.abs() < self.tuning.stop_velocity {
            self.phase = InertiaPhase::Idle;
        }
        Some(delta)
    }

    /// Drop back to `Idle` without touching the velocity.
    pub fn halt(&mut self) {
        self.phase = InertiaPhase::Idle;
    }
}
