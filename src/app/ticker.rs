//! Cancellable repeating task that paces the inertia loop.
//!
//! The ticker only emits `AppEvent::AnimationFrame`; whether another frame
//! is wanted is decided by the controller in the main loop, which cancels
//! the ticker once inertia settles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use super::event::{AppEvent, EventSender};

pub struct FrameTicker {
    cancel: Arc<AtomicBool>,
}

impl FrameTicker {
    /// Start emitting one `AnimationFrame` per `period`.  The first frame is
    /// due one period from now.
    pub fn start(period: Duration, tx: EventSender) -> Self {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            // A stalled frame should not replay as a burst of deltas.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                if tx.send(AppEvent::AnimationFrame).is_err() {
                    break;
                }
            }
        });
        Self { cancel }
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Keep at most one ticker alive, and only while `animating`.  Returns
/// `true` when a new ticker was started.
pub fn sync_ticker(
    ticker: &mut Option<FrameTicker>,
    animating: bool,
    period: Duration,
    tx: &EventSender,
) -> bool {
    match (animating, ticker.is_some()) {
        (true, false) => {
            *ticker = Some(FrameTicker::start(period, tx.clone()));
            true
        }
        (false, true) => {
            // Dropping cancels.
            *ticker = None;
            false
        }
        _ => false,
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}
