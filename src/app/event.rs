//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! frame ticker feeds `AnimationFrame` into the same channel.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Mouse event and the moment it was read off the terminal.  Drag
    /// velocity is measured from these stamps, not from when the main loop
    /// gets around to handling the event.
    Mouse(MouseEvent, Instant),
    Resize(u16, u16),
    /// Idle heartbeat (drives the loading spinner).
    Tick,
    /// One inertia step is due.
    AnimationFrame,
}

pub type EventSender = mpsc::UnboundedSender<AppEvent>;

/// Spawns a background task that polls the terminal for events and sends them
/// through `tx`.
pub fn spawn_event_reader(tx: EventSender, tick_rate: Duration) {
    tokio::spawn(async move {
        loop {
            // crossterm's poll blocks; keep it off the async worker threads.
            let polled = tokio::task::spawn_blocking(move || {
                match event::poll(tick_rate) {
                    Ok(true) => event::read().ok().map(|ev| (ev, Instant::now())),
                    _ => None,
                }
            })
            .await;

            let app_event = match polled {
                Ok(Some((CtEvent::Key(k), _))) => AppEvent::Key(k),
                Ok(Some((CtEvent::Mouse(m), at))) => AppEvent::Mouse(m, at),
                Ok(Some((CtEvent::Resize(w, h), _))) => AppEvent::Resize(w, h),
                Ok(Some(_)) => continue,
                // No event within tick_rate — send a tick.
                Ok(None) => AppEvent::Tick,
                Err(_) => break,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });
}
