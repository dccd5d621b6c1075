//! Core scrub logic – progress, frame mapping, velocity, inertia, canvas.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The
//! controller reaches the outside world only through `ScrollHost`.

pub mod canvas;
pub mod controller;
pub mod inertia;
pub mod page;
pub mod progress;
pub mod sequence;
pub mod velocity;
