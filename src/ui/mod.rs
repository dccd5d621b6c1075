//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the composed canvas and the page state and turns them
//! into cells on the terminal.  No decoding or progress math happens here.

pub mod canvas;
pub mod layout;
pub mod spinner;
pub mod stage;
pub mod status;
pub mod theme;
