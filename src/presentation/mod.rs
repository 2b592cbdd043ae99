//! Presentation layer handling terminal UI and user input.
//!
//! Renders the grid with ratatui and turns keyboard, mouse and resize
//! events into application calls.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
