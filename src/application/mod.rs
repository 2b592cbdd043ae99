//! Application layer managing state and user workflows.
//!
//! This module sits between the grid model and the terminal front end:
//! prompts, palette selection and dispatch of pointer input.

pub mod state;

pub use state::*;
