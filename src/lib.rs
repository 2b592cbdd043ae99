//! kleurplaat - Terminal Coloring Grid Library
//!
//! A grid of cells painted with the mouse, with the color map exportable to
//! and importable from a flat JSON document.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
