//! Infrastructure layer providing external service integrations.
//!
//! File export and import of color maps, the TOML configuration file and
//! log output setup.

pub mod config;
pub mod logging;
pub mod persistence;

pub use config::*;
pub use logging::*;
pub use persistence::*;
