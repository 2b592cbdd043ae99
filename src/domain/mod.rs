pub mod models;
pub mod grid;
pub mod errors;

pub use models::*;
pub use grid::*;
pub use errors::*;
