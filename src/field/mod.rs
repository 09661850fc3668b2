//! Weighted-distance field evaluation over the site grid.

mod error;
mod field;

pub use error::*;
pub use field::*;
