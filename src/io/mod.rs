//! Reading sites and writing fields, models and drawings.

pub mod csv;
pub mod json;
pub mod svg;
pub mod tikz;
