//! SVG format writing operations for visualization export.

mod color;
mod heatmap;
mod writer;

pub use color::*;
pub use heatmap::*;
pub(crate) use writer::*;
