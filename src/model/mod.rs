//! Mixed-integer formulations of the facility location problems.

mod double;
mod error;
mod exhaustive;
mod linear;
mod lp;
mod plan;
mod single;
mod solver;

pub use double::*;
pub use error::*;
pub use exhaustive::*;
pub use linear::*;
pub use lp::*;
pub use plan::*;
pub use single::*;
pub use solver::*;
