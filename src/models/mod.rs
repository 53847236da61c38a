//! Core data models for the engine.

mod comparison;
mod game;
mod ids;
mod placement;
mod stats;
mod tournament;

pub use comparison::*;
pub use game::*;
pub use ids::*;
pub use placement::*;
pub use stats::*;
pub use tournament::*;
