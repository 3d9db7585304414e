//! The board the agents play on.
//!
//! Owns dimensions, snake geometry and food, and provides the primitives the
//! search agents consume: legal moves, distance fields, pure move application
//! and independent cloning for simulation.

pub mod logic;
pub mod types;

pub use logic::{StepOutcome, World, WorldError};
pub use types::{Cell, Direction, Grid, Snake};
