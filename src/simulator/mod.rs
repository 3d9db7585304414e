//! Headless simulator for comparing agents.
//!
//! Plays complete games without any UI: the agent picks a move each tick,
//! the world advances, and food respawns on a random free cell. Seeded runs
//! are reproducible, so agents can be compared on identical boards.

mod config;
mod report;
mod runner;

pub use config::{ConfigError, SimConfig};
pub use report::{AgentSummary, GameOutcome, GameStats, SimReport};
pub use runner::{play_game, run_simulation, starting_world};
