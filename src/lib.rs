//! Snake Search - agents that steer a snake across a bounded grid.
//!
//! The [`world`] module holds the board, the snake and the movement rules.
//! [`search`] provides the decision strategies: a Manhattan greedy, a
//! distance-field greedy, BFS and A* state-space planners, and a
//! forward-checking agent that refuses food it cannot survive eating.
//! [`simulator`] plays headless batches of games and reports on them.

pub mod search;
pub mod simulator;
pub mod world;

pub use search::{Agent, AgentKind, SearchError, SnakeAgent};
pub use world::{Cell, Direction, Grid, Snake, StepOutcome, World, WorldError};
