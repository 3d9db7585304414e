//! Move-selection strategies.
//!
//! From cheapest to most careful: one-step greedy (Manhattan or distance
//! field), full state-space planning (BFS, A*), and the forward-checking
//! survival agent.

pub mod agent;
pub mod distance;
pub mod forward_check;
pub mod greedy;
pub mod heuristic;
pub mod planner;

pub use agent::{Agent, AgentKind, SnakeAgent};
pub use distance::DistanceField;
pub use forward_check::{forward_check, ForwardCheckAgent};
pub use greedy::{GreedyAgent, GreedyMetric};
pub use heuristic::manhattan;
pub use planner::{Plan, PlannerConfig, SearchError, StateSpacePlanner, Strategy};
