//! The decision interface shared by every strategy.

use super::forward_check::ForwardCheckAgent;
use super::greedy::{GreedyAgent, GreedyMetric};
use super::planner::{PlannerConfig, StateSpacePlanner, Strategy};
use crate::world::{Direction, World};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One decision per tick: a move, or `None` when the snake is boxed in.
///
/// Agents never mutate `world`. Randomised fallbacks draw from `rng` so runs
/// are reproducible under a fixed seed.
pub trait SnakeAgent {
    fn name(&self) -> &'static str;

    fn decide<R: Rng>(&mut self, world: &World, rng: &mut R) -> Option<Direction>;
}

/// Every available strategy, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    Manhattan,
    Greedy,
    Bfs,
    Astar,
    ForwardCheck,
}

impl AgentKind {
    pub const ALL: [AgentKind; 5] = [
        AgentKind::Manhattan,
        AgentKind::Greedy,
        AgentKind::Bfs,
        AgentKind::Astar,
        AgentKind::ForwardCheck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Greedy => "greedy",
            Self::Bfs => "bfs",
            Self::Astar => "astar",
            Self::ForwardCheck => "forward-check",
        }
    }

    /// Build a fresh agent; `planner` only matters for BFS and A*.
    pub fn build(&self, planner: PlannerConfig) -> Agent {
        match self {
            Self::Manhattan => Agent::Greedy(GreedyAgent::new(GreedyMetric::Manhattan)),
            Self::Greedy => Agent::Greedy(GreedyAgent::new(GreedyMetric::DistanceField)),
            Self::Bfs => Agent::Planner(StateSpacePlanner::new(Strategy::BreadthFirst, planner)),
            Self::Astar => Agent::Planner(StateSpacePlanner::new(Strategy::AStar, planner)),
            Self::ForwardCheck => Agent::ForwardCheck(ForwardCheckAgent::new()),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .or(match wanted.as_str() {
                "a*" | "a-star" => Some(AgentKind::Astar),
                "forward" | "fc" => Some(AgentKind::ForwardCheck),
                _ => None,
            })
            .ok_or_else(|| format!("unknown agent '{}'", s))
    }
}

/// A constructed agent of any kind.
#[derive(Debug, Clone)]
pub enum Agent {
    Greedy(GreedyAgent),
    Planner(StateSpacePlanner),
    ForwardCheck(ForwardCheckAgent),
}

impl Agent {
    /// Diagnostic counter: planner fallbacks, or forward-check stalls.
    pub fn diagnostics(&self) -> u64 {
        match self {
            Agent::Greedy(_) => 0,
            Agent::Planner(p) => p.fallbacks,
            Agent::ForwardCheck(f) => f.forward_check_failures,
        }
    }
}

impl SnakeAgent for Agent {
    fn name(&self) -> &'static str {
        match self {
            Agent::Greedy(a) => a.name(),
            Agent::Planner(a) => a.name(),
            Agent::ForwardCheck(a) => a.name(),
        }
    }

    fn decide<R: Rng>(&mut self, world: &World, rng: &mut R) -> Option<Direction> {
        match self {
            Agent::Greedy(a) => a.decide(world, rng),
            Agent::Planner(a) => a.decide(world, rng),
            Agent::ForwardCheck(a) => a.decide(world, rng),
        }
    }
}
