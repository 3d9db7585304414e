//! Full state-space planners over snake configurations.
//!
//! Each search state is the whole ordered body. The goal is any configuration
//! one segment longer than the start, i.e. the food has been eaten. The state
//! space is exponential in the number of free cells, so both planners run
//! under a [`PlannerConfig`] bound and fall back to a random legal move when
//! the bound is hit or the search fails.

use super::agent::SnakeAgent;
use super::heuristic::manhattan;
use crate::world::{Direction, Snake, World};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use thiserror::Error;
use tracing::{debug, warn};

/// Resource bounds for a single planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Largest `(cols, rows)` the planner accepts. `None` disables the guard
    /// and leaves `max_expansions` as the only bound.
    pub max_grid: Option<(i16, i16)>,
    /// Configurations expanded before giving up.
    pub max_expansions: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_grid: Some((8, 8)),
            max_expansions: 250_000,
        }
    }
}

impl PlannerConfig {
    /// Any grid size, bounded only by expanded node count.
    pub fn budget_only(max_expansions: usize) -> Self {
        Self {
            max_grid: None,
            max_expansions,
        }
    }
}

/// Why a planner produced no plan. `decide` recovers from all of them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("snake has no legal move")]
    NoLegalMove,
    #[error("grid {cols}x{rows} exceeds the {max_cols}x{max_rows} search bound")]
    UnsupportedGridSize {
        cols: i16,
        rows: i16,
        max_cols: i16,
        max_rows: i16,
    },
    #[error("expansion budget of {0} configurations exceeded")]
    BudgetExceeded(usize),
    #[error("no reachable configuration eats the food ({expanded} expanded)")]
    Exhausted { expanded: usize },
}

/// A move sequence that ends with the food eaten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub moves: Vec<Direction>,
    /// Configurations expanded while searching.
    pub expanded: usize,
}

impl Plan {
    pub fn first(&self) -> Option<Direction> {
        self.moves.first().copied()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Fringe discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    BreadthFirst,
    AStar,
}

/// State-space planning agent (BFS or A*).
#[derive(Debug, Clone)]
pub struct StateSpacePlanner {
    pub strategy: Strategy,
    pub config: PlannerConfig,
    /// Times `decide` fell back to a random move.
    pub fallbacks: u64,
}

impl StateSpacePlanner {
    pub fn new(strategy: Strategy, config: PlannerConfig) -> Self {
        Self {
            strategy,
            config,
            fallbacks: 0,
        }
    }

    pub fn breadth_first(config: PlannerConfig) -> Self {
        Self::new(Strategy::BreadthFirst, config)
    }

    pub fn astar(config: PlannerConfig) -> Self {
        Self::new(Strategy::AStar, config)
    }

    /// Shortest move sequence from the current configuration to eating.
    pub fn plan(&self, world: &World) -> Result<Plan, SearchError> {
        let grid = world.grid();
        if let Some((max_cols, max_rows)) = self.config.max_grid {
            if grid.cols > max_cols || grid.rows > max_rows {
                return Err(SearchError::UnsupportedGridSize {
                    cols: grid.cols,
                    rows: grid.rows,
                    max_cols,
                    max_rows,
                });
            }
        }
        if world.legal_moves(world.snake()).is_empty() {
            return Err(SearchError::NoLegalMove);
        }
        match self.strategy {
            Strategy::BreadthFirst => breadth_first(world, self.config.max_expansions),
            Strategy::AStar => astar(world, self.config.max_expansions),
        }
    }
}

impl SnakeAgent for StateSpacePlanner {
    fn name(&self) -> &'static str {
        match self.strategy {
            Strategy::BreadthFirst => "bfs",
            Strategy::AStar => "astar",
        }
    }

    fn decide<R: Rng>(&mut self, world: &World, rng: &mut R) -> Option<Direction> {
        let legal = world.legal_moves(world.snake());
        if legal.is_empty() {
            return None;
        }
        match self.plan(world) {
            Ok(plan) => {
                debug!(
                    planner = self.name(),
                    length = plan.len(),
                    expanded = plan.expanded,
                    "plan found"
                );
                plan.first()
            }
            Err(err) => {
                if matches!(err, SearchError::Exhausted { .. }) {
                    debug!(planner = self.name(), %err, "falling back to a random move");
                } else {
                    warn!(planner = self.name(), %err, "falling back to a random move");
                }
                self.fallbacks += 1;
                legal.choose(rng).copied()
            }
        }
    }
}

/// FIFO search. Configurations are marked visited when enqueued.
fn breadth_first(world: &World, max_expansions: usize) -> Result<Plan, SearchError> {
    let start = world.snake().clone();
    let goal_len = start.len() + 1;

    let mut visited: HashSet<Snake> = HashSet::new();
    let mut fringe: VecDeque<(Snake, Vec<Direction>)> = VecDeque::new();
    visited.insert(start.clone());
    fringe.push_back((start, Vec::new()));

    let mut expanded = 0;
    while let Some((config, moves)) = fringe.pop_front() {
        if config.len() == goal_len {
            return Ok(Plan { moves, expanded });
        }
        if expanded >= max_expansions {
            return Err(SearchError::BudgetExceeded(max_expansions));
        }
        expanded += 1;

        for dir in world.legal_moves(&config) {
            let next = world.apply_move(&config, dir);
            if !visited.insert(next.clone()) {
                continue;
            }
            let mut path = moves.clone();
            path.push(dir);
            fringe.push_back((next, path));
        }
    }

    Err(SearchError::Exhausted { expanded })
}

/// Fringe entry ordered by lowest `f`, then earliest insertion.
struct Node {
    f: u32,
    seq: u64,
    g: u32,
    config: Snake,
    moves: Vec<Direction>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // BinaryHeap is a max-heap; reverse so the smallest (f, seq) pops first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Remaining-cost estimate: 0 once eaten, otherwise head-to-food distance.
fn estimate(world: &World, config: &Snake, goal_len: usize) -> u32 {
    if config.len() == goal_len {
        0
    } else {
        manhattan(config.head(), world.food())
    }
}

/// Best-first search on `g + h` with unit step cost. Closed on pop.
fn astar(world: &World, max_expansions: usize) -> Result<Plan, SearchError> {
    let start = world.snake().clone();
    let goal_len = start.len() + 1;

    let mut closed: HashSet<Snake> = HashSet::new();
    let mut fringe = BinaryHeap::new();
    let mut seq = 0u64;
    fringe.push(Node {
        f: estimate(world, &start, goal_len),
        seq,
        g: 0,
        config: start,
        moves: Vec::new(),
    });

    let mut expanded = 0;
    while let Some(node) = fringe.pop() {
        if node.config.len() == goal_len {
            return Ok(Plan {
                moves: node.moves,
                expanded,
            });
        }
        if closed.contains(&node.config) {
            continue;
        }
        if expanded >= max_expansions {
            return Err(SearchError::BudgetExceeded(max_expansions));
        }
        expanded += 1;

        for dir in world.legal_moves(&node.config) {
            let next = world.apply_move(&node.config, dir);
            if closed.contains(&next) {
                continue;
            }
            let g = node.g + 1;
            let mut moves = node.moves.clone();
            moves.push(dir);
            seq += 1;
            fringe.push(Node {
                f: g + estimate(world, &next, goal_len),
                seq,
                g,
                config: next,
                moves,
            });
        }
        closed.insert(node.config);
    }

    Err(SearchError::Exhausted { expanded })
}
