//! One-step greedy agents and the shared move-selection folds.
//!
//! Both agents look exactly one move ahead and can walk into a dead end;
//! the forward-checking agent exists to correct that.

use super::agent::SnakeAgent;
use super::distance::DistanceField;
use super::heuristic::manhattan;
use crate::world::{Direction, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a greedy agent scores the cell each legal move lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GreedyMetric {
    /// Straight-line grid distance to food, ignoring the body.
    Manhattan,
    /// Exact BFS distance to food around the body.
    DistanceField,
}

/// Picks the legal move whose landing cell is closest to food.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyAgent {
    pub metric: GreedyMetric,
}

impl GreedyAgent {
    pub fn new(metric: GreedyMetric) -> Self {
        Self { metric }
    }

    /// Deterministic choice; ties go to the earliest move in `Direction::ALL`.
    pub fn choose(&self, world: &World) -> Option<Direction> {
        match self.metric {
            GreedyMetric::Manhattan => {
                let head = world.snake().head();
                let scored: Vec<_> = world
                    .legal_moves(world.snake())
                    .into_iter()
                    .map(|dir| (dir, Some(manhattan(head.step(dir), world.food()))))
                    .collect();
                select_lowest(&scored)
            }
            GreedyMetric::DistanceField => {
                let field = world.distance_field(world.food(), &world.snake().obstacles());
                select_lowest(&score_moves(world, &field))
            }
        }
    }
}

impl SnakeAgent for GreedyAgent {
    fn name(&self) -> &'static str {
        match self.metric {
            GreedyMetric::Manhattan => "manhattan",
            GreedyMetric::DistanceField => "greedy",
        }
    }

    fn decide<R: Rng>(&mut self, world: &World, _rng: &mut R) -> Option<Direction> {
        self.choose(world)
    }
}

/// `(move, field value at landing cell)` for every legal move, in
/// enumeration order.
pub fn score_moves(world: &World, field: &DistanceField) -> Vec<(Direction, Option<u32>)> {
    let head = world.snake().head();
    world
        .legal_moves(world.snake())
        .into_iter()
        .map(|dir| (dir, field.get(head.step(dir))))
        .collect()
}

/// Lowest score wins; infinity ranks after every finite score; first seen
/// wins ties. `None` only for an empty list.
pub fn select_lowest(scored: &[(Direction, Option<u32>)]) -> Option<Direction> {
    let mut best: Option<(Direction, Option<u32>)> = None;
    for &(dir, score) in scored {
        let better = match best {
            None => true,
            Some((_, current)) => match (score, current) {
                (Some(s), Some(c)) => s < c,
                (Some(_), None) => true,
                _ => false,
            },
        };
        if better {
            best = Some((dir, score));
        }
    }
    best.map(|(dir, _)| dir)
}

/// Highest finite score wins; infinite moves are ignored; first seen wins
/// ties. `None` when no move has a finite score.
pub fn select_highest_finite(scored: &[(Direction, Option<u32>)]) -> Option<Direction> {
    let mut best: Option<(Direction, u32)> = None;
    for &(dir, score) in scored {
        let Some(score) = score else {
            continue;
        };
        if best.is_none_or(|(_, current)| score > current) {
            best = Some((dir, score));
        }
    }
    best.map(|(dir, _)| dir)
}
