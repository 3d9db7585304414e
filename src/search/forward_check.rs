//! Survival-aware agent that simulates eating before committing to it.
//!
//! Each tick it rolls the distance-field greedy policy forward on a private
//! clone of the world until the food is eaten, then asks whether the grown
//! snake can still reach its own tail. Only if it can does the live snake head
//! for the food; otherwise it stalls by chasing its tail.

use super::agent::SnakeAgent;
use super::greedy::{score_moves, select_highest_finite, select_lowest};
use crate::world::{Direction, StepOutcome, World};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Whether eating the current food leaves the snake able to reach its tail.
///
/// Runs on an owned clone and never touches `world`. The rollout is bounded
/// by the grid area; running out of steps counts as infeasible.
pub fn forward_check(world: &World) -> bool {
    let mut sim = world.clone();
    if sim.is_nearly_full() {
        return true;
    }

    let food = sim.food();
    let mut eaten = false;
    for _ in 0..sim.grid().area() {
        let field = sim.distance_field(food, &sim.snake().obstacles());
        if !sim.head_reaches(sim.snake(), &field) {
            return false;
        }
        let Some(dir) = select_lowest(&score_moves(&sim, &field)) else {
            return false;
        };
        match sim.step(dir) {
            StepOutcome::Ate => {
                eaten = true;
                break;
            }
            StepOutcome::Moved => {}
            StepOutcome::Collided => return false,
        }
    }
    if !eaten {
        return false;
    }

    let tail_field = sim.distance_field(sim.snake().tail(), &sim.snake().obstacles());
    sim.head_reaches(sim.snake(), &tail_field)
}

/// Forward-checking survival agent.
#[derive(Debug, Clone, Default)]
pub struct ForwardCheckAgent {
    /// Ticks on which eating was judged unsafe and the snake stalled.
    pub forward_check_failures: u64,
    /// Ticks with no finite path to food or tail.
    pub random_moves: u64,
}

impl ForwardCheckAgent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnakeAgent for ForwardCheckAgent {
    fn name(&self) -> &'static str {
        "forward-check"
    }

    /// Heads for food when [`forward_check`] passes. Otherwise it stalls by
    /// taking the move farthest from its own tail, so the body has time to
    /// uncoil before the food is reconsidered; only with the tail cut off
    /// does it take the longest finite path toward food.
    fn decide<R: Rng>(&mut self, world: &World, rng: &mut R) -> Option<Direction> {
        let snake = world.snake();
        let legal = world.legal_moves(snake);
        if legal.is_empty() {
            return None;
        }

        let obstacles = snake.obstacles();
        let food_field = world.distance_field(world.food(), &obstacles);
        let tail_field = world.distance_field(snake.tail(), &obstacles);
        let reaches_tail = world.head_reaches(snake, &tail_field);

        if world.head_reaches(snake, &food_field) {
            if forward_check(world) {
                debug!("eating is safe, heading for food");
                return select_lowest(&score_moves(world, &food_field));
            }
            if reaches_tail {
                self.forward_check_failures += 1;
                debug!(
                    failures = self.forward_check_failures,
                    "eating would trap the snake, following tail"
                );
                return select_highest_finite(&score_moves(world, &tail_field));
            }
            debug!("tail unreachable, taking the longest path to food");
            return select_highest_finite(&score_moves(world, &food_field));
        }

        if reaches_tail {
            debug!("food unreachable, following tail");
            return select_highest_finite(&score_moves(world, &tail_field));
        }

        warn!("no finite path to food or tail, moving randomly");
        self.random_moves += 1;
        legal.choose(rng).copied()
    }
}
