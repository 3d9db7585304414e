//! Headless game loop: one agent decision per tick until the game ends.

use super::config::SimConfig;
use super::report::{GameOutcome, GameStats, SimReport};
use crate::search::{AgentKind, SnakeAgent};
use crate::world::{Cell, Grid, Snake, StepOutcome, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// Run every configured agent for `config.games` games and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_games = Vec::with_capacity(config.agents.len() * config.games as usize);

    for &kind in &config.agents {
        for game_idx in 0..config.games {
            // Each agent sees the same sequence of boards for a given seed
            let mut rng = match config.seed {
                Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(game_idx as u64)),
                None => ChaCha8Rng::from_entropy(),
            };

            let stats = play_game(config, kind, &mut rng);

            if config.verbosity >= 2 {
                println!(
                    "{} game {}/{} - {:?}, food {}, length {}, steps {}",
                    kind,
                    game_idx + 1,
                    config.games,
                    stats.outcome,
                    stats.food_eaten,
                    stats.final_length,
                    stats.steps
                );
            }
            all_games.push(stats);
        }
        info!(agent = %kind, games = config.games, "agent finished");
    }

    SimReport::from_games(config, all_games)
}

/// Opening position: a one-cell snake in the centre, food placed by `rng`.
pub fn starting_world<R: Rng>(grid: Grid, rng: &mut R) -> Option<World> {
    let start = Cell::new(grid.cols / 2 + grid.cols % 2, grid.rows / 2 + grid.rows % 2);
    let placeholder = grid.cells().find(|cell| *cell != start)?;
    let mut world = World::new(grid, Snake::new([start]), placeholder).ok()?;
    world.spawn_food(rng);
    Some(world)
}

/// Play a single game with a freshly built agent.
pub fn play_game<R: Rng>(config: &SimConfig, kind: AgentKind, rng: &mut R) -> GameStats {
    let mut agent = kind.build(config.planner);
    let grid = Grid::new(config.cols, config.rows);
    let mut stats = GameStats::new(kind);

    let Some(mut world) = starting_world(grid, rng) else {
        stats.outcome = GameOutcome::Collided;
        return stats;
    };

    let mut since_food = 0u64;
    stats.outcome = loop {
        if stats.steps >= config.max_steps_per_game {
            break GameOutcome::TimedOut;
        }
        if since_food >= config.max_steps_without_food {
            break GameOutcome::Stalled;
        }

        let Some(dir) = agent.decide(&world, rng) else {
            break GameOutcome::Trapped;
        };
        stats.steps += 1;
        since_food += 1;

        match world.step(dir) {
            StepOutcome::Moved => {}
            StepOutcome::Ate => {
                stats.food_eaten += 1;
                since_food = 0;
                if !world.spawn_food(rng) {
                    break GameOutcome::Won;
                }
            }
            StepOutcome::Collided => break GameOutcome::Collided,
        }
    };

    stats.final_length = world.snake().len();
    stats.diagnostics = agent.diagnostics();
    debug!(
        agent = %kind,
        outcome = ?stats.outcome,
        food = stats.food_eaten,
        steps = stats.steps,
        "game over"
    );
    stats
}
