//! Integration test: every agent on hand-built boards
//!
//! Covers the open-board approach, the tail trap that separates the
//! forward-checking agent from plain greedy, and the boxed-in case.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_search::search::{forward_check, PlannerConfig, StateSpacePlanner};
use snake_search::{AgentKind, Cell, Direction, Grid, Snake, SnakeAgent, StepOutcome, World};

fn world(snake: &[(i16, i16)], food: (i16, i16), cols: i16, rows: i16) -> World {
    let snake = Snake::new(snake.iter().map(|&(x, y)| Cell::new(x, y)));
    World::new(Grid::new(cols, rows), snake, Cell::new(food.0, food.1)).unwrap()
}

#[test]
fn test_every_agent_heads_straight_for_food() {
    // 5x5, head in the top-left corner, food two cells to the right.
    let w = world(&[(1, 1)], (3, 1), 5, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for kind in AgentKind::ALL {
        let mut agent = kind.build(PlannerConfig::default());
        assert_eq!(
            agent.decide(&w, &mut rng),
            Some(Direction::Right),
            "agent {kind}"
        );
        assert_eq!(agent.diagnostics(), 0, "agent {kind}");
    }
}

#[test]
fn test_planners_find_two_move_plan() {
    let w = world(&[(1, 1)], (3, 1), 5, 5);
    for planner in [
        StateSpacePlanner::breadth_first(PlannerConfig::default()),
        StateSpacePlanner::astar(PlannerConfig::default()),
    ] {
        let plan = planner.plan(&w).unwrap();
        assert_eq!(plan.moves, vec![Direction::Right, Direction::Right]);
    }
}

#[test]
fn test_following_a_plan_eats_the_food() {
    let w = world(&[(3, 3), (3, 4), (2, 4)], (5, 1), 6, 6);
    let plan = StateSpacePlanner::astar(PlannerConfig::default())
        .plan(&w)
        .unwrap();

    let mut sim = w.clone();
    let mut outcomes = Vec::new();
    for dir in &plan.moves {
        outcomes.push(sim.step(*dir));
    }
    assert_eq!(outcomes.last(), Some(&StepOutcome::Ate));
    assert!(outcomes[..outcomes.len() - 1]
        .iter()
        .all(|o| *o == StepOutcome::Moved));
    assert_eq!(sim.snake().len(), w.snake().len() + 1);
    // the planned-from world is untouched
    assert_eq!(w.snake().head(), Cell::new(3, 3));
}

#[test]
fn test_forward_check_avoids_tail_trap() {
    // 4x3 board:
    //   . . . .
    //   H T . .
    //   B B F .
    let w = world(&[(1, 2), (1, 3), (2, 3), (2, 2)], (3, 3), 4, 3);
    assert!(!forward_check(&w));

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut greedy = AgentKind::Greedy.build(PlannerConfig::default());
    assert_eq!(greedy.decide(&w, &mut rng), Some(Direction::Right));

    let mut careful = AgentKind::ForwardCheck.build(PlannerConfig::default());
    assert_eq!(careful.decide(&w, &mut rng), Some(Direction::Up));
    assert_eq!(careful.diagnostics(), 1);
}

#[test]
fn test_boxed_in_snake_gets_no_move_from_any_agent() {
    let w = world(&[(1, 1), (2, 1)], (3, 1), 3, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for kind in AgentKind::ALL {
        let mut agent = kind.build(PlannerConfig::default());
        assert_eq!(agent.decide(&w, &mut rng), None, "agent {kind}");
    }
}

#[test]
fn test_oversized_grid_falls_back_to_legal_move() {
    let w = world(&[(5, 5), (5, 6)], (1, 1), 12, 12);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for kind in [AgentKind::Bfs, AgentKind::Astar] {
        let mut agent = kind.build(PlannerConfig::default());
        let dir = agent.decide(&w, &mut rng).unwrap();
        assert!(w.legal_moves(w.snake()).contains(&dir));
        assert_eq!(agent.diagnostics(), 1);
    }
}

#[test]
fn test_distance_field_is_stable_across_calls() {
    let w = world(&[(2, 2), (2, 3), (3, 3), (4, 3)], (4, 1), 5, 4);
    let blocked = w.snake().obstacles();
    let first = w.distance_field(w.food(), &blocked);
    let second = w.distance_field(w.food(), &blocked);
    assert_eq!(first, second);
    assert_eq!(first.get(w.food()), Some(0));
    // border cells are never reachable
    assert_eq!(first.get(Cell::new(0, 1)), None);
}
