//! World rules: legal moves, move application, stepping and food placement.

use super::types::{Cell, Direction, Grid, Snake};
use crate::search::distance::DistanceField;
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Reasons a world snapshot cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("grid sides must be between 1 and 1024, got {cols}x{rows}")]
    InvalidGrid { cols: i16, rows: i16 },
    #[error("snake has no segments")]
    EmptySnake,
    #[error("snake segment ({x}, {y}) lies outside the grid")]
    SegmentOutOfBounds { x: i16, y: i16 },
    #[error("snake segments {index} and {next} are not adjacent")]
    DisconnectedSnake { index: usize, next: usize },
    #[error("snake occupies ({x}, {y}) more than once")]
    OverlappingSnake { x: i16, y: i16 },
    #[error("food at ({x}, {y}) lies outside the grid")]
    FoodOutOfBounds { x: i16, y: i16 },
    #[error("food at ({x}, {y}) lies on the snake")]
    FoodOnSnake { x: i16, y: i16 },
}

/// Result of advancing the live snake one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// The move was illegal; the world is unchanged.
    Collided,
}

/// A snapshot of the board: dimensions, snake and food.
///
/// `Clone` produces a fully independent copy; the snake owns its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    grid: Grid,
    snake: Snake,
    food: Cell,
}

impl World {
    /// Build a validated world.
    pub fn new(grid: Grid, snake: Snake, food: Cell) -> Result<Self, WorldError> {
        if !(1..=Grid::MAX_SIDE).contains(&grid.cols) || !(1..=Grid::MAX_SIDE).contains(&grid.rows) {
            return Err(WorldError::InvalidGrid {
                cols: grid.cols,
                rows: grid.rows,
            });
        }
        if snake.is_empty() {
            return Err(WorldError::EmptySnake);
        }
        for (i, seg) in snake.body.iter().enumerate() {
            if !grid.contains(*seg) {
                return Err(WorldError::SegmentOutOfBounds { x: seg.x, y: seg.y });
            }
            if snake.body.iter().skip(i + 1).any(|other| other == seg) {
                return Err(WorldError::OverlappingSnake { x: seg.x, y: seg.y });
            }
            if let Some(next) = snake.body.get(i + 1) {
                let gap = (seg.x - next.x).abs() + (seg.y - next.y).abs();
                if gap != 1 {
                    return Err(WorldError::DisconnectedSnake { index: i, next: i + 1 });
                }
            }
        }
        if !grid.contains(food) {
            return Err(WorldError::FoodOutOfBounds {
                x: food.x,
                y: food.y,
            });
        }
        if snake.contains(&food) {
            return Err(WorldError::FoodOnSnake {
                x: food.x,
                y: food.y,
            });
        }
        Ok(Self { grid, snake, food })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// True once the snake covers every cell but one; eating then wins.
    pub fn is_nearly_full(&self) -> bool {
        self.snake.len() + 1 >= self.grid.area()
    }

    /// Legal moves for `snake`, in `Direction::ALL` order.
    ///
    /// Excludes reversal into the neck, border exits and body collisions.
    /// The tail cell counts as free because it vacates this tick.
    pub fn legal_moves(&self, snake: &Snake) -> Vec<Direction> {
        let head = snake.head();
        let neck = snake.neck();
        let blocking = snake.len().saturating_sub(1);
        Direction::ALL
            .into_iter()
            .filter(|dir| {
                let next = head.step(*dir);
                Some(next) != neck
                    && self.grid.contains(next)
                    && !snake.body.iter().take(blocking).any(|seg| *seg == next)
            })
            .collect()
    }

    /// Pure successor: the snake after moving `dir`, grown by one iff the new
    /// head lands on this world's food. Legality is the caller's concern.
    pub fn apply_move(&self, snake: &Snake, dir: Direction) -> Snake {
        let mut next = snake.clone();
        let new_head = snake.head().step(dir);
        next.body.push_front(new_head);
        if new_head != self.food {
            next.body.pop_back();
        }
        next
    }

    /// Distance field over this grid from `source`, treating `blocked` as walls.
    pub fn distance_field(&self, source: Cell, blocked: &[Cell]) -> DistanceField {
        DistanceField::compute(self.grid, source, blocked)
    }

    /// Whether the head of `snake` can step onto a finite cell of `field`.
    pub fn head_reaches(&self, snake: &Snake, field: &DistanceField) -> bool {
        let head = snake.head();
        self.legal_moves(snake)
            .into_iter()
            .any(|dir| field.get(head.step(dir)).is_some())
    }

    /// Advance the live snake. Illegal moves leave the world untouched.
    pub fn step(&mut self, dir: Direction) -> StepOutcome {
        if !self.legal_moves(&self.snake).contains(&dir) {
            return StepOutcome::Collided;
        }
        let ate = self.snake.head().step(dir) == self.food;
        self.snake = self.apply_move(&self.snake, dir);
        if ate {
            StepOutcome::Ate
        } else {
            StepOutcome::Moved
        }
    }

    /// Playable cells not covered by the snake.
    pub fn free_cells(&self) -> Vec<Cell> {
        self.grid
            .cells()
            .filter(|cell| !self.snake.contains(cell))
            .collect()
    }

    /// Place food on a uniformly random free cell. Returns false when the
    /// board is full.
    pub fn spawn_food<R: Rng>(&mut self, rng: &mut R) -> bool {
        let free = self.free_cells();
        match free.choose(rng) {
            Some(cell) => {
                self.food = *cell;
                true
            }
            None => false,
        }
    }
}
