//! Grid, snake and direction data structures.
//!
//! Cells are 1-indexed. Column `0`, column `cols + 1`, row `0` and row
//! `rows + 1` form a sentinel border ring that is never inside the grid.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Enumeration order used by every agent to break ties.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction.
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// A position on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i16,
    pub y: i16,
}

impl Cell {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`. May land on the border.
    pub fn step(self, dir: Direction) -> Cell {
        let (dx, dy) = dir.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i16,
    pub rows: i16,
}

impl Grid {
    /// Largest supported width or height. Keeps every cell, border ring
    /// included, well inside `i16` and the arena small enough to allocate.
    pub const MAX_SIDE: i16 = 1024;

    pub const fn new(cols: i16, rows: i16) -> Self {
        Self { cols, rows }
    }

    /// Number of playable cells.
    pub fn area(&self) -> usize {
        self.cols.max(0) as usize * self.rows.max(0) as usize
    }

    /// True for playable cells, false for the border ring and beyond.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 1 && cell.x <= self.cols && cell.y >= 1 && cell.y <= self.rows
    }

    /// Width of the bordered arena (playable columns plus the two sentinels).
    pub(crate) fn stride(&self) -> usize {
        self.cols.max(0) as usize + 2
    }

    /// Arena slot for a cell on or inside the border ring.
    pub(crate) fn index(&self, cell: Cell) -> Option<usize> {
        let (x, y) = (i32::from(cell.x), i32::from(cell.y));
        if x < 0 || y < 0 || x > i32::from(self.cols) + 1 || y > i32::from(self.rows) + 1 {
            return None;
        }
        Some(cell.y as usize * self.stride() + cell.x as usize)
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.stride() * (self.rows.max(0) as usize + 2)
    }

    /// Every playable cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (1..=self.rows).flat_map(move |y| (1..=self.cols).map(move |x| Cell::new(x, y)))
    }
}

/// The snake body. Head is at the front (index 0), tail at the back.
///
/// Doubles as the state-space search configuration: two snakes are equal iff
/// their segment sequences are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snake {
    pub body: VecDeque<Cell>,
}

impl Snake {
    /// Build a snake from head-first segments.
    pub fn new(segments: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            body: segments.into_iter().collect(),
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// The segment right behind the head, if any.
    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.body.contains(cell)
    }

    /// Cells that block movement this tick: every segment except the tail,
    /// which vacates as the head advances.
    pub fn obstacles(&self) -> Vec<Cell> {
        let keep = self.body.len().saturating_sub(1);
        self.body.iter().take(keep).copied().collect()
    }

    /// Direction from the neck to the head, if the snake has a neck.
    pub fn heading(&self) -> Option<Direction> {
        let neck = self.neck()?;
        let head = self.head();
        Direction::ALL.into_iter().find(|d| neck.step(*d) == head)
    }
}
