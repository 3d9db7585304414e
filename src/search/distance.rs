//! Single-source breadth-first distance fields.

use crate::world::{Cell, Direction, Grid};
use std::collections::VecDeque;

/// Shortest hop counts from one source cell, respecting obstacles.
///
/// Stored as an arena over the bordered grid. `None` means unreachable:
/// border cells, blocked cells and cells the search never reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    grid: Grid,
    distances: Vec<Option<u32>>,
}

impl DistanceField {
    /// FIFO breadth-first traversal from `source`. Cells in `blocked` are
    /// never expanded; the source itself is always 0 when it lies inside the
    /// grid.
    pub fn compute(grid: Grid, source: Cell, blocked: &[Cell]) -> Self {
        let mut distances = vec![None; grid.arena_len()];
        let mut walls = vec![false; grid.arena_len()];
        for cell in blocked {
            if let Some(idx) = grid.index(*cell) {
                walls[idx] = true;
            }
        }

        let mut queue = VecDeque::new();
        if grid.contains(source) {
            if let Some(idx) = grid.index(source) {
                distances[idx] = Some(0);
                queue.push_back((source, 0u32));
            }
        }

        while let Some((cur, dist)) = queue.pop_front() {
            for dir in Direction::ALL {
                let next = cur.step(dir);
                if !grid.contains(next) {
                    continue;
                }
                let Some(idx) = grid.index(next) else {
                    continue;
                };
                if walls[idx] || distances[idx].is_some() {
                    continue;
                }
                distances[idx] = Some(dist + 1);
                queue.push_back((next, dist + 1));
            }
        }

        Self {
            grid,
            distances,
        }
    }

    /// Distance to `cell`, or `None` if it is unreachable or off the board.
    pub fn get(&self, cell: Cell) -> Option<u32> {
        if !self.grid.contains(cell) {
            return None;
        }
        self.grid.index(cell).and_then(|idx| self.distances[idx])
    }

    /// Number of cells with a finite distance (the source included).
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::heuristic::manhattan;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Bellman-Ford style relaxation over the open cells, used as an oracle.
    fn brute_force(grid: Grid, source: Cell, blocked: &[Cell]) -> Vec<(Cell, Option<u32>)> {
        let cells: Vec<Cell> = grid.cells().collect();
        let open = |c: &Cell| !blocked.contains(c) || *c == source;
        let mut dist: Vec<Option<u32>> = cells
            .iter()
            .map(|c| if *c == source { Some(0) } else { None })
            .collect();
        loop {
            let mut changed = false;
            for (i, cell) in cells.iter().enumerate() {
                if !open(cell) || *cell == source {
                    continue;
                }
                for (j, other) in cells.iter().enumerate() {
                    let adjacent = cell.x.abs_diff(other.x) + cell.y.abs_diff(other.y) == 1;
                    if !adjacent || !open(other) {
                        continue;
                    }
                    if let Some(d) = dist[j] {
                        if dist[i].is_none_or(|cur| d + 1 < cur) {
                            dist[i] = Some(d + 1);
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        cells.into_iter().zip(dist).collect()
    }

    #[test]
    fn test_open_grid_matches_manhattan() {
        let grid = Grid::new(5, 5);
        let source = Cell::new(3, 1);
        let field = DistanceField::compute(grid, source, &[]);
        for cell in grid.cells() {
            assert_eq!(field.get(cell), Some(manhattan(cell, source)));
        }
        assert_eq!(field.reachable_count(), 25);
    }

    #[test]
    fn test_border_and_blocked_cells_are_infinite() {
        let grid = Grid::new(4, 4);
        let blocked = [Cell::new(2, 2)];
        let field = DistanceField::compute(grid, Cell::new(1, 1), &blocked);
        assert_eq!(field.get(Cell::new(0, 1)), None);
        assert_eq!(field.get(Cell::new(5, 5)), None);
        assert_eq!(field.get(Cell::new(2, 2)), None);
        assert_eq!(field.get(Cell::new(3, 3)), Some(4));
    }

    #[test]
    fn test_walled_off_region_is_unreached() {
        // Column 2 fully blocked splits a 3x3 grid
        let grid = Grid::new(3, 3);
        let blocked = [Cell::new(2, 1), Cell::new(2, 2), Cell::new(2, 3)];
        let field = DistanceField::compute(grid, Cell::new(1, 1), &blocked);
        assert_eq!(field.get(Cell::new(1, 3)), Some(2));
        assert_eq!(field.get(Cell::new(3, 1)), None);
        assert_eq!(field.reachable_count(), 3);
    }

    #[test]
    fn test_source_on_border_reaches_nothing() {
        let field = DistanceField::compute(Grid::new(3, 3), Cell::new(0, 2), &[]);
        assert_eq!(field.reachable_count(), 0);
    }

    #[test]
    fn test_blocked_source_still_expands() {
        let grid = Grid::new(3, 1);
        let field = DistanceField::compute(grid, Cell::new(1, 1), &[Cell::new(1, 1)]);
        assert_eq!(field.get(Cell::new(1, 1)), Some(0));
        assert_eq!(field.get(Cell::new(3, 1)), Some(2));
    }

    #[test]
    fn test_matches_brute_force_on_random_obstacles() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..60 {
            let grid = Grid::new(rng.gen_range(1..=6), rng.gen_range(1..=6));
            let cells: Vec<Cell> = grid.cells().collect();
            let blocked: Vec<Cell> = cells
                .iter()
                .copied()
                .filter(|_| rng.gen_bool(0.3))
                .collect();
            let source = cells[rng.gen_range(0..cells.len())];

            let field = DistanceField::compute(grid, source, &blocked);
            for (cell, expected) in brute_force(grid, source, &blocked) {
                assert_eq!(field.get(cell), expected, "cell {:?} from {:?}", cell, source);
            }
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let grid = Grid::new(6, 4);
        let blocked = vec![Cell::new(3, 1), Cell::new(3, 2), Cell::new(3, 3)];
        let snapshot = blocked.clone();
        let first = DistanceField::compute(grid, Cell::new(1, 1), &blocked);
        let second = DistanceField::compute(grid, Cell::new(1, 1), &blocked);
        assert_eq!(first, second);
        assert_eq!(blocked, snapshot);
    }
}
