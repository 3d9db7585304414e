//! Cost estimates for 4-connected unit-cost grids.

use crate::world::Cell;

/// Manhattan distance between two cells. Admissible and consistent on a
/// 4-connected grid, so it never overstates the true remaining cost.
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) as u32 + a.y.abs_diff(b.y) as u32
}
