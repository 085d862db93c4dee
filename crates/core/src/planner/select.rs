//! Candidate-cell selection rules. Each returns `None` when nothing qualifies.

use crate::rng::IndexSource;
use crate::types::Pos;

use super::grid::OccupancyGrid;

pub fn adjacent_empty(
    grid: &OccupancyGrid,
    origin: Pos,
    rng: &mut impl IndexSource,
) -> Option<Pos> {
    let candidates: Vec<Pos> =
        origin.neighbors().into_iter().filter(|pos| grid.is_empty(*pos)).collect();
    pick(&candidates, rng)
}

/// Point reflection of `pos` through the grid centre.
pub fn opposite_position(grid: &OccupancyGrid, pos: Pos) -> Pos {
    Pos { y: grid.height() as i32 - 1 - pos.y, x: grid.width() as i32 - 1 - pos.x }
}

pub fn opposite_empty(grid: &OccupancyGrid, origin: Pos) -> Option<Pos> {
    let opposite = opposite_position(grid, origin);
    grid.is_empty(opposite).then_some(opposite)
}

pub fn random_empty(grid: &OccupancyGrid, rng: &mut impl IndexSource) -> Option<Pos> {
    pick(&grid.empty_cells(), rng)
}

fn pick(candidates: &[Pos], rng: &mut impl IndexSource) -> Option<Pos> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.next_index(candidates.len())).copied()
}
