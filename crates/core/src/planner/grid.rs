//! Dense occupancy grid the planner mutates as placements commit.

use serde::Serialize;

use crate::types::{OccupantKind, Pos};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<OccupantKind>>,
}

impl OccupancyGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![None; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }

    /// Occupant at `pos`; out-of-range positions read as unoccupied.
    pub fn get(&self, pos: Pos) -> Option<OccupantKind> {
        self.index(pos).and_then(|index| self.cells[index])
    }

    /// Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|index| self.cells[index].is_none())
    }

    /// Overwrites the cell. Returns `false` and stores nothing when `pos` is out of range.
    pub fn mark(&mut self, pos: Pos, kind: OccupantKind) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.cells[index] = Some(kind);
                true
            }
            None => false,
        }
    }

    /// Empty cells in column-major order (x outer, y inner).
    pub fn empty_cells(&self) -> Vec<Pos> {
        let mut empty = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let pos = Pos { y: y as i32, x: x as i32 };
                if self.is_empty(pos) {
                    empty.push(pos);
                }
            }
        }
        empty
    }

    pub fn count(&self, kind: OccupantKind) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(kind)).count()
    }

    pub fn is_border(&self, pos: Pos) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    pub fn border_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width)
                .map(move |x| Pos { y: y as i32, x: x as i32 })
                .filter(|pos| self.is_border(*pos))
        })
    }
}
