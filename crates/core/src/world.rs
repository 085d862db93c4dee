//! Cell-to-world mapping and the hand-off seam to whatever instantiates placed entities.

use serde::{Deserialize, Serialize};

use crate::types::{OccupantKind, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldTransform {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl WorldTransform {
    pub const UNIT: WorldTransform = WorldTransform { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
    /// Spacing used when each cell stands for a whole room.
    pub const ROOM_GRID: WorldTransform =
        WorldTransform { scale: 10.0, offset_x: 0.0, offset_y: 0.0 };

    pub fn to_world(&self, pos: Pos) -> WorldPoint {
        WorldPoint {
            x: self.offset_x + self.scale * pos.x as f32,
            y: self.offset_y + self.scale * pos.y as f32,
        }
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

/// Receives committed placements in plan order, e.g. to spawn engine objects.
pub trait PlacementSink {
    fn place(&mut self, kind: OccupantKind, cell: Pos, world: WorldPoint);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlacedEntity {
    pub kind: OccupantKind,
    pub cell: Pos,
    pub world: WorldPoint,
}

impl PlacementSink for Vec<PlacedEntity> {
    fn place(&mut self, kind: OccupantKind, cell: Pos, world: WorldPoint) {
        self.push(PlacedEntity { kind, cell, world });
    }
}
