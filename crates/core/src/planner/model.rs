//! Public data models for level requests, placement plans, and planning output.

use serde::{Deserialize, Serialize};

use crate::types::{OccupantKind, Pos};

use super::grid::OccupancyGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LevelRequest {
    pub width: usize,
    pub height: usize,
    pub wall_count: usize,
    pub enemy_count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub kind: OccupantKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPlan {
    request: LevelRequest,
    placements: Vec<Placement>,
}

/// Placements that were requested but could not be committed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PlanShortfall {
    pub player: usize,
    pub enemies: usize,
    pub walls: usize,
}

impl PlanShortfall {
    pub fn is_empty(&self) -> bool {
        self.player == 0 && self.enemies == 0 && self.walls == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedLevel {
    pub plan: PlacementPlan,
    pub grid: OccupancyGrid,
}

impl PlacementPlan {
    pub(super) fn new(request: LevelRequest) -> Self {
        Self { request, placements: Vec::new() }
    }

    pub(super) fn push(&mut self, kind: OccupantKind, pos: Pos) {
        self.placements.push(Placement { kind, pos });
    }

    pub fn request(&self) -> &LevelRequest {
        &self.request
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn count(&self, kind: OccupantKind) -> usize {
        self.placements.iter().filter(|placement| placement.kind == kind).count()
    }

    pub fn positions_of(&self, kind: OccupantKind) -> impl Iterator<Item = Pos> + '_ {
        self.placements
            .iter()
            .filter(move |placement| placement.kind == kind)
            .map(|placement| placement.pos)
    }

    pub fn position_of(&self, kind: OccupantKind) -> Option<Pos> {
        self.positions_of(kind).next()
    }

    pub fn shortfall(&self) -> PlanShortfall {
        PlanShortfall {
            player: 1_usize.saturating_sub(self.count(OccupantKind::Player)),
            enemies: self.request.enemy_count.saturating_sub(self.count(OccupantKind::Enemy)),
            walls: self.request.wall_count.saturating_sub(self.count(OccupantKind::Wall)),
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.request.width as u32).to_le_bytes());
        bytes.extend((self.request.height as u32).to_le_bytes());
        bytes.extend((self.request.wall_count as u32).to_le_bytes());
        bytes.extend((self.request.enemy_count as u32).to_le_bytes());

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            bytes.push(placement.kind.code());
            bytes.extend(placement.pos.y.to_le_bytes());
            bytes.extend(placement.pos.x.to_le_bytes());
        }

        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LevelRequest {
        LevelRequest { width: 5, height: 5, wall_count: 3, enemy_count: 2 }
    }

    #[test]
    fn shortfall_counts_missing_player_enemies_and_walls() {
        let mut plan = PlacementPlan::new(request());
        plan.push(OccupantKind::Base, Pos { y: 1, x: 2 });
        plan.push(OccupantKind::Enemy, Pos { y: 3, x: 2 });
        plan.push(OccupantKind::Wall, Pos { y: 1, x: 1 });

        assert_eq!(plan.shortfall(), PlanShortfall { player: 1, enemies: 1, walls: 2 });
        assert!(!plan.shortfall().is_empty());
    }

    #[test]
    fn canonical_bytes_reflect_placement_order() {
        let mut first = PlacementPlan::new(request());
        first.push(OccupantKind::Wall, Pos { y: 1, x: 1 });
        first.push(OccupantKind::Wall, Pos { y: 2, x: 1 });

        let mut second = PlacementPlan::new(request());
        second.push(OccupantKind::Wall, Pos { y: 2, x: 1 });
        second.push(OccupantKind::Wall, Pos { y: 1, x: 1 });

        assert_ne!(first.canonical_bytes(), second.canonical_bytes());
        assert_eq!(first.canonical_bytes(), first.clone().canonical_bytes());
    }

    #[test]
    fn plan_serializes_as_ordered_records() {
        let mut plan = PlacementPlan::new(request());
        plan.push(OccupantKind::Base, Pos { y: 1, x: 2 });
        let json = serde_json::to_value(&plan).expect("plan should serialize");
        assert_eq!(json["placements"][0]["kind"], "Base");
        assert_eq!(json["placements"][0]["pos"]["x"], 2);
        assert_eq!(json["request"]["wall_count"], 3);
    }
}
