//! Paced emission of a finished plan to an external collaborator.

use std::slice::Chunks;

use crate::world::{PlacementSink, WorldTransform};

use super::model::{Placement, PlacementPlan};

impl PlacementPlan {
    /// Splits the plan into per-frame batches of at most `budget` placements.
    /// Each call starts over from the first placement.
    pub fn frames(&self, budget: usize) -> Chunks<'_, Placement> {
        self.placements().chunks(budget.max(1))
    }

    pub fn dispatch(&self, transform: &WorldTransform, sink: &mut impl PlacementSink) {
        for placement in self.placements() {
            sink.place(placement.kind, placement.pos, transform.to_world(placement.pos));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::planner::{LevelRequest, PlacementPlan, plan_level};
    use crate::rng::FirstCandidate;
    use crate::types::OccupantKind;
    use crate::world::{PlacedEntity, WorldTransform};

    fn planned() -> PlacementPlan {
        let request = LevelRequest { width: 6, height: 4, wall_count: 2, enemy_count: 1 };
        plan_level(&request, &mut FirstCandidate).expect("valid request").plan
    }

    #[test]
    fn frames_cover_the_plan_in_order_and_restart() {
        let plan = planned();
        let flattened: Vec<_> = plan.frames(3).flatten().copied().collect();
        assert_eq!(flattened, plan.placements());
        assert!(plan.frames(3).all(|frame| frame.len() <= 3));

        let first_pass: Vec<_> = plan.frames(1).map(|frame| frame[0]).collect();
        let second_pass: Vec<_> = plan.frames(1).map(|frame| frame[0]).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass.len(), plan.len());
    }

    #[test]
    fn zero_budget_still_makes_progress() {
        let plan = planned();
        assert_eq!(plan.frames(0).count(), plan.len());
    }

    #[test]
    fn dispatch_hands_every_placement_to_the_sink() {
        let plan = planned();
        let mut sink: Vec<PlacedEntity> = Vec::new();
        plan.dispatch(&WorldTransform::ROOM_GRID, &mut sink);

        assert_eq!(sink.len(), plan.len());
        assert_eq!(sink[0].kind, OccupantKind::Base);
        assert_eq!(sink[0].world.x, 30.0);
        assert_eq!(sink[0].world.y, 10.0);
    }
}
