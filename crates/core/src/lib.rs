pub mod config;
pub mod planner;
pub mod rng;
pub mod types;
pub mod world;

pub use config::{ConfigError, LevelConfig};
pub use planner::{
    LevelPlanner, LevelRequest, OccupancyGrid, PlanError, PlanShortfall, Placement, PlacementPlan,
    PlannedLevel, plan_level,
};
pub use rng::{ChaChaIndexSource, FirstCandidate, IndexSource, ScriptedIndexSource};
pub use types::*;
pub use world::{PlacedEntity, PlacementSink, WorldPoint, WorldTransform};
