//! Level layout planning: base, player, enemies, edge ring, and interior walls on a grid.

mod frames;
mod grid;
mod model;
mod select;

use thiserror::Error;
use tracing::{debug, warn};

use crate::rng::{ChaChaIndexSource, IndexSource, derive_level_seed};
use crate::types::{OccupantKind, Pos};

pub use grid::OccupancyGrid;
pub use model::{LevelRequest, Placement, PlacementPlan, PlanShortfall, PlannedLevel};
pub use select::{adjacent_empty, opposite_empty, opposite_position, random_empty};

/// Smallest width and height that fit the edge ring around the base row.
pub const MIN_DIMENSION: usize = 3;
/// Largest cell count a single grid may allocate.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("grid {width}x{height} is too small; both sides must be at least {MIN_DIMENSION}")]
    GridTooSmall { width: usize, height: usize },
    #[error("grid {width}x{height} exceeds the addressable range of {MAX_CELLS} cells")]
    GridTooLarge { width: usize, height: usize },
}

pub fn validate(request: &LevelRequest) -> Result<(), PlanError> {
    let LevelRequest { width, height, .. } = *request;
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(PlanError::GridTooSmall { width, height });
    }
    let cells = width.checked_mul(height);
    if i32::try_from(width).is_err()
        || i32::try_from(height).is_err()
        || cells.is_none_or(|cells| cells > MAX_CELLS)
    {
        return Err(PlanError::GridTooLarge { width, height });
    }
    Ok(())
}

pub fn base_position(width: usize) -> Pos {
    Pos { y: 1, x: (width / 2) as i32 }
}

pub fn plan_level(
    request: &LevelRequest,
    rng: &mut impl IndexSource,
) -> Result<PlannedLevel, PlanError> {
    validate(request)?;

    let mut grid = OccupancyGrid::new(request.width, request.height);
    let mut plan = PlacementPlan::new(*request);
    let mut commit = |grid: &mut OccupancyGrid, kind: OccupantKind, pos: Pos| {
        if grid.mark(pos, kind) {
            plan.push(kind, pos);
        }
    };

    let base = base_position(request.width);
    commit(&mut grid, OccupantKind::Base, base);

    match adjacent_empty(&grid, base, rng) {
        Some(player) => commit(&mut grid, OccupantKind::Player, player),
        None => warn!(?base, "no empty cell next to the base; player skipped"),
    }

    // The mirror cell never moves, so only the first pass can succeed.
    for _ in 0..request.enemy_count {
        match opposite_empty(&grid, base) {
            Some(enemy) => commit(&mut grid, OccupantKind::Enemy, enemy),
            None => break,
        }
    }

    let (last_x, last_y) = (request.width as i32 - 1, request.height as i32 - 1);
    for x in 0..=last_x {
        commit(&mut grid, OccupantKind::EdgeWall, Pos { y: 0, x });
        commit(&mut grid, OccupantKind::EdgeWall, Pos { y: last_y, x });
    }
    for y in 1..last_y {
        commit(&mut grid, OccupantKind::EdgeWall, Pos { y, x: 0 });
        commit(&mut grid, OccupantKind::EdgeWall, Pos { y, x: last_x });
    }

    for _ in 0..request.wall_count {
        match random_empty(&grid, rng) {
            Some(wall) => commit(&mut grid, OccupantKind::Wall, wall),
            None => break,
        }
    }

    let shortfall = plan.shortfall();
    if shortfall.enemies > 0 {
        warn!(
            requested = request.enemy_count,
            placed = plan.count(OccupantKind::Enemy),
            "enemy placement mirrors a single cell; extra enemies skipped"
        );
    }
    if shortfall.walls > 0 {
        warn!(
            requested = request.wall_count,
            placed = plan.count(OccupantKind::Wall),
            "grid ran out of empty cells for interior walls"
        );
    }
    debug!(
        width = request.width,
        height = request.height,
        placements = plan.len(),
        "level planned"
    );

    Ok(PlannedLevel { plan, grid })
}

/// Plans a sequence of levels from one run seed, each with its own derived stream.
pub struct LevelPlanner {
    run_seed: u64,
    request: LevelRequest,
}

impl LevelPlanner {
    pub fn new(run_seed: u64, request: LevelRequest) -> Self {
        Self { run_seed, request }
    }

    pub fn level_seed(&self, level_index: u32) -> u64 {
        derive_level_seed(self.run_seed, level_index)
    }

    pub fn plan(&self, level_index: u32) -> Result<PlannedLevel, PlanError> {
        let mut rng = ChaChaIndexSource::seed_from_u64(self.level_seed(level_index));
        plan_level(&self.request, &mut rng)
    }
}
