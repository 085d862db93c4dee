use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use layout_core::{
    ChaChaIndexSource, LevelRequest, OccupantKind, plan_level, planner::base_position,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    cases: u32,
}

fn choose_dimension(rng: &mut ChaCha8Rng, max: u64) -> usize {
    3 + (rng.next_u64() % (max - 2)) as usize
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();

    let args = Args::parse();
    info!(seed = args.seed, cases = args.cases, "starting layout fuzz harness");
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for case in 0..args.cases {
        let request = LevelRequest {
            width: choose_dimension(&mut rng, 48),
            height: choose_dimension(&mut rng, 48),
            wall_count: (rng.next_u64() % 400) as usize,
            enemy_count: (rng.next_u64() % 8) as usize,
        };
        let mut picks = ChaChaIndexSource::seed_from_u64(rng.next_u64());
        let level = plan_level(&request, &mut picks)?;
        let plan = &level.plan;
        let grid = &level.grid;
        debug!(case, ?request, placements = plan.len(), "planned");

        // Assert invariants
        if let Some(pos) =
            grid.border_cells().find(|pos| grid.get(*pos) != Some(OccupantKind::EdgeWall))
        {
            bail!("Invariant failed: border cell {pos:?} not walled (case {case}, {request:?})");
        }
        let base = base_position(request.width);
        if grid.get(base) != Some(OccupantKind::Base) {
            bail!("Invariant failed: base missing at {base:?} (case {case})");
        }
        if plan.position_of(OccupantKind::Player).is_some_and(|pos| pos.manhattan(base) != 1) {
            bail!("Invariant failed: player not adjacent to base (case {case})");
        }
        if plan.count(OccupantKind::Enemy) > 1 {
            bail!("Invariant failed: more than one enemy (case {case})");
        }
        let mut occupied = BTreeSet::new();
        for placement in plan.placements() {
            if !occupied.insert(placement.pos) && placement.kind == OccupantKind::Wall {
                bail!("Invariant failed: wall stacked at {:?} (case {case})", placement.pos);
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
