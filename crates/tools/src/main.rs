use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use layout_core::{
    FirstCandidate, LevelConfig, LevelPlanner, PlacedEntity, PlanShortfall, PlannedLevel,
    WorldTransform, plan_level,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEED_ENV_VAR: &str = "LAYOUT_SEED";
const DEFAULT_SEED: u64 = 42;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML level configuration; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Number of interior walls to scatter
    #[arg(long)]
    walls: Option<usize>,
    /// Number of enemies to request (at most one can be placed)
    #[arg(long)]
    enemies: Option<usize>,
    /// Run seed; falls back to LAYOUT_SEED, then 42
    #[arg(short, long)]
    seed: Option<u64>,
    /// Number of consecutive levels to plan from the run seed
    #[arg(short, long, default_value_t = 1)]
    levels: u32,
    /// Always take the first candidate instead of a seeded random pick
    #[arg(long)]
    first_candidate: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Serialize)]
struct LevelReport {
    level: u32,
    seed: Option<u64>,
    width: usize,
    height: usize,
    transform: WorldTransform,
    entities: Vec<PlacedEntity>,
    shortfall: PlanShortfall,
}

impl LevelReport {
    fn new(
        level: u32,
        seed: Option<u64>,
        planned: &PlannedLevel,
        transform: WorldTransform,
    ) -> Self {
        let plan = &planned.plan;
        let mut entities = Vec::with_capacity(plan.len());
        plan.dispatch(&transform, &mut entities);
        Self {
            level,
            seed,
            width: plan.request().width,
            height: plan.request().height,
            transform,
            entities,
            shortfall: plan.shortfall(),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

fn resolve_config(args: &Args) -> Result<LevelConfig> {
    let mut config = match &args.config {
        Some(path) => LevelConfig::load(path)
            .with_context(|| format!("Failed to load level config: {}", path.display()))?,
        None => LevelConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(walls) = args.walls {
        config.wall_count = walls;
    }
    if let Some(enemies) = args.enemies {
        config.enemy_count = enemies;
    }
    Ok(config)
}

fn resolve_seed(cli_seed: Option<u64>) -> Result<u64> {
    if let Some(seed) = cli_seed {
        return Ok(seed);
    }
    match env::var(SEED_ENV_VAR) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{SEED_ENV_VAR} value '{raw}' must be a number")),
        Err(_) => Ok(DEFAULT_SEED),
    }
}

fn print_text(config: &LevelConfig, level_index: u32, level: &PlannedLevel) {
    let plan = &level.plan;
    println!("Level {level_index}: {}x{}", plan.request().width, plan.request().height);
    for placement in plan.placements() {
        let world = config.world.to_world(placement.pos);
        println!(
            "  {:<9} cell=({}, {}) world=({:.1}, {:.1})",
            placement.kind.label(),
            placement.pos.x,
            placement.pos.y,
            world.x,
            world.y
        );
    }
    let shortfall = plan.shortfall();
    if !shortfall.is_empty() {
        println!(
            "  shortfall: player={} enemies={} walls={}",
            shortfall.player, shortfall.enemies, shortfall.walls
        );
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = resolve_config(&args)?;
    let request = config.to_request();
    let seed = resolve_seed(args.seed)?;
    let planner = LevelPlanner::new(seed, request);

    info!(seed, levels = args.levels, width = request.width, height = request.height, "planning");

    let mut reports = Vec::new();
    for level_index in 0..args.levels {
        let (level, level_seed) = if args.first_candidate {
            (plan_level(&request, &mut FirstCandidate), None)
        } else {
            (planner.plan(level_index), Some(planner.level_seed(level_index)))
        };
        let level = level.with_context(|| format!("Failed to plan level {level_index}"))?;
        reports.push((level_index, level_seed, level));
    }

    match args.format {
        OutputFormat::Text => {
            for (level_index, _, level) in &reports {
                print_text(&config, *level_index, level);
            }
        }
        OutputFormat::Json => {
            let json: Vec<LevelReport> = reports
                .iter()
                .map(|(level, seed, planned)| {
                    LevelReport::new(*level, *seed, planned, config.world)
                })
                .collect();
            let rendered =
                serde_json::to_string_pretty(&json).context("Failed to serialize plans")?;
            println!("{rendered}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["plan", "--width", "9", "--walls", "2"]);
        let config = resolve_config(&args).expect("no config file involved");
        assert_eq!(config.width, 9);
        assert_eq!(config.wall_count, 2);
        assert_eq!(config.height, LevelConfig::default().height);
    }

    #[test]
    fn cli_seed_wins_over_environment() {
        assert_eq!(resolve_seed(Some(7)).expect("explicit seed"), 7);
    }

    #[test]
    fn json_report_carries_world_coordinates() {
        let request = LevelConfig { width: 5, height: 5, ..LevelConfig::default() }.to_request();
        let planned = plan_level(&request, &mut FirstCandidate).expect("valid request");
        let report = LevelReport::new(0, None, &planned, WorldTransform::ROOM_GRID);

        let json = serde_json::to_value(&report).expect("report should serialize");
        let base = &json["entities"][0];
        assert_eq!(base["kind"], "Base");
        assert_eq!(base["cell"]["x"], 2);
        assert_eq!(base["world"]["x"], 20.0);
        assert_eq!(base["world"]["y"], 10.0);
        assert_eq!(json["transform"]["scale"], 10.0);
        assert_eq!(json["entities"].as_array().map(Vec::len), Some(planned.plan.len()));
    }

    #[test]
    fn json_format_is_selectable() {
        let args = parse(&["plan", "--format", "json", "--levels", "3", "--first-candidate"]);
        assert!(matches!(args.format, OutputFormat::Json));
        assert_eq!(args.levels, 3);
        assert!(args.first_candidate);
    }
}
