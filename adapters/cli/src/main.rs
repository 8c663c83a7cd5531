#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner that plays a Neon Siege match to the end.
//!
//! The runner boots a world from the built-in rule set or a catalog file,
//! hands control to the autopilot in [`driver`], and prints a short report
//! once the match reaches a terminal state or the tick budget runs out.

mod driver;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use neon_siege_core::{
    catalog::{Catalog, EnemySpec, TowerSpec, WaveDefinition},
    path::Board,
};
use neon_siege_world::{MatchConfig, World};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line options accepted by the runner.
#[derive(Debug, Parser)]
#[command(name = "neon-siege", about = "Runs a Neon Siege match without a renderer")]
struct Options {
    /// Gold granted when the match starts.
    #[arg(long, default_value_t = 200)]
    gold: u32,

    /// Lives granted when the match starts.
    #[arg(long, default_value_t = 20)]
    lives: u32,

    /// JSON file with tower, enemy, and wave tables replacing the built-in set.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Upper bound on simulation ticks before the runner gives up.
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Prints every world event as it is observed.
    #[arg(long)]
    echo_events: bool,
}

/// Rule tables as stored on disk, validated into a [`Catalog`] after parsing.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    towers: Vec<TowerSpec>,
    enemies: Vec<EnemySpec>,
    waves: Vec<WaveDefinition>,
}

/// Entry point for the Neon Siege command-line runner.
fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    init_tracing();

    let catalog = match &options.catalog {
        Some(path) => load_catalog(path)?,
        None => Catalog::standard(),
    };
    info!(
        towers = catalog.towers().len(),
        enemies = catalog.enemies().len(),
        waves = catalog.total_waves(),
        "catalog ready"
    );

    let config = MatchConfig {
        starting_gold: options.gold,
        starting_lives: options.lives,
    };
    let mut world = World::with_rules(catalog, Board::standard(), config);
    let report = driver::run_match(&mut world, options.max_ticks, options.echo_events);
    println!("{report}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read catalog file {}", path.display()))?;
    let file: CatalogFile = serde_json::from_str(&text)
        .with_context(|| format!("could not parse catalog file {}", path.display()))?;
    Catalog::new(file.towers, file.enemies, file.waves)
        .with_context(|| format!("catalog file {} failed validation", path.display()))
}
