//! Phalanx CLI - headless battle runner.
//!
//! - `phalanx run` - run a scenario to completion or a tick limit
//! - `phalanx check-tree` - load a behavior tree and print its structure
//! - `phalanx check-formation` - load a formation grid and print its slots

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use phalanx_bt::{TreeLoader, TreeSource};
use phalanx_formation::{FormationLoader, SlotType};
use phalanx_sim::{Battlefield, Outcome, Scenario, SimConfig};

#[derive(Parser)]
#[command(name = "phalanx")]
#[command(about = "Formation battle simulator", version)]
struct Cli {
    /// Directory data paths are resolved against
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Simulation config (defaults to <root>/data/config.yaml, falling back to built-ins)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a battle headless
    Run {
        /// Scenario file
        #[arg(short, long)]
        scenario: PathBuf,

        /// Stop after this many ticks even if the battle is undecided
        #[arg(long, default_value_t = 6_000)]
        ticks: u64,

        /// Seconds per tick (clamped to the configured maximum frame time)
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Log a summary every N ticks (0 disables)
        #[arg(long, default_value_t = 300)]
        summary_every: u64,
    },

    /// Load a behavior tree and print it
    CheckTree {
        /// Tree definition name
        name: String,
    },

    /// Load a formation definition and print it
    CheckFormation {
        /// Formation definition name
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = load_config(&root, cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            dt,
            summary_every,
        } => run_battle(config, &scenario, ticks, dt, summary_every),
        Commands::CheckTree { name } => check_tree(&config, &name),
        Commands::CheckFormation { name } => check_formation(&config, &name),
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` picks debug over info.
fn init_logging(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    if json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<SimConfig> {
    let mut config = match explicit {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(&root.join("data/config.yaml"))?,
    };
    config.resolve_paths(root);
    Ok(config)
}

fn run_battle(
    config: SimConfig,
    scenario_path: &Path,
    ticks: u64,
    dt: f32,
    summary_every: u64,
) -> Result<()> {
    let scenario = Scenario::load(scenario_path)?;
    tracing::info!(
        scenario = %scenario_path.display(),
        soldiers = scenario.soldier_count(),
        "Starting battle"
    );

    let mut field = Battlefield::from_scenario(config, &scenario)
        .with_context(|| format!("Failed to set up scenario {}", scenario_path.display()))?;

    let mut outcome = field.outcome();
    let mut deaths = 0usize;
    while field.tick_count() < ticks {
        let report = field.tick(dt);
        deaths += report.deaths.len();

        if summary_every > 0 && field.tick_count() % summary_every == 0 {
            log_summary(&field);
        }

        outcome = field.outcome();
        if outcome != Outcome::Ongoing {
            break;
        }
    }

    log_summary(&field);
    match outcome {
        Outcome::Victory(army) => {
            let name = field.army(army).map_or("?", |a| a.name.as_str());
            tracing::info!(
                winner = name,
                ticks = field.tick_count(),
                seconds = field.elapsed(),
                deaths,
                "Battle won"
            );
        }
        Outcome::Draw => {
            tracing::info!(ticks = field.tick_count(), deaths, "Battle ended with no survivors");
        }
        Outcome::Ongoing => {
            tracing::info!(ticks = field.tick_count(), deaths, "Tick limit reached, battle undecided");
        }
    }
    Ok(())
}

fn log_summary(field: &Battlefield) {
    for army in field.armies() {
        tracing::info!(
            tick = field.tick_count(),
            army = %army.name,
            alive = field.alive_count(army.id),
            waypoint = ?army.waypoint,
            "Army status"
        );
    }
}

fn check_tree(config: &SimConfig, name: &str) -> Result<()> {
    let mut loader = TreeLoader::new(TreeSource::dir(&config.trees_dir));
    let tree = loader
        .load(name)
        .with_context(|| format!("Tree `{name}` failed to load"))?;

    println!("{}", serde_json::to_string_pretty(&tree.root().to_definition())?);
    println!();
    println!("nodes: {}", tree.node_count());
    println!("depth: {}", tree.depth());
    Ok(())
}

fn check_formation(config: &SimConfig, name: &str) -> Result<()> {
    let mut loader = FormationLoader::new(&config.formations_dir);
    let template = loader
        .load(name)
        .with_context(|| format!("Formation `{name}` failed to load"))?;

    println!("{}", template.render());
    println!();
    println!("size: {}x{}", template.width(), template.height());
    for slot_type in SlotType::ALL {
        println!("{slot_type:?}: {}", template.count(slot_type));
    }
    for (index, slot) in template.slots().iter().enumerate() {
        println!(
            "  #{index:<3} {} ({:+.0}, {:+.0})",
            slot.slot_type.code(),
            slot.offset.x,
            slot.offset.y
        );
    }
    Ok(())
}
