//! Harvest planner CLI.
//!
//! - `harvest plan <scenario>` - search for a plan and save it
//! - `harvest check <scenario>` - validate a scenario without searching

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use harvest_core::GameState;
use harvest_exec::save_plan;
use harvest_search::Planner;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Multi-worker resource planner", version)]
struct Cli {
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
    /// Search for a plan and write it to disk
    Plan {
        /// Scenario file (YAML)
        scenario: PathBuf,

        /// Output path, overriding the scenario's
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Stop after this many expansions
        #[arg(long)]
        max_expansions: Option<usize>,

        /// Stop after this many milliseconds
        #[arg(long)]
        time_limit_ms: Option<u64>,
    },

    /// Validate a scenario without searching
    Check {
        /// Scenario file (YAML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    if cli.log_json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    match cli.command {
        Commands::Plan {
            scenario,
            out,
            max_expansions,
            time_limit_ms,
        } => run_plan(&scenario, out, max_expansions, time_limit_ms),
        Commands::Check { scenario } => run_check(&scenario),
    }
}

fn run_plan(
    path: &Path,
    out: Option<PathBuf>,
    max_expansions: Option<usize>,
    time_limit_ms: Option<u64>,
) -> Result<()> {
    let scenario = Scenario::load(path)?;

    let mut config = scenario.planner.to_config();
    if let Some(max) = max_expansions {
        config = config.with_max_expansions(max);
    }
    if let Some(ms) = time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    let plan = Planner::new()
        .with_config(config)
        .plan(&scenario.world, &scenario.goal)
        .with_context(|| format!("Planning failed for {}", path.display()))?;

    let out = out.unwrap_or(scenario.output);
    save_plan(&plan.ticks, &out)
        .with_context(|| format!("Failed to save plan to {}", out.display()))?;

    print!("{plan}");
    println!();
    println!(
        "{} ticks, cost {}, {} expansions in {:?}",
        plan.len(),
        plan.cost,
        plan.stats.expansions,
        plan.stats.elapsed
    );
    println!("Saved to {}", out.display());
    Ok(())
}

fn run_check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let root = GameState::from_snapshot(&scenario.world, &scenario.goal)
        .with_context(|| format!("Invalid scenario {}", path.display()))?;
    root.validate()
        .with_context(|| format!("Unreachable goal in {}", path.display()))?;

    println!("Scenario OK");
    println!("  workers:    {}", root.population());
    println!(
        "  gold:       {} / {} ({} nodes)",
        root.current_gold(),
        root.required_gold(),
        root.gold_nodes().len()
    );
    println!(
        "  wood:       {} / {} ({} nodes)",
        root.current_wood(),
        root.required_wood(),
        root.wood_nodes().len()
    );
    println!("  production: {}", root.build_peasants());
    Ok(())
}
