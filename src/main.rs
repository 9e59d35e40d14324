//! Dungeon Skirmish - Entry Point
//!
//! Loads a run configuration, applies command line overrides, runs the
//! skirmish until the time budget ends or Ctrl-C arrives, then prints the
//! survivors and per-actor statistics.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use dungeon_skirmish::combat::weapons::WeaponDraw;
use dungeon_skirmish::core::config::SimulationConfig;
use dungeon_skirmish::core::error::Result;
use dungeon_skirmish::simulation::{Simulation, SimulationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Run a skirmish between adventurers on a shared grid
#[derive(Parser, Debug)]
#[command(name = "dungeon-skirmish")]
#[command(about = "Adventurers roam a grid and fight whoever they bump into")]
struct Args {
    /// TOML config file; unset fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Run length in seconds
    #[arg(long)]
    duration_secs: Option<u64>,

    /// Actions per actor per second (0 keeps everyone still)
    #[arg(long)]
    actions_per_second: Option<u32>,

    /// Pause between combat rounds in milliseconds
    #[arg(long)]
    round_pause_ms: Option<u64>,

    /// Largest valid coordinate on both axes
    #[arg(long)]
    grid_size: Option<i32>,

    /// Use the legacy weapon draw (keep the current weapon or switch to a spear)
    #[arg(long)]
    legacy_weapons: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Args {
    fn into_config(self) -> Result<(SimulationConfig, OutputFormat)> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(secs) = self.duration_secs {
            config.duration_secs = secs;
        }
        if let Some(rate) = self.actions_per_second {
            config.actions_per_second = rate;
        }
        if let Some(pause) = self.round_pause_ms {
            config.round_pause_ms = pause;
        }
        if let Some(size) = self.grid_size {
            config.grid_size = size;
        }
        if self.legacy_weapons {
            config.weapon_draw = WeaponDraw::Legacy;
        }

        Ok((config, self.format))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dungeon_skirmish=info")),
        )
        .init();

    let (config, format) = Args::parse().into_config()?;
    let simulation = Simulation::new(config)?;
    let stats = simulation.statistics();

    tracing::info!("Dungeon Skirmish starting...");

    let report = simulation
        .run_until(async {
            if tokio::signal::ctrl_c().await.is_err() {
                // no signal handler, run to the end of the budget
                std::future::pending::<()>().await;
            }
        })
        .await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            print_summary(&report);
            for line in stats.report_lines() {
                println!("{}", line);
            }
        }
    }

    Ok(())
}

fn print_summary(report: &SimulationReport) {
    println!("\n=== SKIRMISH OVER ===");
    println!("Encounters: {}", report.encounters);
    match &report.winner {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("Survivors: {}", report.survivors.join(", ")),
    }
    if !report.rejected.is_empty() {
        println!("Never placed: {}", report.rejected.join(", "));
    }
    println!();
}
