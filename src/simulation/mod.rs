//! Simulation runner
//!
//! Builds a grid from a [`SimulationConfig`], spawns one task per placed
//! actor, lets them run for the configured budget, then stops them and
//! collects a [`SimulationReport`].

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::actor::task::{run_actor, TaskExit};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::rng::{RandomSource, SeededRandom};
use crate::core::types::ActorId;
use crate::events::EventLog;
use crate::grid::Grid;
use crate::stats::{ActorStatistics, StatisticsContainer};

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub survivors: Vec<String>,
    /// Set when exactly one actor is left alive
    pub winner: Option<String>,
    /// Roster entries the grid refused to place
    pub rejected: Vec<String>,
    pub encounters: u64,
    pub statistics: BTreeMap<String, ActorStatistics>,
    pub peak_gate_occupancy: usize,
    pub gate_entries: u64,
    pub failed_tasks: usize,
}

pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    placed: Vec<ActorId>,
    rejected: Vec<String>,
    events: Arc<EventLog>,
    stats: Arc<StatisticsContainer>,
}

impl Simulation {
    /// Validate the config and place the roster. Seeded from `config.seed`,
    /// or from OS entropy when unset.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SeededRandom::new(seed)),
            None => Box::new(SeededRandom::from_entropy()),
        };
        Self::with_random_source(config, rng)
    }

    /// Same as [`Simulation::new`] with an explicit random source
    pub fn with_random_source(config: SimulationConfig, rng: Box<dyn RandomSource>) -> Result<Self> {
        config.validate()?;

        let events = Arc::new(EventLog::new());
        let stats = Arc::new(StatisticsContainer::new());
        let mut grid = Grid::new(config.grid_size, rng, Arc::clone(&events), stats.clone())
            .with_round_pause(config.round_pause())
            .with_weapon_draw(config.weapon_draw);

        let mut placed = Vec::new();
        let mut rejected = Vec::new();
        for template in &config.roster {
            match grid.place(template.spawn(), template.start.x, template.start.y) {
                Ok(id) => placed.push(id),
                Err(e) => {
                    tracing::debug!("skipping {}: {}", template.name, e);
                    rejected.push(template.name.clone());
                }
            }
        }

        Ok(Self {
            config,
            grid,
            placed,
            rejected,
            events,
            stats,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn events(&self) -> Arc<EventLog> {
        Arc::clone(&self.events)
    }

    pub fn statistics(&self) -> Arc<StatisticsContainer> {
        Arc::clone(&self.stats)
    }

    /// Run for the configured duration
    pub async fn run(self) -> Result<SimulationReport> {
        self.run_until(std::future::pending()).await
    }

    /// Run until `stop` resolves or the configured duration elapses, whichever
    /// comes first
    pub async fn run_until(self, stop: impl Future<Output = ()>) -> Result<SimulationReport> {
        let Simulation {
            config,
            grid,
            placed,
            rejected,
            events: _,
            stats,
        } = self;

        let grid = Arc::new(grid);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let interval = config.action_interval();

        tracing::info!(
            actors = placed.len(),
            duration_secs = config.duration_secs,
            actions_per_second = config.actions_per_second,
            "simulation starting"
        );

        let mut tasks = JoinSet::new();
        for id in placed {
            tasks.spawn(run_actor(Arc::clone(&grid), id, interval, shutdown_rx.clone()));
        }
        drop(shutdown_rx);

        tokio::select! {
            _ = tokio::time::sleep(config.duration()) => {}
            _ = stop => tracing::info!("simulation stopped early"),
        }
        // tasks finish the step they are on, then exit
        let _ = shutdown_tx.send(true);

        let mut failed_tasks = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((steps, TaskExit::Failed)) => {
                    failed_tasks += 1;
                    tracing::debug!(steps, "actor task failed");
                }
                Ok((steps, exit)) => tracing::debug!(steps, ?exit, "actor task finished"),
                Err(e) => {
                    // a panicking task must not take the others down
                    failed_tasks += 1;
                    tracing::warn!("actor task aborted: {}", e);
                }
            }
        }

        let survivors = grid.report_survivors().await;
        let winner = match survivors.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };

        Ok(SimulationReport {
            winner,
            survivors,
            rejected,
            encounters: grid.encounters().await,
            statistics: stats.snapshot(),
            peak_gate_occupancy: grid.peak_occupancy(),
            gate_entries: grid.gate_entries(),
            failed_tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, ActorTemplate, Specs};
    use crate::core::types::Position;

    fn quick_config() -> SimulationConfig {
        SimulationConfig {
            duration_secs: 0,
            round_pause_ms: 0,
            seed: Some(5),
            ..SimulationConfig::default()
        }
    }

    #[tokio::test]
    async fn test_out_of_bounds_roster_entry_is_skipped() {
        let mut config = quick_config();
        config.roster.push(ActorTemplate::new(
            "Stray",
            ActorKind::Healer,
            Specs::new(10, 70, 20),
            Position::new(7, 1),
        ));

        let simulation = Simulation::new(config).unwrap();
        let events = simulation.events();
        let report = simulation.run().await.unwrap();

        assert_eq!(report.rejected, vec!["Stray".to_string()]);
        assert!(!report.survivors.contains(&"Stray".to_string()));
        assert!(events
            .lines()
            .contains(&"Invalid position for adventurer Stray".to_string()));
    }

    #[tokio::test]
    async fn test_zero_duration_changes_nothing() {
        let report = Simulation::new(quick_config()).unwrap().run().await.unwrap();
        assert_eq!(report.survivors.len(), 4);
        assert_eq!(report.winner, None);
        assert_eq!(report.encounters, 0);
        assert_eq!(report.failed_tasks, 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quick_config();
        config.grid_size = -1;
        assert!(Simulation::new(config).is_err());
    }
}
