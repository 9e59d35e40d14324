//! Per-actor counters
//!
//! The simulation only writes to a [`StatisticsSink`]. Reading and printing
//! the counters is the caller's business.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Statistic {
    MovesPerformed,
    AttacksPerformed,
}

impl Statistic {
    pub fn all() -> &'static [Statistic] {
        &[Statistic::MovesPerformed, Statistic::AttacksPerformed]
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statistic::MovesPerformed => f.write_str("MovesPerformed"),
            Statistic::AttacksPerformed => f.write_str("AttacksPerformed"),
        }
    }
}

/// Write-only counter sink
pub trait StatisticsSink: Send + Sync {
    fn add(&self, actor: &str, stat: Statistic, amount: u64);
}

/// Counters for one actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActorStatistics {
    pub moves_performed: u64,
    pub attacks_performed: u64,
}

impl ActorStatistics {
    pub fn get(&self, stat: Statistic) -> u64 {
        match stat {
            Statistic::MovesPerformed => self.moves_performed,
            Statistic::AttacksPerformed => self.attacks_performed,
        }
    }

    fn slot(&mut self, stat: Statistic) -> &mut u64 {
        match stat {
            Statistic::MovesPerformed => &mut self.moves_performed,
            Statistic::AttacksPerformed => &mut self.attacks_performed,
        }
    }
}

/// In-memory sink keyed by actor name
#[derive(Debug, Default)]
pub struct StatisticsContainer {
    counters: Mutex<BTreeMap<String, ActorStatistics>>,
}

impl StatisticsContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, actor: &str, stat: Statistic) -> u64 {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(actor)
            .map(|counters| counters.get(stat))
            .unwrap_or(0)
    }

    /// Sum of one statistic across all actors
    pub fn total(&self, stat: Statistic) -> u64 {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(|counters| counters.get(stat))
            .sum()
    }

    pub fn snapshot(&self) -> BTreeMap<String, ActorStatistics> {
        self.counters
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// One printable line per actor and statistic, ordered by actor name
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (actor, counters) in self.snapshot() {
            for stat in Statistic::all() {
                lines.push(format!("{} {}: {}", actor, stat, counters.get(*stat)));
            }
        }
        lines
    }
}

impl StatisticsSink for StatisticsContainer {
    fn add(&self, actor: &str, stat: Statistic, amount: u64) {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        *counters.entry(actor.to_string()).or_default().slot(stat) += amount;
    }
}
