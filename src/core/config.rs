//! Run configuration with documented defaults
//!
//! Values come from `SimulationConfig::default()`, a TOML file, or CLI
//! overrides layered on top of either.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorKind, ActorTemplate, Specs};
use crate::combat::weapons::WeaponDraw;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::Position;

/// Configuration for one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === GRID ===
    /// Largest valid coordinate on both axes. The addressable space is
    /// `(grid_size + 1)²` cells.
    pub grid_size: i32,

    // === RUN BUDGET ===
    /// Wall-clock length of the run in seconds
    pub duration_secs: u64,

    /// Actions each actor task attempts per second. Zero means actors
    /// never act.
    pub actions_per_second: u32,

    // === COMBAT ===
    /// Pause between combat rounds, only for log readability. Zero disables
    /// it without changing outcomes.
    pub round_pause_ms: u64,

    /// How the flavor weapon is drawn at the start of each encounter
    pub weapon_draw: WeaponDraw,

    /// Seed for the random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    // === ACTORS ===
    pub roster: Vec<ActorTemplate>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            duration_secs: 150,
            actions_per_second: 1,
            round_pause_ms: 2000,
            weapon_draw: WeaponDraw::Uniform,
            seed: None,
            roster: default_roster(),
        }
    }
}

/// Four adventurers, one per kind, in the four inner corners of a 5-grid
pub fn default_roster() -> Vec<ActorTemplate> {
    vec![
        ActorTemplate::new("Knight", ActorKind::Knight, Specs::new(15, 100, 10), Position::new(4, 4)),
        ActorTemplate::new("Mage", ActorKind::Mage, Specs::new(20, 50, 10), Position::new(1, 1)),
        ActorTemplate::new("Rogue", ActorKind::Rogue, Specs::new(10, 60, 30), Position::new(1, 4)),
        ActorTemplate::new("Healer", ActorKind::Healer, Specs::new(10, 70, 20), Position::new(4, 1)),
    ]
}

impl SimulationConfig {
    /// Load a config from a TOML file; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }

    /// Interval between actions for one actor, `None` when actors are idle
    pub fn action_interval(&self) -> Option<Duration> {
        if self.actions_per_second == 0 {
            None
        } else {
            Some(Duration::from_secs(1) / self.actions_per_second)
        }
    }

    /// Validate configuration for internal consistency
    ///
    /// Starting positions are deliberately not checked here: out-of-bounds
    /// placements are rejected by the grid and the run continues without
    /// that actor.
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 1 {
            return Err(SkirmishError::InvalidConfig(format!(
                "grid_size ({}) must be at least 1",
                self.grid_size
            )));
        }

        let mut names = HashSet::new();
        for template in &self.roster {
            let specs = template.specs;
            if specs.attack <= 0 {
                return Err(SkirmishError::InvalidConfig(format!(
                    "{}: attack ({}) must be positive",
                    template.name, specs.attack
                )));
            }
            if specs.health <= 0 {
                return Err(SkirmishError::InvalidConfig(format!(
                    "{}: health ({}) must be positive",
                    template.name, specs.health
                )));
            }
            if specs.luck < 0 {
                return Err(SkirmishError::InvalidConfig(format!(
                    "{}: luck ({}) must not be negative",
                    template.name, specs.luck
                )));
            }
            if !names.insert(template.name.as_str()) {
                return Err(SkirmishError::InvalidConfig(format!(
                    "duplicate actor name: {}",
                    template.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 5);
        assert_eq!(config.roster.len(), 4);
    }

    #[test]
    fn test_action_interval() {
        let mut config = SimulationConfig::default();
        config.actions_per_second = 4;
        assert_eq!(config.action_interval(), Some(Duration::from_millis(250)));
        config.actions_per_second = 0;
        assert_eq!(config.action_interval(), None);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimulationConfig::parse_toml("grid_size = 3\nseed = 9\n").unwrap();
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.actions_per_second, 1);
        assert_eq!(config.roster.len(), 4);
    }

    #[test]
    fn test_toml_roster() {
        let content = r#"
            round_pause_ms = 0
            weapon_draw = "legacy"

            [[roster]]
            name = "Brute"
            kind = "knight"
            specs = { attack = 30, health = 80, luck = 10 }
            start = { x = 0, y = 0 }

            [[roster]]
            name = "Witch"
            kind = "mage"
            specs = { attack = 25, health = 40, luck = 20 }
            start = { x = 9, y = 9 }
        "#;
        let config = SimulationConfig::parse_toml(content).unwrap();
        assert_eq!(config.weapon_draw, WeaponDraw::Legacy);
        assert_eq!(config.roster.len(), 2);
        assert_eq!(config.roster[0].kind, ActorKind::Knight);
        // out-of-bounds start is accepted here and rejected at placement
        assert_eq!(config.roster[1].start, Position::new(9, 9));
    }

    #[test]
    fn test_validate_rejects_bad_stats() {
        let mut config = SimulationConfig::default();
        config.roster[0].specs.attack = 0;
        assert!(matches!(config.validate(), Err(SkirmishError::InvalidConfig(_))));

        let mut config = SimulationConfig::default();
        config.roster[1].name = "Knight".into();
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.grid_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = SimulationConfig::parse_toml("grid_size = \"big\"");
        assert!(matches!(result, Err(SkirmishError::ConfigParse(_))));
    }
}
