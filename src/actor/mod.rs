//! Combatants on the grid
//!
//! An actor is created once from an [`ActorTemplate`] and never recreated.
//! Its own task mutates position and move count; the combat resolver
//! mutates `alive` and `mood`. Both only happen under the grid gate.

pub mod task;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::combat::mood::Mood;
use crate::core::error::SkirmishError;
use crate::core::types::Position;

/// Adventurer class. Each kind carries one unique combat skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Knight,
    Mage,
    Rogue,
    Healer,
}

impl ActorKind {
    pub fn all() -> &'static [ActorKind] {
        &[
            ActorKind::Knight,
            ActorKind::Mage,
            ActorKind::Rogue,
            ActorKind::Healer,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActorKind::Knight => "Knight",
            ActorKind::Mage => "Mage",
            ActorKind::Rogue => "Rogue",
            ActorKind::Healer => "Healer",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActorKind {
    type Err = SkirmishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActorKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| SkirmishError::UnknownKind(s.to_string()))
    }
}

/// Attack, health and luck
///
/// Health may go negative inside an encounter before the owner is declared
/// dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specs {
    pub attack: i32,
    pub health: i32,
    pub luck: i32,
}

impl Specs {
    pub fn new(attack: i32, health: i32, luck: i32) -> Self {
        Self { attack, health, luck }
    }
}

/// Roster entry used to create an actor at simulation start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub name: String,
    pub kind: ActorKind,
    pub specs: Specs,
    pub start: Position,
}

impl ActorTemplate {
    pub fn new(name: impl Into<String>, kind: ActorKind, specs: Specs, start: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            specs,
            start,
        }
    }

    pub fn spawn(&self) -> Actor {
        Actor::new(self.name.clone(), self.kind, self.specs)
    }
}

/// Per-combatant state
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    pub name: String,
    pub kind: ActorKind,
    /// Base stats. Encounters work on a copy and never write these back.
    pub specs: Specs,
    pub position: Position,
    pub alive: bool,
    pub move_count: u32,
    /// Mood assigned after the last encounter this actor won
    pub mood: Option<Mood>,
}

impl Actor {
    pub fn new(name: impl Into<String>, kind: ActorKind, specs: Specs) -> Self {
        Self {
            name: name.into(),
            kind,
            specs,
            position: Position::default(),
            alive: true,
            move_count: 0,
            mood: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark dead and park off the grid so it can no longer collide
    pub fn mark_dead(&mut self) {
        self.alive = false;
        self.position = Position::OFF_GRID;
    }

    /// True when `other` is a live opponent of a different kind on the same cell
    pub fn can_engage(&self, other: &Actor) -> bool {
        self.alive
            && other.alive
            && self.kind != other.kind
            && self.position == other.position
    }
}
