//! Human-readable event stream
//!
//! Every line the simulation reports is a [`BattleEvent`]. The [`EventLog`]
//! forwards each one to `tracing` and keeps them in emission order.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::actor::ActorKind;
use crate::combat::mood::Mood;
use crate::combat::skill::UniqueSkill;
use crate::core::types::Position;

/// Separator printed after each full attacker/defender exchange
pub const ROUND_SEPARATOR: &str = "-------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BattleEvent {
    PlacementRejected { name: String, x: i32, y: i32 },
    Moved { name: String, position: Position, move_count: u32 },
    Engaged { attacker: String, defender: String },
    PotionCreated { potion: String },
    WeaponChosen { name: String, description: &'static str },
    SkillUsed { kind: ActorKind, skill: UniqueSkill },
    Attack { name: String, damage: i32 },
    HealthChanged { name: String, health: i32 },
    RoundEnded,
    MoodAction { name: String, mood: Mood },
    Victory { winner: String },
    Defeated { name: String },
    Draw,
    Survivor { name: String },
    SoleSurvivor,
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::PlacementRejected { name, .. } => {
                write!(f, "Invalid position for adventurer {}", name)
            }
            BattleEvent::Moved { name, position, move_count } => write!(
                f,
                "{} coordinates are {}, {} after move {}",
                name, position.x, position.y, move_count
            ),
            BattleEvent::Engaged { attacker, defender } => {
                write!(f, "{} is engaged in combat with {}", attacker, defender)
            }
            BattleEvent::PotionCreated { potion } => write!(f, "Potion created: {}", potion),
            BattleEvent::WeaponChosen { name, description } => {
                write!(f, "{} is {}", name, description)
            }
            BattleEvent::SkillUsed { kind, skill } => {
                write!(f, "{} uses unique skill {}.", kind, skill)
            }
            BattleEvent::Attack { name, damage } => {
                write!(f, "{} attacks: deals {} damage.", name, damage)
            }
            BattleEvent::HealthChanged { name, health } => {
                write!(f, "{} health is now {}", name, health)
            }
            BattleEvent::RoundEnded => f.write_str(ROUND_SEPARATOR),
            BattleEvent::MoodAction { mood, .. } => f.write_str(mood.action_line()),
            BattleEvent::Victory { winner } => write!(f, "{} won the battle", winner),
            BattleEvent::Defeated { name } => write!(f, "{} is defeated", name),
            BattleEvent::Draw => f.write_str("Both fighters have been defeated in a Draw!"),
            BattleEvent::Survivor { name } => {
                write!(f, "{} is alive at the end of the battle", name)
            }
            BattleEvent::SoleSurvivor => f.write_str("This unit won the battle!"),
        }
    }
}

/// Ordered record of emitted events
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<BattleEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: BattleEvent) {
        match &event {
            BattleEvent::PlacementRejected { x, y, .. } => {
                tracing::warn!(x = *x, y = *y, "{}", event)
            }
            _ => tracing::info!("{}", event),
        }
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn snapshot(&self) -> Vec<BattleEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rendered lines, in emission order
    pub fn lines(&self) -> Vec<String> {
        self.snapshot().iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_line_format() {
        let event = BattleEvent::Moved {
            name: "Knight".into(),
            position: Position::new(4, 3),
            move_count: 7,
        };
        assert_eq!(event.to_string(), "Knight coordinates are 4, 3 after move 7");
    }

    #[test]
    fn test_combat_line_formats() {
        assert_eq!(
            BattleEvent::Attack { name: "Mage".into(), damage: 40 }.to_string(),
            "Mage attacks: deals 40 damage."
        );
        assert_eq!(
            BattleEvent::SkillUsed { kind: ActorKind::Mage, skill: UniqueSkill::BlackMagic }
                .to_string(),
            "Mage uses unique skill Black Magic."
        );
        assert_eq!(
            BattleEvent::Defeated { name: "Rogue".into() }.to_string(),
            "Rogue is defeated"
        );
    }

    #[test]
    fn test_log_keeps_order() {
        let log = EventLog::new();
        assert!(log.is_empty());
        log.emit(BattleEvent::Draw);
        log.emit(BattleEvent::SoleSurvivor);
        assert_eq!(
            log.lines(),
            vec![
                "Both fighters have been defeated in a Draw!".to_string(),
                "This unit won the battle!".to_string(),
            ]
        );
    }
}
