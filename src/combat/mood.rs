//! Post-encounter mood
//!
//! Mood is reporting only. It never feeds back into later encounters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::constants::HAPPY_HEALTH_THRESHOLD;
use crate::events::{BattleEvent, EventLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Angry,
    Neutral,
}

/// Mood action hooks. Each one only produces a log line.
const MOOD_ACTIONS: [(Mood, &str); 3] = [
    (Mood::Happy, "The winning unit is happy"),
    (Mood::Angry, "The winning unit is angry"),
    (Mood::Neutral, "This unit is dead (no emotion)."),
];

impl Mood {
    /// Classify from working health: above 40 Happy, 1..=40 Angry, else Neutral
    pub fn classify(health: i32) -> Mood {
        if health > HAPPY_HEALTH_THRESHOLD {
            Mood::Happy
        } else if health > 0 {
            Mood::Angry
        } else {
            Mood::Neutral
        }
    }

    pub fn action_line(&self) -> &'static str {
        MOOD_ACTIONS
            .iter()
            .find(|(mood, _)| mood == self)
            .map(|(_, line)| *line)
            .unwrap_or_default()
    }

    /// Run the mood action for `name`
    pub fn dispatch(self, name: &str, events: &EventLog) {
        events.emit(BattleEvent::MoodAction {
            name: name.to_string(),
            mood: self,
        });
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Happy => f.write_str("Happy"),
            Mood::Angry => f.write_str("Angry"),
            Mood::Neutral => f.write_str("Neutral"),
        }
    }
}
