//! Unique skills
//!
//! Each actor kind owns exactly one skill, looked up from a fixed table.
//! A skill may change the pending damage, the attacker's working health or
//! its working luck. Nothing else.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{ActorKind, Specs};
use crate::combat::constants::{
    BLACK_MAGIC_HEALTH_COST, BLACK_MAGIC_MULTIPLIER, ENRAGE_MULTIPLIER, GAMBLE_LUCK_MULTIPLIER,
    GAMBLE_LUCK_RESET, HEAL_AMOUNT, SKILL_ROLL_SIDES,
};
use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UniqueSkill {
    /// Double damage
    Enrage,
    /// Double damage at the cost of the caster's own health
    BlackMagic,
    /// Coin flip: double luck, or reset it
    Gamble,
    /// Restore the caster's health
    Heal,
}

const SKILL_TABLE: [(ActorKind, UniqueSkill); 4] = [
    (ActorKind::Knight, UniqueSkill::Enrage),
    (ActorKind::Mage, UniqueSkill::BlackMagic),
    (ActorKind::Rogue, UniqueSkill::Gamble),
    (ActorKind::Healer, UniqueSkill::Heal),
];

/// Skill owned by `kind`. A kind missing from the table has no skill and
/// its turns proceed with unmodified damage.
pub fn unique_skill(kind: ActorKind) -> Option<UniqueSkill> {
    SKILL_TABLE
        .iter()
        .find(|(owner, _)| *owner == kind)
        .map(|(_, skill)| *skill)
}

/// Whether this turn's skill fires (50%)
pub fn roll_trigger(rng: &mut dyn RandomSource) -> bool {
    rng.int_in_range(1, SKILL_ROLL_SIDES) == SKILL_ROLL_SIDES
}

impl UniqueSkill {
    pub fn name(&self) -> &'static str {
        match self {
            UniqueSkill::Enrage => "Enrage",
            UniqueSkill::BlackMagic => "Black Magic",
            UniqueSkill::Gamble => "Gamble",
            UniqueSkill::Heal => "Heal",
        }
    }

    /// Apply to the attacker's pending damage and working specs
    pub fn apply(&self, damage: &mut i32, caster: &mut Specs, rng: &mut dyn RandomSource) {
        match self {
            UniqueSkill::Enrage => {
                *damage = damage.saturating_mul(ENRAGE_MULTIPLIER);
            }
            UniqueSkill::BlackMagic => {
                *damage = damage.saturating_mul(BLACK_MAGIC_MULTIPLIER);
                caster.health = caster.health.saturating_sub(BLACK_MAGIC_HEALTH_COST);
            }
            UniqueSkill::Gamble => {
                if rng.int_in_range(1, 2) == 1 {
                    caster.luck = caster.luck.saturating_mul(GAMBLE_LUCK_MULTIPLIER);
                } else {
                    caster.luck = GAMBLE_LUCK_RESET;
                }
            }
            UniqueSkill::Heal => {
                caster.health = caster.health.saturating_add(HEAL_AMOUNT);
            }
        }
    }
}

impl fmt::Display for UniqueSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
