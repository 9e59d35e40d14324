//! Flavor weapons
//!
//! The selector holds the currently equipped weapon between encounters.
//! Weapons only change the description that gets logged, never damage.

use serde::{Deserialize, Serialize};

use crate::core::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weapon {
    Unarmed,
    Sword,
    Bow,
    Spear,
}

const WEAPON_TABLE: [(Weapon, &str); 4] = [
    (Weapon::Unarmed, "attacking with their fists!"),
    (Weapon::Sword, "attacking with Sword"),
    (Weapon::Bow, "attacking with Bow"),
    (Weapon::Spear, "attacking with Spear"),
];

impl Weapon {
    /// Weapons in draw order: a draw of `n` in `[1, 4]` selects `ALL[n - 1]`
    pub const ALL: [Weapon; 4] = [Weapon::Unarmed, Weapon::Sword, Weapon::Bow, Weapon::Spear];

    pub fn description(&self) -> &'static str {
        WEAPON_TABLE
            .iter()
            .find(|(weapon, _)| weapon == self)
            .map(|(_, text)| *text)
            .unwrap_or(WEAPON_TABLE[0].1)
    }
}

/// How the weapon for an encounter is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponDraw {
    /// Uniform among the four weapons
    #[default]
    Uniform,
    /// Old selection rules: a draw of 1 keeps whatever is already equipped,
    /// every other draw ends up equipping the spear
    Legacy,
}

/// Holds the equipped weapon. `None` means fists.
#[derive(Debug, Clone, Default)]
pub struct WeaponSelector {
    equipped: Option<Weapon>,
}

impl WeaponSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, weapon: Weapon) {
        self.equipped = match weapon {
            Weapon::Unarmed => None,
            other => Some(other),
        };
    }

    pub fn equipped(&self) -> Weapon {
        self.equipped.unwrap_or(Weapon::Unarmed)
    }

    /// Description of the equipped weapon in use
    pub fn use_weapon(&self) -> &'static str {
        self.equipped().description()
    }

    /// Draw and equip the weapon for a new encounter
    pub fn draw(&mut self, rng: &mut dyn RandomSource, mode: WeaponDraw) -> Weapon {
        let sides = Weapon::ALL.len() as i32;
        // out-of-range draws clamp
        let roll = rng.int_in_range(1, sides).clamp(1, sides);
        match mode {
            WeaponDraw::Uniform => self.select(Weapon::ALL[(roll - 1) as usize]),
            WeaponDraw::Legacy => {
                if roll > 1 {
                    self.select(Weapon::Spear);
                }
            }
        }
        self.equipped()
    }
}
