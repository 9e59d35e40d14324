pub mod constants;
pub mod mood;
pub mod potion;
pub mod resolution;
pub mod skill;
pub mod weapons;

pub use mood::Mood;
pub use potion::Potion;
pub use resolution::{CombatContext, Combatant, Encounter, EncounterState, Outcome};
pub use skill::{unique_skill, UniqueSkill};
pub use weapons::{Weapon, WeaponDraw, WeaponSelector};
