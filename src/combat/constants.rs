//! Combat constants - all tunable values in one place

// Damage
/// Luck points per step of the damage multiplier range (10 luck = x1, 20 = x1..x2)
pub const LUCK_PER_MULTIPLIER: i32 = 10;

// Unique skills
/// A skill fires when a draw in `[1, SKILL_ROLL_SIDES]` equals `SKILL_ROLL_SIDES`
pub const SKILL_ROLL_SIDES: i32 = 2;
pub const ENRAGE_MULTIPLIER: i32 = 2;
pub const BLACK_MAGIC_MULTIPLIER: i32 = 2;
pub const BLACK_MAGIC_HEALTH_COST: i32 = 10;
pub const GAMBLE_LUCK_MULTIPLIER: i32 = 2;
pub const GAMBLE_LUCK_RESET: i32 = 10;
pub const HEAL_AMOUNT: i32 = 20;

// Mood
/// Health strictly above this is Happy; between 1 and this inclusive is Angry
pub const HAPPY_HEALTH_THRESHOLD: i32 = 40;
