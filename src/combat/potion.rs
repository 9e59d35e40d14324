//! Potion assembly
//!
//! Three stages run in a fixed order, each picking one ingredient from its
//! own category. The result is flavor text with no mechanical effect.

use std::fmt;

use crate::core::rng::RandomSource;

pub const SEPARATOR: &str = " + ";

pub const FRUITS: [&str; 3] = ["Raspberry", "Blueberry", "Strawberry"];
pub const VEGETABLES: [&str; 3] = ["Lettuce", "Carrot", "Potato"];
pub const PROTEINS: [&str; 3] = ["Steak", "Chicken", "Fish"];

type Stage = fn(&mut dyn RandomSource) -> &'static str;

/// Ingredient stages in assembly order
pub const STAGES: [Stage; 3] = [pick_fruit, pick_vegetable, pick_protein];

fn pick(category: &[&'static str; 3], rng: &mut dyn RandomSource) -> &'static str {
    let sides = category.len() as i32;
    // out-of-range draws clamp
    let draw = rng.int_in_range(1, sides).clamp(1, sides);
    category[(draw - 1) as usize]
}

fn pick_fruit(rng: &mut dyn RandomSource) -> &'static str {
    pick(&FRUITS, rng)
}

fn pick_vegetable(rng: &mut dyn RandomSource) -> &'static str {
    pick(&VEGETABLES, rng)
}

fn pick_protein(rng: &mut dyn RandomSource) -> &'static str {
    pick(&PROTEINS, rng)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Potion {
    ingredients: [&'static str; 3],
}

impl Potion {
    pub fn ingredients(&self) -> &[&'static str; 3] {
        &self.ingredients
    }
}

impl fmt::Display for Potion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ingredients.join(SEPARATOR))
    }
}

/// Run every stage once, in order
pub fn assemble(rng: &mut dyn RandomSource) -> Potion {
    let mut ingredients = [""; 3];
    for (slot, stage) in ingredients.iter_mut().zip(STAGES) {
        *slot = stage(rng);
    }
    Potion { ingredients }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_scripted_potion() {
        let mut rng = ScriptedRandom::new([1, 2, 3]);
        let potion = assemble(&mut rng);
        assert_eq!(potion.to_string(), "Raspberry + Carrot + Fish");
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_one_token_per_category() {
        let mut rng = SeededRandom::new(11);
        for _ in 0..50 {
            let text = assemble(&mut rng).to_string();
            let tokens: Vec<&str> = text.split(SEPARATOR).collect();
            assert_eq!(tokens.len(), 3);
            assert!(FRUITS.contains(&tokens[0]));
            assert!(VEGETABLES.contains(&tokens[1]));
            assert!(PROTEINS.contains(&tokens[2]));
        }
    }

    /// Ignores the requested range
    struct Fixed(i32);

    impl RandomSource for Fixed {
        fn int_in_range(&mut self, _low: i32, _high: i32) -> i32 {
            self.0
        }
    }

    #[test]
    fn test_out_of_range_draws_clamp() {
        let low = assemble(&mut Fixed(0));
        assert_eq!(low.ingredients(), &["Raspberry", "Lettuce", "Steak"]);

        let high = assemble(&mut Fixed(99));
        assert_eq!(high.ingredients(), &["Strawberry", "Potato", "Fish"]);
    }
}
