//! Encounter resolution
//!
//! `Idle -> Engaged -> Resolved(WinnerA | WinnerB | Draw)`.
//!
//! An encounter works on copies of both actors' specs. Only the death
//! determination and the winner's mood are committed back; attack and luck
//! changes made by skills are discarded when the encounter ends.

use serde::Serialize;

use crate::actor::{Actor, ActorKind, Specs};
use crate::combat::constants::LUCK_PER_MULTIPLIER;
use crate::combat::mood::Mood;
use crate::combat::potion;
use crate::combat::skill::{roll_trigger, unique_skill};
use crate::combat::weapons::{WeaponDraw, WeaponSelector};
use crate::core::rng::RandomSource;
use crate::core::types::ActorId;
use crate::events::{BattleEvent, EventLog};
use crate::stats::{Statistic, StatisticsSink};

/// Terminal result. A is the actor that triggered the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    WinnerA,
    WinnerB,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterState {
    Idle,
    Engaged,
    Resolved(Outcome),
}

/// Everything an encounter draws from or reports to
pub struct CombatContext<'a> {
    pub rng: &'a mut dyn RandomSource,
    pub weapons: &'a mut WeaponSelector,
    pub weapon_draw: WeaponDraw,
    pub events: &'a EventLog,
    pub stats: &'a dyn StatisticsSink,
}

/// One side of an encounter with its working specs
#[derive(Debug, Clone)]
pub struct Combatant {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub working: Specs,
    pub mood: Option<Mood>,
}

impl Combatant {
    fn snapshot(id: ActorId, actor: &Actor) -> Self {
        Self {
            id,
            name: actor.name.clone(),
            kind: actor.kind,
            working: actor.specs,
            mood: None,
        }
    }

    fn is_down(&self) -> bool {
        self.working.health <= 0
    }
}

/// Result of a single attack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Strike {
    defender_down: bool,
    attacker_down: bool,
}

#[derive(Debug, Clone)]
pub struct Encounter {
    first: Combatant,
    second: Combatant,
    state: EncounterState,
    rounds: u32,
}

impl Encounter {
    pub fn new(first_id: ActorId, first: &Actor, second_id: ActorId, second: &Actor) -> Self {
        Self {
            first: Combatant::snapshot(first_id, first),
            second: Combatant::snapshot(second_id, second),
            state: EncounterState::Idle,
            rounds: 0,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            EncounterState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn first(&self) -> &Combatant {
        &self.first
    }

    pub fn second(&self) -> &Combatant {
        &self.second
    }

    /// Potion and weapon flavor, then move to `Engaged`. No-op unless idle.
    pub fn engage(&mut self, ctx: &mut CombatContext<'_>) {
        if self.state != EncounterState::Idle {
            return;
        }

        ctx.events.emit(BattleEvent::Engaged {
            attacker: self.first.name.clone(),
            defender: self.second.name.clone(),
        });

        let potion = potion::assemble(&mut *ctx.rng);
        ctx.events.emit(BattleEvent::PotionCreated {
            potion: potion.to_string(),
        });

        ctx.weapons.draw(&mut *ctx.rng, ctx.weapon_draw);
        ctx.events.emit(BattleEvent::WeaponChosen {
            name: self.first.name.clone(),
            description: ctx.weapons.use_weapon(),
        });

        self.state = EncounterState::Engaged;
    }

    /// One round: A attacks, then B if nobody went down
    pub fn play_round(&mut self, ctx: &mut CombatContext<'_>) -> EncounterState {
        match self.state {
            EncounterState::Idle => self.engage(ctx),
            EncounterState::Engaged => {}
            EncounterState::Resolved(_) => return self.state,
        }

        self.rounds += 1;

        let hit = strike(&mut self.first, &mut self.second, ctx);
        if let Some(outcome) = settle(hit, &mut self.first, &mut self.second, ctx) {
            self.state = EncounterState::Resolved(outcome);
            return self.state;
        }

        let hit = strike(&mut self.second, &mut self.first, ctx);
        if let Some(outcome) = settle(hit, &mut self.second, &mut self.first, ctx) {
            // the second combatant attacked, so sides swap
            let outcome = match outcome {
                Outcome::WinnerA => Outcome::WinnerB,
                Outcome::WinnerB => Outcome::WinnerA,
                Outcome::Draw => Outcome::Draw,
            };
            self.state = EncounterState::Resolved(outcome);
            return self.state;
        }

        ctx.events.emit(BattleEvent::RoundEnded);
        self.state
    }

    /// Play rounds back to back until resolved
    pub fn resolve(&mut self, ctx: &mut CombatContext<'_>) -> Outcome {
        loop {
            if let EncounterState::Resolved(outcome) = self.play_round(ctx) {
                return outcome;
            }
        }
    }

    /// Write deaths and moods back to the two actors
    ///
    /// Returns `None` while the encounter is still running.
    pub fn commit(&self, first: &mut Actor, second: &mut Actor) -> Option<Outcome> {
        let outcome = self.outcome()?;
        for (combatant, actor) in [(&self.first, first), (&self.second, second)] {
            if combatant.is_down() {
                actor.mark_dead();
            }
            if combatant.mood.is_some() {
                actor.mood = combatant.mood;
            }
        }
        Some(outcome)
    }
}

fn strike(attacker: &mut Combatant, defender: &mut Combatant, ctx: &mut CombatContext<'_>) -> Strike {
    let max_multiplier = (attacker.working.luck / LUCK_PER_MULTIPLIER).max(1);
    let multiplier = ctx.rng.int_in_range(1, max_multiplier);
    let mut damage = attacker.working.attack.saturating_mul(multiplier);

    if roll_trigger(&mut *ctx.rng) {
        if let Some(skill) = unique_skill(attacker.kind) {
            ctx.events.emit(BattleEvent::SkillUsed {
                kind: attacker.kind,
                skill,
            });
            skill.apply(&mut damage, &mut attacker.working, &mut *ctx.rng);
        }
    }

    ctx.events.emit(BattleEvent::Attack {
        name: attacker.name.clone(),
        damage,
    });
    ctx.stats.add(&attacker.name, Statistic::AttacksPerformed, 1);

    defender.working.health = defender.working.health.saturating_sub(damage);
    ctx.events.emit(BattleEvent::HealthChanged {
        name: defender.name.clone(),
        health: defender.working.health,
    });

    Strike {
        defender_down: defender.is_down(),
        attacker_down: attacker.is_down(),
    }
}

/// Decide whether a strike ended the encounter, from the attacker's view
/// (`WinnerA` = attacker won).
///
/// Either side at or below zero health ends the encounter, including an
/// attacker whose own skill cost took it there; the defender then wins.
fn settle(
    strike: Strike,
    attacker: &mut Combatant,
    defender: &mut Combatant,
    ctx: &mut CombatContext<'_>,
) -> Option<Outcome> {
    match (strike.defender_down, strike.attacker_down) {
        (false, false) => None,
        (true, attacker_down) => {
            let mood = Mood::classify(attacker.working.health);
            attacker.mood = Some(mood);
            mood.dispatch(&attacker.name, ctx.events);

            if attacker_down {
                ctx.events.emit(BattleEvent::Draw);
                Some(Outcome::Draw)
            } else {
                announce(&attacker.name, &defender.name, ctx.events);
                Some(Outcome::WinnerA)
            }
        }
        (false, true) => {
            // attacker fell to its own skill
            let mood = Mood::classify(defender.working.health);
            defender.mood = Some(mood);
            mood.dispatch(&defender.name, ctx.events);
            announce(&defender.name, &attacker.name, ctx.events);
            Some(Outcome::WinnerB)
        }
    }
}

fn announce(winner: &str, loser: &str, events: &EventLog) {
    events.emit(BattleEvent::Victory {
        winner: winner.to_string(),
    });
    events.emit(BattleEvent::Defeated {
        name: loser.to_string(),
    });
}
