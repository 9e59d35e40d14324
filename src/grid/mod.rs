//! The shared battle grid
//!
//! The grid owns the actor registry and the single [`Gate`] that serializes
//! every movement step and every encounter across all actor tasks. Nothing
//! in the registry is reachable without holding the gate.

pub mod gate;

use std::sync::Arc;
use std::time::Duration;

use crate::actor::Actor;
use crate::combat::resolution::{CombatContext, Encounter, EncounterState, Outcome};
use crate::combat::weapons::{WeaponDraw, WeaponSelector};
use crate::core::error::{Result, SkirmishError};
use crate::core::rng::RandomSource;
use crate::core::types::{ActorId, Direction, Position};
use crate::events::{BattleEvent, EventLog};
use crate::stats::{Statistic, StatisticsSink};

pub use gate::{Gate, GateGuard};

/// What one iteration of an actor's loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorStep {
    /// Actor is dead and does nothing
    Idle,
    Moved(Position),
    Fought { position: Position, outcome: Outcome },
}

/// State guarded by the gate
pub struct Arena {
    size: i32,
    actors: Vec<Actor>,
    rng: Box<dyn RandomSource>,
    weapons: WeaponSelector,
    weapon_draw: WeaponDraw,
    encounters: u64,
}

impl Arena {
    fn new(size: i32, rng: Box<dyn RandomSource>) -> Self {
        Self {
            size,
            actors: Vec::new(),
            rng,
            weapons: WeaponSelector::new(),
            weapon_draw: WeaponDraw::default(),
            encounters: 0,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        (0..self.actors.len()).map(ActorId)
    }

    pub fn encounters(&self) -> u64 {
        self.encounters
    }

    pub fn weapons(&self) -> &WeaponSelector {
        &self.weapons
    }

    /// Another live actor of a different kind on the same cell
    pub fn find_opponent(&self, id: ActorId) -> Option<ActorId> {
        let actor = self.actor(id)?;
        self.actors
            .iter()
            .enumerate()
            .find(|(index, other)| *index != id.0 && actor.can_engage(other))
            .map(|(index, _)| ActorId(index))
    }

    /// Move one step in a random direction. `None` when the actor is dead.
    pub fn step(
        &mut self,
        id: ActorId,
        events: &EventLog,
        stats: &dyn StatisticsSink,
    ) -> Result<Option<Position>> {
        let alive = self
            .actor(id)
            .map(Actor::is_alive)
            .ok_or(SkirmishError::UnknownActor(id))?;
        if !alive {
            return Ok(None);
        }

        let direction = Direction::from_draw(self.rng.int_in_range(1, Direction::ALL.len() as i32));
        let size = self.size;
        let actor = &mut self.actors[id.0];
        actor.position = actor.position.stepped(direction, size);
        actor.move_count += 1;

        events.emit(BattleEvent::Moved {
            name: actor.name.clone(),
            position: actor.position,
            move_count: actor.move_count,
        });
        stats.add(&actor.name, Statistic::MovesPerformed, 1);

        Ok(Some(actor.position))
    }

    /// Names of live actors, in registry order
    pub fn survivors(&self) -> Vec<String> {
        self.actors
            .iter()
            .filter(|actor| actor.is_alive())
            .map(|actor| actor.name.clone())
            .collect()
    }

    fn combat_context<'a>(
        &'a mut self,
        events: &'a EventLog,
        stats: &'a dyn StatisticsSink,
    ) -> CombatContext<'a> {
        CombatContext {
            rng: self.rng.as_mut(),
            weapons: &mut self.weapons,
            weapon_draw: self.weapon_draw,
            events,
            stats,
        }
    }

    fn pair_mut(&mut self, a: ActorId, b: ActorId) -> (&mut Actor, &mut Actor) {
        debug_assert_ne!(a, b);
        if a.0 < b.0 {
            let (left, right) = self.actors.split_at_mut(b.0);
            (&mut left[a.0], &mut right[0])
        } else {
            let (left, right) = self.actors.split_at_mut(a.0);
            (&mut right[0], &mut left[b.0])
        }
    }
}

pub struct Grid {
    size: i32,
    gate: Gate<Arena>,
    events: Arc<EventLog>,
    stats: Arc<dyn StatisticsSink>,
    round_pause: Duration,
}

impl Grid {
    /// Empty grid with coordinates in `[0, size]` on both axes
    pub fn new(
        size: i32,
        rng: Box<dyn RandomSource>,
        events: Arc<EventLog>,
        stats: Arc<dyn StatisticsSink>,
    ) -> Self {
        Self {
            size,
            gate: Gate::new(Arena::new(size, rng)),
            events,
            stats,
            round_pause: Duration::ZERO,
        }
    }

    pub fn with_round_pause(mut self, pause: Duration) -> Self {
        self.round_pause = pause;
        self
    }

    pub fn with_weapon_draw(mut self, mode: WeaponDraw) -> Self {
        self.gate.get_mut().weapon_draw = mode;
        self
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn events(&self) -> &Arc<EventLog> {
        &self.events
    }

    /// Register `actor` at `(x, y)`
    ///
    /// Out-of-bounds coordinates are logged and the actor is left out of
    /// the registry for good.
    pub fn place(&mut self, mut actor: Actor, x: i32, y: i32) -> Result<ActorId> {
        let position = Position::new(x, y);
        if !position.within(self.size) {
            self.events.emit(BattleEvent::PlacementRejected {
                name: actor.name.clone(),
                x,
                y,
            });
            return Err(SkirmishError::InvalidPlacement {
                name: actor.name,
                x,
                y,
                size: self.size,
            });
        }

        actor.position = position;
        let arena = self.gate.get_mut();
        arena.actors.push(actor);
        Ok(ActorId(arena.actors.len() - 1))
    }

    /// Hold the gate. Dropping the guard releases it.
    pub async fn enter(&self) -> GateGuard<'_, Arena> {
        self.gate.enter().await
    }

    /// Run `body` while holding the gate
    pub async fn with_exclusive_access<R>(&self, body: impl FnOnce(&mut Arena) -> R) -> R {
        let mut arena = self.gate.enter().await;
        body(&mut arena)
    }

    /// Movement scope: one random step for `id`
    pub async fn step_actor(&self, id: ActorId) -> Result<Option<Position>> {
        let mut arena = self.gate.enter().await;
        arena.step(id, &self.events, &*self.stats)
    }

    /// Encounter scope: detect an opponent and, if there is one, fight to the end
    ///
    /// Detection and resolution happen under the same permit, so the pair
    /// found is exactly the pair that fights.
    pub async fn engage(&self, id: ActorId) -> Result<Option<Outcome>> {
        let mut arena = self.gate.enter().await;
        if arena.actor(id).is_none() {
            return Err(SkirmishError::UnknownActor(id));
        }
        let Some(opponent) = arena.find_opponent(id) else {
            return Ok(None);
        };
        let outcome = self.run_encounter(&mut arena, id, opponent).await;
        Ok(Some(outcome))
    }

    /// One iteration of an actor's loop: move, then fight if someone is there
    pub async fn perform_action(&self, id: ActorId) -> Result<ActorStep> {
        let Some(position) = self.step_actor(id).await? else {
            return Ok(ActorStep::Idle);
        };
        match self.engage(id).await? {
            Some(outcome) => Ok(ActorStep::Fought { position, outcome }),
            None => Ok(ActorStep::Moved(position)),
        }
    }

    async fn run_encounter(&self, arena: &mut Arena, first: ActorId, second: ActorId) -> Outcome {
        arena.encounters += 1;
        let mut encounter = Encounter::new(
            first,
            &arena.actors[first.0],
            second,
            &arena.actors[second.0],
        );

        let outcome = loop {
            let state = {
                let mut ctx = arena.combat_context(&self.events, &*self.stats);
                encounter.play_round(&mut ctx)
            };
            if let EncounterState::Resolved(outcome) = state {
                break outcome;
            }
            if !self.round_pause.is_zero() {
                tokio::time::sleep(self.round_pause).await;
            }
        };

        let (a, b) = arena.pair_mut(first, second);
        encounter.commit(a, b);
        tracing::debug!(
            rounds = encounter.rounds(),
            ?outcome,
            "encounter resolved"
        );
        outcome
    }

    /// Copy of one actor's current state
    pub async fn actor(&self, id: ActorId) -> Option<Actor> {
        self.with_exclusive_access(|arena| arena.actor(id).cloned()).await
    }

    pub async fn actor_ids(&self) -> Vec<ActorId> {
        self.with_exclusive_access(|arena| arena.ids().collect()).await
    }

    pub async fn survivors(&self) -> Vec<String> {
        self.with_exclusive_access(|arena| arena.survivors()).await
    }

    /// Log every survivor, plus a victory notice when exactly one is left
    pub async fn report_survivors(&self) -> Vec<String> {
        let survivors = self.survivors().await;
        for name in &survivors {
            self.events.emit(BattleEvent::Survivor { name: name.clone() });
        }
        if survivors.len() == 1 {
            self.events.emit(BattleEvent::SoleSurvivor);
        }
        survivors
    }

    pub async fn encounters(&self) -> u64 {
        self.with_exclusive_access(|arena| arena.encounters()).await
    }

    pub fn peak_occupancy(&self) -> usize {
        self.gate.peak_occupancy()
    }

    pub fn gate_entries(&self) -> u64 {
        self.gate.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorKind, Specs};
    use crate::core::rng::ScriptedRandom;
    use crate::stats::StatisticsContainer;

    fn test_grid(draws: Vec<i32>) -> (Grid, Arc<EventLog>, Arc<StatisticsContainer>) {
        let events = Arc::new(EventLog::new());
        let stats = Arc::new(StatisticsContainer::new());
        let grid = Grid::new(
            5,
            Box::new(ScriptedRandom::new(draws)),
            Arc::clone(&events),
            stats.clone(),
        );
        (grid, events, stats)
    }

    fn knight() -> Actor {
        Actor::new("Knight", ActorKind::Knight, Specs::new(15, 100, 10))
    }

    fn mage() -> Actor {
        Actor::new("Mage", ActorKind::Mage, Specs::new(20, 50, 10))
    }

    #[tokio::test]
    async fn test_place_rejects_out_of_bounds() {
        let (mut grid, events, _) = test_grid(vec![]);
        assert!(grid.place(knight(), 0, 5).is_ok());
        let err = grid.place(mage(), 6, 0).unwrap_err();
        assert!(matches!(err, SkirmishError::InvalidPlacement { x: 6, .. }));

        assert_eq!(grid.actor_ids().await.len(), 1);
        assert_eq!(events.lines(), vec!["Invalid position for adventurer Mage".to_string()]);
    }

    #[tokio::test]
    async fn test_step_moves_and_counts() {
        let (mut grid, events, stats) = test_grid(vec![1, 3, 3]);
        let id = grid.place(knight(), 0, 0).unwrap();

        assert_eq!(grid.step_actor(id).await.unwrap(), Some(Position::new(1, 0)));
        assert_eq!(grid.step_actor(id).await.unwrap(), Some(Position::new(0, 0)));
        // west at the edge is a no-op but still a move
        assert_eq!(grid.step_actor(id).await.unwrap(), Some(Position::new(0, 0)));

        assert_eq!(grid.actor(id).await.unwrap().move_count, 3);
        assert_eq!(stats.get("Knight", Statistic::MovesPerformed), 3);
        assert_eq!(events.lines()[0], "Knight coordinates are 1, 0 after move 1");
    }

    #[tokio::test]
    async fn test_find_opponent_ignores_same_kind() {
        let (mut grid, _, _) = test_grid(vec![]);
        let a = grid.place(knight(), 2, 2).unwrap();
        let squire = Actor::new("Squire", ActorKind::Knight, Specs::new(5, 30, 10));
        grid.place(squire, 2, 2).unwrap();
        let m = grid.place(mage(), 2, 3).unwrap();

        grid.with_exclusive_access(|arena| {
            assert_eq!(arena.find_opponent(a), None);
        })
        .await;

        grid.with_exclusive_access(|arena| arena.actors[m.0].position = Position::new(2, 2))
            .await;
        let found = grid.with_exclusive_access(|arena| arena.find_opponent(a)).await;
        assert_eq!(found, Some(m));
    }

    #[tokio::test]
    async fn test_unknown_actor_is_error() {
        let (grid, _, _) = test_grid(vec![]);
        assert!(matches!(
            grid.step_actor(ActorId(3)).await,
            Err(SkirmishError::UnknownActor(ActorId(3)))
        ));
    }

    #[tokio::test]
    async fn test_dead_actor_is_idle() {
        let (mut grid, _, _) = test_grid(vec![]);
        let id = grid.place(knight(), 1, 1).unwrap();
        grid.with_exclusive_access(|arena| arena.actors[id.0].mark_dead()).await;
        assert_eq!(grid.perform_action(id).await.unwrap(), ActorStep::Idle);
    }

    #[tokio::test]
    async fn test_collision_runs_encounter() {
        // move east onto the mage, potion, bow, then knight one-shots
        let (mut grid, events, _) = test_grid(vec![1, 1, 1, 1, 3, 1, 1]);
        let k = grid
            .place(Actor::new("Knight", ActorKind::Knight, Specs::new(60, 100, 10)), 1, 1)
            .unwrap();
        let m = grid.place(mage(), 2, 1).unwrap();

        let step = grid.perform_action(k).await.unwrap();
        assert_eq!(
            step,
            ActorStep::Fought {
                position: Position::new(2, 1),
                outcome: Outcome::WinnerA
            }
        );

        let mage = grid.actor(m).await.unwrap();
        assert!(!mage.is_alive());
        assert_eq!(mage.position, Position::OFF_GRID);
        let knight = grid.actor(k).await.unwrap();
        assert_eq!(knight.mood, Some(crate::combat::mood::Mood::Happy));
        // persistent stats untouched
        assert_eq!(knight.specs.health, 100);
        assert_eq!(grid.encounters().await, 1);
        assert!(events.lines().contains(&"Mage is defeated".to_string()));
        // the weapon drawn for the encounter stays equipped afterwards
        let equipped = grid.with_exclusive_access(|arena| arena.weapons().equipped()).await;
        assert_eq!(equipped, crate::combat::weapons::Weapon::Bow);
    }
}
