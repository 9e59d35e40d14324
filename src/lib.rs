//! Dungeon Skirmish - concurrent turn-based grid battles

pub mod actor;
pub mod combat;
pub mod core;
pub mod events;
pub mod grid;
pub mod simulation;
pub mod stats;
