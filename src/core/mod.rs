pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::SimulationConfig;
pub use error::{Result, SkirmishError};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use types::{ActorId, Direction, Position};
