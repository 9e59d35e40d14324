use thiserror::Error;

use crate::core::types::ActorId;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Invalid position for {name}: ({x}, {y}) is outside [0, {size}]")]
    InvalidPlacement { name: String, x: i32, y: i32, size: i32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Actor not registered: {0:?}")]
    UnknownActor(ActorId),

    #[error("Unknown actor kind: {0}")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
