//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Index of an actor in the grid registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Where dead actors are parked, outside every addressable cell
    pub const OFF_GRID: Position = Position { x: -1, y: -1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates lie in `[0, size]`
    pub fn within(&self, size: i32) -> bool {
        (0..=size).contains(&self.x) && (0..=size).contains(&self.y)
    }

    /// Apply one step, clamped at the grid edges. Never wraps.
    pub fn stepped(self, direction: Direction, size: i32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: (self.x + dx).clamp(0, size),
            y: (self.y + dy).clamp(0, size),
        }
    }
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

impl Direction {
    /// Directions in draw order: a draw of `n` in `[1, 4]` selects `ALL[n - 1]`
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, 1),
            Direction::West => (-1, 0),
            Direction::South => (0, -1),
        }
    }

    /// Map a draw in `[1, 4]` to a direction. Out-of-range draws clamp.
    pub fn from_draw(draw: i32) -> Self {
        Self::ALL[(draw.clamp(1, 4) - 1) as usize]
    }
}
