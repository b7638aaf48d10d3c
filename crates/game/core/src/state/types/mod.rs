pub mod agent;
pub mod board;
pub mod common;

// Re-export agent types
pub use agent::{Agent, Buff, MirrorMemory, PendingRanged, Personality};

// Re-export board types
pub use board::{Board, BoardError, CellKind, GoalCells, Neighbors, ResourceKind, TrapKind};

// Re-export common types
pub use common::{Cell, Direction};
