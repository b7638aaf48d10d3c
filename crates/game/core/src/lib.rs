//! Deterministic world model for the grid duel.
//!
//! `game-core` defines the board, the agents, and the rules that mutate them
//! (movement, pickups, melee, delayed ranged strikes, win conditions). The
//! runtime's AI policies consume this crate as their World model: they query
//! the board and agents and apply exactly one action per turn through the
//! operations in [`action`].
pub mod action;
pub mod config;
pub mod error;
pub mod state;

pub use action::{MoveError, Pickup, RangedResolution, StepOutcome};
pub use config::{Difficulty, GameConfig, ItemCounts};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Agent, Board, BoardError, Buff, Cell, CellKind, Direction, GoalCells, MirrorMemory, Neighbors,
    OutcomeReason, PendingRanged, Personality, ResourceKind, RoundOutcome, TrapKind, Winner,
    generate_board,
};
