//! Authoritative world model.
//!
//! This module owns the board, the two agents and the helpers that create
//! and score a round. The AI policies in the runtime read this state and
//! mutate it through the operations in [`crate::action`].
pub mod generation;
pub mod outcome;
pub mod types;

pub use generation::generate_board;
pub use outcome::{OutcomeReason, RoundOutcome, Winner};
pub use types::{
    Agent, Board, BoardError, Buff, Cell, CellKind, Direction, GoalCells, MirrorMemory, Neighbors,
    PendingRanged, Personality, ResourceKind, TrapKind,
};
