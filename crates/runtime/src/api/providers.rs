//! Synchronous abstraction for sourcing agent intent.
//!
//! The session drives every AI-controlled agent through [`ActionProvider`] so
//! the tiered and symmetric policies plug into the same turn loop.
use std::time::Instant;

use game_core::{Agent, Board, Cell, Difficulty, Direction};
use rand::Rng;

/// What an agent did with its turn.
///
/// Providers apply the action to the world before returning it; the value is
/// a record for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// The agent was stunned and consumed one stun turn.
    Stunned { remaining: u32 },
    /// The agent stepped from one cell to an adjacent one.
    Moved { from: Cell, to: Cell },
    /// The chosen step was rejected by the board.
    MoveBlocked { direction: Direction },
    /// A melee strike; `None` when the target was out of reach.
    Melee { damage: Option<i32> },
    /// A ranged strike was scheduled at the target's current cell.
    RangedScheduled { target: Cell },
    /// No legal action was available.
    Idle,
}

impl TurnAction {
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Trait for deciding and applying one turn for an AI-controlled agent.
///
/// Implementations mutate `agent`, `opponent` and `board` in place, consume
/// randomness only through `rng`, and read wall-clock dependent buffs at `now`.
pub trait ActionProvider {
    fn provide_action<R: Rng + ?Sized>(
        &self,
        agent: &mut Agent,
        opponent: &mut Agent,
        board: &mut Board,
        difficulty: Difficulty,
        rng: &mut R,
        now: Instant,
    ) -> TurnAction;
}
