//! World mutation surface invoked by agents.
//!
//! Each operation is one agent-level effect: stepping onto a neighbouring
//! cell (with pickup and shield rules), striking in melee, and scheduling or
//! resolving a delayed ranged strike. Policies decide *which* operation to
//! run; these functions decide what it does to the world.
pub mod combat;
pub mod movement;

pub use combat::RangedResolution;
pub use movement::{MoveError, Pickup, StepOutcome};
