//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the decision logic under [`crate::providers`] can stay focused on choosing
//! moves.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::{ActionProvider, TurnAction};
