//! AI decision engine and turn driver for the grid duel.
//!
//! This crate sits on top of the `game-core` world model and decides what the
//! AI-controlled agents do each turn. Consumers embed [`Session`] to play a
//! round, or call the policies directly against their own board.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the error type, [`TurnAction`] and the [`ActionProvider`] seam
//! - [`providers`] hosts the pathfinder, adversarial search and both policies
//! - [`session`] alternates turns and evaluates the round outcome
//! - [`config`] holds the AI tuning and session settings
pub mod api;
pub mod config;
pub mod providers;
pub mod session;

pub use api::{ActionProvider, Result, RuntimeError, TurnAction};
pub use config::{AiConfig, Mode, RuntimeConfig, SearchConfig, Strategy};
pub use providers::ai::{
    AdversarialSearch, DecisionContext, SearchAction, best_action, find_path, next_step, predict,
};
pub use providers::{BehaviorPolicy, MirrorPolicy};
pub use session::{Session, Side};
