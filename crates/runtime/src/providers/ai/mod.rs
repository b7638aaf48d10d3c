//! AI decision engine for the grid duel.
//!
//! Two policies drive AI-controlled agents, one turn per call:
//!
//! 1. [`BehaviorPolicy`]: the AI side of a player-vs-AI round, tiered by
//!    difficulty
//! 2. [`MirrorPolicy`]: the symmetric ladder both agents of an AI-vs-AI round
//!    share
//!
//! Both are thin compositions over the same building blocks:
//!
//! - [`pathfinding`]: A* shortest paths around obstacles
//! - [`search`]: bounded minimax with alpha-beta pruning
//! - [`fuzzy`]: clamped-ramp features and personality-weighted desirabilities
//! - [`DecisionContext`]: per-turn stepping primitives and the random source
//!
//! [`predict`] previews where an agent will be next turn for aiming ranged
//! strikes.

pub mod context;
pub mod fuzzy;
pub mod mirror;
pub mod pathfinding;
pub mod policy;
pub mod prediction;
pub mod search;

pub use context::DecisionContext;
pub use fuzzy::{Desirability, Desire, FuzzyFeatures, Objectives, TierProfile};
pub use mirror::{MirrorPolicy, farther_corner};
pub use pathfinding::{find_path, next_step};
pub use policy::BehaviorPolicy;
pub use prediction::predict;
pub use search::{AdversarialSearch, Duel, SearchAction, best_action};
