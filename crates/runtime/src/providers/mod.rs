//! Action provider implementations for AI-controlled agents.

pub mod ai;

pub use ai::{BehaviorPolicy, MirrorPolicy};
