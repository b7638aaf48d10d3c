//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. [`crate::MoveError`], [`crate::BoardError`]) are
//! defined next to the operations they validate. This module provides the
//! shared severity classification they all report through [`GameError`].
//!
//! The AI policies never surface these errors to their callers: a rejected
//! move is a legal outcome of a turn, not a failure of the decision engine.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the turn simply has no effect.
    ///
    /// Examples: destination blocked, destination off the board
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: placing an item on a reserved goal cell
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and tests. Defaults to the type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
