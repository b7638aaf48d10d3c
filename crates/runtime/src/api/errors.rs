//! Unified error types surfaced by the runtime API.
//!
//! Wraps board construction failures and session misuse so clients can bubble
//! them up with consistent context.
use game_core::{BoardError, ErrorSeverity, GameError};
use thiserror::Error;

use crate::config::Mode;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("invalid runtime configuration: {reason}")]
    Config { reason: String },

    #[error("operation requires {expected} mode but the session runs {actual}")]
    ModeMismatch { expected: Mode, actual: Mode },

    #[error("the round is already over")]
    RoundOver,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Board(err) => err.severity(),
            Self::Config { .. } => ErrorSeverity::Validation,
            Self::ModeMismatch { .. } | Self::RoundOver => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Board(err) => err.error_code(),
            Self::Config { .. } => "RUNTIME_CONFIG",
            Self::ModeMismatch { .. } => "RUNTIME_MODE_MISMATCH",
            Self::RoundOver => "RUNTIME_ROUND_OVER",
        }
    }
}
