//! Error taxonomy for command execution.
//!
//! Every failure is raised before the current phase is touched: a command
//! either yields a brand new phase or one of these errors, never both.
//! Only [`GameError::IllegalState`] is fatal to the request; everything else
//! is a rejected command the client can correct.

use crate::characters::StepError;
use crate::containers::ContainerError;
use crate::phase::PhaseName;

/// A shortage of some countable resource.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("not enough coins: need {needed}, have {available}")]
    Coins { needed: u8, available: u8 },

    #[error("no block cards left")]
    Blocks,
}

/// Failure of a guarded operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("{operation} is not supported during the {phase} phase")]
    UnsupportedInPhase {
        phase: PhaseName,
        operation: &'static str,
    },

    #[error("player '{username}' cannot act now")]
    InvalidPlayer { username: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("invalid character parameter #{index}: {source}")]
    InvalidCharacterParameter { index: usize, source: StepError },

    #[error("resource exhausted: {0}")]
    ResourceExhausted(#[from] ResourceError),

    #[error("illegal state: {0}")]
    IllegalState(String),
}

impl GameError {
    /// Shorthand for [`GameError::UnsupportedInPhase`].
    #[must_use]
    pub fn unsupported(phase: PhaseName, operation: &'static str) -> Self {
        Self::UnsupportedInPhase { phase, operation }
    }

    /// Shorthand for [`GameError::InvalidPlayer`].
    #[must_use]
    pub fn invalid_player(username: impl Into<String>) -> Self {
        Self::InvalidPlayer {
            username: username.into(),
        }
    }

    /// Shorthand for [`GameError::InvalidParameter`].
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Shorthand for [`GameError::IllegalState`].
    #[must_use]
    pub fn illegal(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Whether the client can retry with a corrected command.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::IllegalState(_))
    }
}

impl From<ContainerError> for GameError {
    fn from(err: ContainerError) -> Self {
        GameError::ResourceExhausted(ResourceError::Container(err))
    }
}
