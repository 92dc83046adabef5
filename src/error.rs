//! Encoder error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestartError {
    /// Structural data-integrity violation the restart format cannot represent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Lookup step {step} out of range: schedule has {len} steps")]
    StepOutOfRange { step: usize, len: usize },

    #[error("Time error: {0}")]
    Time(String),
}

impl RestartError {
    pub fn invalid(message: impl Into<String>) -> Self {
        RestartError::InvalidArgument(message.into())
    }

    /// True for structural violations, including out-of-range lookup steps.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            RestartError::InvalidArgument(_) | RestartError::StepOutOfRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RestartError>;
