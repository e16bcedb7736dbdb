//! Error types for Operant environments.

use thiserror::Error;

/// Result type for Operant operations.
pub type Result<T> = std::result::Result<T, OperantError>;

/// Error types that can occur while configuring or driving an environment.
///
/// Every error aborts the current call before any environment state is
/// touched, so a caller can always recover with a fresh `reset`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperantError {
    /// Invalid configuration (non-positive mass, zero timestep, etc.)
    #[error("invalid configuration for '{param}': {message}")]
    InvalidConfig { param: String, message: String },

    /// Action component outside the declared action-space bounds
    #[error("action component {index} = {value} outside [{low}, {high}]")]
    InvalidAction {
        index: usize,
        value: f64,
        low: f64,
        high: f64,
    },

    /// Action slice has the wrong length
    #[error("action dimension mismatch: expected {expected}, got {actual}")]
    ActionDimensionMismatch { expected: usize, actual: usize },

    /// A derived quantity left the finite domain (NaN or infinite)
    #[error("non-finite {quantity}: {value}")]
    NumericDomain { quantity: &'static str, value: f64 },

    /// `step` was called before the first `reset`
    #[error("environment must be reset before stepping")]
    NotReset,

    /// `step` was called after the episode already ended
    #[error("episode has terminated; call reset before stepping again")]
    EpisodeTerminated,

    /// Caller-provided buffer has the wrong length
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl OperantError {
    /// Shorthand for [`OperantError::InvalidConfig`].
    pub fn config(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            param: param.into(),
            message: message.into(),
        }
    }

    /// True for errors caused by the action passed to `step`.
    pub fn is_action_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAction { .. } | Self::ActionDimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = OperantError::InvalidAction {
            index: 0,
            value: 2.0,
            low: -1.0,
            high: 1.0,
        };
        assert_eq!(err.to_string(), "action component 0 = 2 outside [-1, 1]");

        let err = OperantError::config("mass", "must be positive");
        assert_eq!(err.to_string(), "invalid configuration for 'mass': must be positive");
    }

    #[test]
    fn test_action_error_classification() {
        assert!(OperantError::ActionDimensionMismatch { expected: 4, actual: 3 }.is_action_error());
        assert!(!OperantError::NotReset.is_action_error());
        assert!(!OperantError::NumericDomain { quantity: "rotor speed", value: f64::NAN }
            .is_action_error());
    }
}
