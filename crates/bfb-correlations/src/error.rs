//! Correlation errors.

use bfb_core::CoreError;
use thiserror::Error;

/// Result type for correlation evaluations.
pub type CorrelationResult<T> = Result<T, CorrelationError>;

/// Errors raised while evaluating physical-property correlations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Non-physical input (non-positive diameter, density, porosity, ...).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Value out of the correlation's valid range.
    #[error("Value out of range for {what}: {value}")]
    OutOfRange { what: &'static str, value: f64 },

    /// Invalid argument shape (length mismatch, empty input, ...).
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Species key not present in the property table.
    #[error("Unknown species `{name}`")]
    UnknownSpecies { name: String },

    /// Mixing-rule selector not recognized.
    #[error("Viscosity mixing rule `{name}` not available (expected `graham` or `herning`)")]
    UnknownMixingRule { name: String },

    /// Iterative solve did not bracket or converge.
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Transient solve produced non-finite values.
    #[error("Solution diverged for {what} at time step {step}")]
    Diverged { what: &'static str, step: usize },
}

impl From<CoreError> for CorrelationError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } | CoreError::NonPositive { what, value } => {
                CorrelationError::NonPhysical { what, value }
            }
            CoreError::OutOfRange { what, value, .. } => {
                CorrelationError::OutOfRange { what, value }
            }
        }
    }
}
