//! Error types for case solving.

use bfb_correlations::CorrelationError;
use bfb_params::ValidationError;
use thiserror::Error;

/// Errors raised while solving one case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Parameters are inconsistent or name something unknown.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Non-positive size, porosity or density, or sphericity outside (0, 1].
    #[error("Invalid geometry: {what} = {value}")]
    InvalidGeometry { what: String, value: f64 },

    /// An iterative or transient evaluation produced non-finite values.
    #[error("Numerical divergence: {what}")]
    NumericalDivergence { what: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// Classify any correlation error as a configuration error.
    pub fn configuration(e: CorrelationError) -> Self {
        ModelError::Configuration {
            message: e.to_string(),
        }
    }

    /// Prefix the error with the population or step that raised it.
    pub fn context(self, scope: &str) -> Self {
        match self {
            ModelError::Configuration { message } => ModelError::Configuration {
                message: format!("{scope}: {message}"),
            },
            ModelError::InvalidGeometry { what, value } => ModelError::InvalidGeometry {
                what: format!("{scope}.{what}"),
                value,
            },
            ModelError::NumericalDivergence { what } => ModelError::NumericalDivergence {
                what: format!("{scope}: {what}"),
            },
        }
    }
}

impl From<CorrelationError> for ModelError {
    fn from(e: CorrelationError) -> Self {
        match e {
            CorrelationError::NonPhysical { what, value }
            | CorrelationError::OutOfRange { what, value } => ModelError::InvalidGeometry {
                what: what.to_string(),
                value,
            },
            CorrelationError::ConvergenceFailed { .. } | CorrelationError::Diverged { .. } => {
                ModelError::NumericalDivergence {
                    what: e.to_string(),
                }
            }
            CorrelationError::InvalidArg { .. }
            | CorrelationError::UnknownSpecies { .. }
            | CorrelationError::UnknownMixingRule { .. } => ModelError::Configuration {
                message: e.to_string(),
            },
        }
    }
}

impl From<ValidationError> for ModelError {
    fn from(e: ValidationError) -> Self {
        ModelError::Configuration {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divergence_maps_to_numerical_divergence() {
        let err: ModelError = CorrelationError::Diverged {
            what: "particle temperature",
            step: 3,
        }
        .into();
        assert!(matches!(err, ModelError::NumericalDivergence { .. }));
    }

    #[test]
    fn unknown_rule_maps_to_configuration() {
        let err: ModelError = CorrelationError::UnknownMixingRule {
            name: "wilke".into(),
        }
        .into();
        assert!(matches!(err, ModelError::Configuration { .. }));
    }

    #[test]
    fn context_prefixes_geometry_field() {
        let err = ModelError::InvalidGeometry {
            what: "phi".into(),
            value: 1.2,
        }
        .context("char");
        assert_eq!(err.to_string(), "Invalid geometry: char.phi = 1.2");
    }
}
