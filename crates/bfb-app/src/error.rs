//! Error types for the bfb-app service layer.

use std::path::PathBuf;

use bfb_model::ModelError;

/// Application error type wrapping the lower crates' errors for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Parameter error: {0}")]
    Params(String),

    #[error("Failed to read project directory: {path}")]
    ProjectRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Model error: {0}")]
    Model(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bfb-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<bfb_params::ParamsError> for AppError {
    fn from(err: bfb_params::ParamsError) -> Self {
        AppError::Params(err.to_string())
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<bfb_results::ResultsError> for AppError {
    fn from(err: bfb_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for AppError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        AppError::WorkerPool(err.to_string())
    }
}
