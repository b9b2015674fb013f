//! bfb-results: per-case result files and the artifact manifest used for cleanup.

pub mod artifacts;
pub mod hash;
pub mod store;
pub mod types;

pub use artifacts::{ARTIFACT_MANIFEST_FILE, ArtifactManifest, CleanSummary, clean};
pub use hash::compute_params_hash;
pub use store::{CaseStore, RESULTS_DIR, profile_from_samples};
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No stored results for case {case_id}")]
    CaseNotFound { case_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Malformed temperature profile: {message}")]
    MalformedProfile { message: String },
}
