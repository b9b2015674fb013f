//! Application service layer for the BFB case evaluator.
//!
//! Discovers cases in a project directory, runs them serially or on a worker pool,
//! writes per-case reports and results, and aggregates a cross-case comparison table.

pub mod error;
pub mod progress;
pub mod project_service;
pub mod report;
pub mod run_service;
pub mod summary;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use progress::{CaseEvent, CaseStage, ProgressSink};
pub use project_service::{CaseDir, CaseValidation, discover_cases, load_case, validate_project};
pub use report::render_report;
pub use run_service::{
    CaseFailure, CaseOutcome, CaseResult, CaseSuccess, FailureKind, OutputPolicy, RunContext,
    RunMode, RunReport, RunStatus, clean_project, run_cases, run_project, show_case,
};
pub use summary::{COMPARISON_FILE, comparison_csv};
