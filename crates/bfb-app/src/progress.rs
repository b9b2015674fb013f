use std::sync::Arc;

/// Step of one case's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStage {
    Loading,
    Solving,
    Saving,
    Completed,
    Failed,
}

#[derive(Debug, Clone)]
pub struct CaseEvent {
    /// Label of the run the case belongs to.
    pub run_label: String,
    pub case_id: String,
    pub stage: CaseStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
}

/// Receives case events. Called from worker threads in parallel mode.
pub type ProgressSink = Arc<dyn Fn(&CaseEvent) + Send + Sync>;
