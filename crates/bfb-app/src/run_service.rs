//! Case runner.
//!
//! Solves every case of a project, serially or on a per-run worker pool. Each case is
//! loaded, solved and written on its own; a failing case becomes a [`CaseFailure`] and the
//! others carry on. All run state lives in the [`RunContext`], so independent runs can share
//! a process.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use bfb_model::{ModelError, ResultRecord, SolveOptions, solve_case};
use bfb_params::{ParameterSet, ParamsError};
use bfb_results::{ArtifactManifest, CaseStore};
use rayon::prelude::*;
use tracing::{Span, debug, info, info_span, warn};

use crate::error::{AppError, AppResult};
use crate::progress::{CaseEvent, CaseStage, ProgressSink};
use crate::project_service::{CaseDir, discover_cases};
use crate::report::render_report;
use crate::summary::{COMPARISON_FILE, comparison_csv};

/// How cases are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One case after another, in identifier order.
    Serial,
    /// Fixed-size worker pool; `None` sizes it to the available hardware parallelism.
    Parallel { workers: Option<usize> },
}

/// What a run writes to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPolicy {
    /// Per-case results and report, `comparison.csv`, and the artifact manifest.
    Write,
    /// Nothing; results are only returned.
    InMemory,
}

/// Everything one run needs. Cloned into workers; never global.
#[derive(Clone)]
pub struct RunContext {
    /// Span label for log lines of this run.
    pub label: String,
    pub mode: RunMode,
    pub solve: SolveOptions,
    pub output: OutputPolicy,
    pub progress: Option<ProgressSink>,
}

impl fmt::Debug for RunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunContext")
            .field("label", &self.label)
            .field("mode", &self.mode)
            .field("solve", &self.solve)
            .field("output", &self.output)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl RunContext {
    pub fn new(label: impl Into<String>, mode: RunMode) -> Self {
        Self {
            label: label.into(),
            mode,
            solve: SolveOptions::default(),
            output: OutputPolicy::Write,
            progress: None,
        }
    }

    pub fn serial() -> Self {
        Self::new("bfb", RunMode::Serial)
    }

    pub fn parallel(workers: Option<usize>) -> Self {
        Self::new("bfb", RunMode::Parallel { workers })
    }

    pub fn with_output(mut self, output: OutputPolicy) -> Self {
        self.output = output;
        self
    }

    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    pub fn with_solve_options(mut self, solve: SolveOptions) -> Self {
        self.solve = solve;
        self
    }

    /// Worker count for this run; 1 in serial mode.
    pub fn worker_count(&self) -> usize {
        match self.mode {
            RunMode::Serial => 1,
            RunMode::Parallel { workers: Some(n) } => n.max(1),
            RunMode::Parallel { workers: None } => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    fn emit(&self, case_id: &str, stage: CaseStage, started: Instant, message: Option<String>) {
        if let Some(sink) = &self.progress {
            sink(&CaseEvent {
                run_label: self.label.clone(),
                case_id: case_id.to_string(),
                stage,
                elapsed_wall_s: started.elapsed().as_secs_f64(),
                message,
            });
        }
    }
}

/// Why a case failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Configuration,
    InvalidGeometry,
    NumericalDivergence,
    /// Solved, but results could not be written.
    Output,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Configuration => "configuration",
            FailureKind::InvalidGeometry => "invalid geometry",
            FailureKind::NumericalDivergence => "numerical divergence",
            FailureKind::Output => "output",
        };
        f.write_str(s)
    }
}

/// A failed case, tagged with its identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("case {case_id} failed ({kind}): {message}")]
pub struct CaseFailure {
    pub case_id: String,
    pub kind: FailureKind,
    pub message: String,
}

impl CaseFailure {
    fn from_params(case_id: &str, err: ParamsError) -> Self {
        Self {
            case_id: case_id.to_string(),
            kind: FailureKind::Configuration,
            message: err.to_string(),
        }
    }

    fn from_model(case_id: &str, err: ModelError) -> Self {
        let kind = match err {
            ModelError::Configuration { .. } => FailureKind::Configuration,
            ModelError::InvalidGeometry { .. } => FailureKind::InvalidGeometry,
            ModelError::NumericalDivergence { .. } => FailureKind::NumericalDivergence,
        };
        Self {
            case_id: case_id.to_string(),
            kind,
            message: err.to_string(),
        }
    }
}

/// A solved case.
#[derive(Debug, Clone)]
pub struct CaseSuccess {
    pub params: ParameterSet,
    pub record: ResultRecord,
    /// Files written for the case.
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum CaseOutcome {
    Success(Box<CaseSuccess>),
    Failure(CaseFailure),
}

/// Identifier and outcome of one case.
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case_id: String,
    pub outcome: CaseOutcome,
}

/// Overall run classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Succeeded,
    PartiallyFailed,
    AllFailed,
    NoCases,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub label: String,
    pub mode: RunMode,
    /// Outcomes in completion order; use [`RunReport::sorted`] for identifier order.
    pub cases: Vec<CaseResult>,
    /// Path of the comparison table, when written.
    pub comparison: Option<PathBuf>,
    pub elapsed_wall_s: f64,
}

impl RunReport {
    pub fn successes(&self) -> Vec<&CaseSuccess> {
        self.cases
            .iter()
            .filter_map(|c| match &c.outcome {
                CaseOutcome::Success(s) => Some(s.as_ref()),
                CaseOutcome::Failure(_) => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<&CaseFailure> {
        self.cases
            .iter()
            .filter_map(|c| match &c.outcome {
                CaseOutcome::Failure(f) => Some(f),
                CaseOutcome::Success(_) => None,
            })
            .collect()
    }

    /// Records of successful cases, sorted by identifier.
    pub fn records(&self) -> Vec<&ResultRecord> {
        let mut records: Vec<&ResultRecord> =
            self.successes().into_iter().map(|s| &s.record).collect();
        records.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        records
    }

    /// Case results sorted by identifier.
    pub fn sorted(&self) -> Vec<&CaseResult> {
        let mut cases: Vec<&CaseResult> = self.cases.iter().collect();
        cases.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        cases
    }

    pub fn status(&self) -> RunStatus {
        let failed = self.failures().len();
        match (self.cases.len(), failed) {
            (0, _) => RunStatus::NoCases,
            (_, 0) => RunStatus::Succeeded,
            (n, f) if f == n => RunStatus::AllFailed,
            _ => RunStatus::PartiallyFailed,
        }
    }
}

/// Discover and run every case in `project_dir`.
pub fn run_project(project_dir: &Path, ctx: &RunContext) -> AppResult<RunReport> {
    let cases = discover_cases(project_dir)?;
    run_cases(project_dir, &cases, ctx)
}

/// Run the given cases. `project_dir` receives the comparison table and artifact manifest.
pub fn run_cases(project_dir: &Path, cases: &[CaseDir], ctx: &RunContext) -> AppResult<RunReport> {
    let started = Instant::now();
    let span = info_span!("run", label = %ctx.label, cases = cases.len());
    let _enter = span.enter();
    info!(mode = ?ctx.mode, workers = ctx.worker_count(), "starting run");

    let results: Vec<CaseResult> = match ctx.mode {
        RunMode::Serial => cases
            .iter()
            .map(|case| run_case(case, ctx, started))
            .collect(),
        RunMode::Parallel { .. } => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(ctx.worker_count())
                .thread_name(|i| format!("bfb-worker-{i}"))
                .build()?;
            let parent = Span::current();
            pool.install(|| {
                cases
                    .par_iter()
                    .map(|case| parent.in_scope(|| run_case(case, ctx, started)))
                    .collect()
            })
        }
    };

    let mut report = RunReport {
        label: ctx.label.clone(),
        mode: ctx.mode,
        cases: results,
        comparison: None,
        elapsed_wall_s: 0.0,
    };

    if ctx.output == OutputPolicy::Write && !report.cases.is_empty() {
        report.comparison = Some(write_project_outputs(project_dir, &report)?);
    }

    report.elapsed_wall_s = started.elapsed().as_secs_f64();
    info!(
        succeeded = report.successes().len(),
        failed = report.failures().len(),
        status = ?report.status(),
        elapsed_s = report.elapsed_wall_s,
        "run finished"
    );
    Ok(report)
}

fn run_case(case: &CaseDir, ctx: &RunContext, started: Instant) -> CaseResult {
    let outcome = match solve_and_store(case, ctx, started) {
        Ok(success) => {
            info!(case = %case.id, "case solved");
            ctx.emit(&case.id, CaseStage::Completed, started, None);
            CaseOutcome::Success(Box::new(success))
        }
        Err(failure) => {
            warn!(case = %case.id, kind = %failure.kind, error = %failure.message, "case failed");
            ctx.emit(
                &case.id,
                CaseStage::Failed,
                started,
                Some(failure.message.clone()),
            );
            CaseOutcome::Failure(failure)
        }
    };
    CaseResult {
        case_id: case.id.clone(),
        outcome,
    }
}

fn solve_and_store(
    case: &CaseDir,
    ctx: &RunContext,
    started: Instant,
) -> Result<CaseSuccess, CaseFailure> {
    ctx.emit(&case.id, CaseStage::Loading, started, None);
    let params = bfb_params::load_case_dir(&case.dir)
        .map_err(|e| CaseFailure::from_params(&case.id, e))?;

    ctx.emit(&case.id, CaseStage::Solving, started, None);
    let record = solve_case(&case.id, &params, &ctx.solve)
        .map_err(|e| CaseFailure::from_model(&case.id, e))?;

    let written = match ctx.output {
        OutputPolicy::Write => {
            ctx.emit(&case.id, CaseStage::Saving, started, None);
            let report = render_report(&params, &record);
            let store = CaseStore::new(&case.id, &case.dir);
            let written = store
                .save(&record, &params, Some(&report))
                .map_err(|e| CaseFailure {
                    case_id: case.id.clone(),
                    kind: FailureKind::Output,
                    message: e.to_string(),
                })?;
            debug!(case = %case.id, files = written.len(), "results written");
            written
        }
        OutputPolicy::InMemory => Vec::new(),
    };

    Ok(CaseSuccess {
        params,
        record,
        written,
    })
}

/// Write the comparison table and record every generated path in the artifact manifest.
fn write_project_outputs(project_dir: &Path, report: &RunReport) -> AppResult<PathBuf> {
    let csv_path = project_dir.join(COMPARISON_FILE);
    std::fs::write(&csv_path, comparison_csv(&report.records()))?;

    let mut manifest = ArtifactManifest::load(project_dir)?;
    manifest.record_file(project_dir, &csv_path)?;
    for success in report.successes() {
        for path in &success.written {
            manifest.record_file(project_dir, path)?;
            if let Some(dir) = path.parent() {
                manifest.record_dir(project_dir, dir)?;
            }
        }
    }
    manifest.save(project_dir)?;
    Ok(csv_path)
}

/// Report text for one case directory: from stored results when they match the current
/// parameters, otherwise solved in memory.
pub fn show_case(case_dir: &Path) -> AppResult<String> {
    let case = CaseDir::from_dir(case_dir)?;
    let params = bfb_params::load_case_dir(&case.dir)?;
    let store = CaseStore::new(&case.id, &case.dir);

    let record = if store.is_current(&params) {
        store.load_record()?
    } else {
        solve_case(&case.id, &params, &SolveOptions::default())?
    };
    Ok(render_report(&params, &record))
}

/// Delete everything listed in the project's artifact manifest.
pub fn clean_project(project_dir: &Path) -> AppResult<bfb_results::CleanSummary> {
    if !project_dir.is_dir() {
        return Err(AppError::InvalidInput(format!(
            "{} is not a directory",
            project_dir.display()
        )));
    }
    Ok(bfb_results::clean(project_dir)?)
}
