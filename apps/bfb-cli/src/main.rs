use bfb_app::{
    AppResult, CaseEvent, CaseOutcome, CaseStage, OutputPolicy, RunContext, RunReport, RunStatus,
    project_service, run_service,
};
use bfb_model::SolveOptions;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bfb")]
#[command(about = "BFB reactor fluidization and pyrolysis case evaluator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every case in a project directory
    Run {
        /// Project directory; each non-hidden subdirectory is a case
        project_path: PathBuf,
        /// Solve cases on a worker pool
        #[arg(long)]
        parallel: bool,
        /// Worker count for --parallel (defaults to available cores)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Keep results in memory; write nothing
        #[arg(long)]
        no_write: bool,
        /// Skip the transient temperature profile
        #[arg(long)]
        no_profile: bool,
        /// Ignore temperature sweeps declared by cases
        #[arg(long)]
        no_sweep: bool,
    },
    /// Load and validate every case without solving
    Validate {
        /// Project directory
        project_path: PathBuf,
    },
    /// Print the report for one case
    Show {
        /// Case directory
        case_path: PathBuf,
    },
    /// Delete generated outputs listed in the artifact manifest
    Clean {
        /// Project directory
        project_path: PathBuf,
    },
}

fn main() -> AppResult<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            project_path,
            parallel,
            jobs,
            no_write,
            no_profile,
            no_sweep,
        } => {
            let mut ctx = if parallel || jobs.is_some() {
                RunContext::parallel(jobs)
            } else {
                RunContext::serial()
            };
            if no_write {
                ctx = ctx.with_output(OutputPolicy::InMemory);
            }
            ctx = ctx.with_solve_options(SolveOptions {
                transient_profile: !no_profile,
                sweep: !no_sweep,
                ..SolveOptions::default()
            });
            cmd_run(&project_path, ctx)
        }
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Show { case_path } => cmd_show(&case_path),
        Commands::Clean { project_path } => cmd_clean(&project_path),
    }
}

fn cmd_run(project_path: &Path, ctx: RunContext) -> AppResult<ExitCode> {
    let cases = project_service::discover_cases(project_path)?;
    println!(
        "Running {} case(s) in {} on {} worker(s)",
        cases.len(),
        project_path.display(),
        ctx.worker_count()
    );

    let total = cases.len();
    let done = Arc::new(AtomicUsize::new(0));
    let ctx = ctx.with_progress(Arc::new(move |event: &CaseEvent| {
        render_progress(event, &done, total);
    }));

    let report = run_service::run_cases(project_path, &cases, &ctx)?;
    print_summary(&report);

    Ok(match report.status() {
        RunStatus::AllFailed => ExitCode::FAILURE,
        RunStatus::NoCases => {
            println!("No cases found in {}", project_path.display());
            ExitCode::SUCCESS
        }
        RunStatus::Succeeded | RunStatus::PartiallyFailed => ExitCode::SUCCESS,
    })
}

fn render_progress(event: &CaseEvent, done: &AtomicUsize, total: usize) {
    match event.stage {
        CaseStage::Completed => {
            let n = done.fetch_add(1, Ordering::SeqCst) + 1;
            println!(
                "  [{n}/{total}] ✓ {}  ({:.2}s)",
                event.case_id, event.elapsed_wall_s
            );
        }
        CaseStage::Failed => {
            let n = done.fetch_add(1, Ordering::SeqCst) + 1;
            println!(
                "  [{n}/{total}] ✗ {}  {}",
                event.case_id,
                event.message.as_deref().unwrap_or("")
            );
        }
        CaseStage::Loading | CaseStage::Solving | CaseStage::Saving => {}
    }
}

fn print_summary(report: &RunReport) {
    let succeeded = report.successes().len();
    let failed = report.failures().len();

    println!("\nRun summary:");
    for case in report.sorted() {
        match &case.outcome {
            CaseOutcome::Success(s) => println!(
                "  {:<20} us={:.4} m/s  umf_wenyu={:.4} m/s  t_devol={:.2} s",
                case.case_id,
                s.record.bfb.us,
                s.record.bed.particle.umf_wenyu,
                s.record.biomass.t_devol
            ),
            CaseOutcome::Failure(f) => {
                println!("  {:<20} FAILED ({}): {}", case.case_id, f.kind, f.message)
            }
        }
    }
    println!("  Succeeded: {succeeded}");
    println!("  Failed:    {failed}");
    println!("  Total:     {:.3}s", report.elapsed_wall_s);
    if let Some(path) = &report.comparison {
        println!("✓ Comparison table written to {}", path.display());
    }
    if report.status() == RunStatus::AllFailed {
        println!("✗ All cases failed");
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<ExitCode> {
    println!("Validating project: {}", project_path.display());
    let results = project_service::validate_project(project_path)?;

    if results.is_empty() {
        println!("No cases found");
        return Ok(ExitCode::SUCCESS);
    }

    let mut invalid = 0;
    for v in &results {
        match &v.error {
            None => println!("  ✓ {}", v.case_id),
            Some(err) => {
                invalid += 1;
                println!("  ✗ {}: {}", v.case_id, err);
            }
        }
    }

    if invalid == 0 {
        println!("✓ All {} case(s) are valid", results.len());
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{invalid} of {} case(s) are invalid", results.len());
        Ok(ExitCode::FAILURE)
    }
}

fn cmd_show(case_path: &Path) -> AppResult<ExitCode> {
    print!("{}", run_service::show_case(case_path)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_clean(project_path: &Path) -> AppResult<ExitCode> {
    let summary = run_service::clean_project(project_path)?;
    if summary.removed.is_empty() && summary.dirs_removed.is_empty() {
        println!("Nothing to clean");
    } else {
        println!(
            "✓ Removed {} file(s) and {} result dir(s)",
            summary.removed.len(),
            summary.dirs_removed.len()
        );
    }
    if !summary.missing.is_empty() {
        println!("  {} listed file(s) were already gone", summary.missing.len());
    }
    Ok(ExitCode::SUCCESS)
}
