//! Serial and parallel runs, written outputs, progress events and cleanup.

mod common;

use std::sync::{Arc, Mutex};

use bfb_app::{
    COMPARISON_FILE, CaseEvent, CaseStage, OutputPolicy, RunContext, RunMode, RunStatus,
    clean_project, run_project, show_case,
};
use bfb_results::{ARTIFACT_MANIFEST_FILE, ArtifactManifest, CaseStore};
use common::{case_yaml, three_case_project, unique_temp_dir, write_case};

fn five_case_project(prefix: &str) -> std::path::PathBuf {
    let project = unique_temp_dir(prefix);
    for (i, tk) in [723.0, 748.0, 773.0, 798.0, 823.0].iter().enumerate() {
        write_case(&project, &format!("case-{}", i + 1), &case_yaml(*tk, true));
    }
    project
}

#[test]
fn serial_and_parallel_produce_the_same_records() {
    let project = five_case_project("bfb_app_modes");

    let serial = run_project(
        &project,
        &RunContext::serial().with_output(OutputPolicy::InMemory),
    )
    .unwrap();
    let parallel = run_project(
        &project,
        &RunContext::parallel(Some(4)).with_output(OutputPolicy::InMemory),
    )
    .unwrap();

    assert_eq!(serial.status(), RunStatus::Succeeded);
    assert_eq!(parallel.status(), RunStatus::Succeeded);
    assert_eq!(parallel.mode, RunMode::Parallel { workers: Some(4) });
    assert_eq!(serial.records(), parallel.records());
}

#[test]
fn default_parallel_pool_uses_available_parallelism() {
    let ctx = RunContext::parallel(None);
    assert!(ctx.worker_count() >= 1);
    assert_eq!(RunContext::serial().worker_count(), 1);
    assert_eq!(RunContext::parallel(Some(0)).worker_count(), 1);
}

#[test]
fn write_policy_records_every_artifact() {
    let project = three_case_project("bfb_app_write");
    let report = run_project(&project, &RunContext::serial()).unwrap();

    let csv_path = report.comparison.clone().expect("comparison table written");
    assert_eq!(csv_path, project.join(COMPARISON_FILE));
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[1].starts_with("case-1,"));
    assert!(rows[2].starts_with("case-3,"));

    let manifest = ArtifactManifest::load(&project).unwrap();
    assert!(manifest.files.contains(COMPARISON_FILE));
    assert!(manifest.files.contains("case-1/results/report.txt"));
    assert!(manifest.files.contains("case-3/results/results.json"));
    assert!(!manifest.files.iter().any(|f| f.starts_with("case-2/")));

    let store = CaseStore::new("case-1", &project.join("case-1"));
    let stored = store.load_record().unwrap();
    assert_eq!(&stored, report.records()[0]);
}

#[test]
fn clean_removes_generated_files_only() {
    let project = three_case_project("bfb_app_clean");
    run_project(&project, &RunContext::parallel(Some(2))).unwrap();
    std::fs::write(project.join("case-1").join("notes.txt"), "keep me").unwrap();

    let summary = clean_project(&project).unwrap();
    assert!(!summary.removed.is_empty());

    assert!(!project.join(COMPARISON_FILE).exists());
    assert!(!project.join(ARTIFACT_MANIFEST_FILE).exists());
    assert!(!project.join("case-1").join("results").exists());
    assert!(project.join("case-1").join("params.yaml").exists());
    assert!(project.join("case-1").join("notes.txt").exists());
    assert!(project.join("case-2").join("params.yaml").exists());
}

#[test]
fn progress_events_cover_each_case() {
    let project = three_case_project("bfb_app_progress");
    let events: Arc<Mutex<Vec<CaseEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_events = Arc::clone(&events);
    let ctx = RunContext::parallel(Some(2))
        .with_output(OutputPolicy::InMemory)
        .with_progress(Arc::new(move |event: &CaseEvent| {
            sink_events.lock().unwrap().push(event.clone());
        }));

    run_project(&project, &ctx).unwrap();

    let events = events.lock().unwrap();
    let completed: Vec<&str> = events
        .iter()
        .filter(|e| e.stage == CaseStage::Completed)
        .map(|e| e.case_id.as_str())
        .collect();
    assert_eq!(completed.len(), 2);
    let failed: Vec<&CaseEvent> = events
        .iter()
        .filter(|e| e.stage == CaseStage::Failed)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].case_id, "case-2");
    assert!(failed[0].message.is_some());
    assert!(!events.iter().any(|e| e.stage == CaseStage::Saving));
}

#[test]
fn show_prefers_current_stored_results() {
    let project = three_case_project("bfb_app_show");
    let report = run_project(&project, &RunContext::serial()).unwrap();

    let text = show_case(&project.join("case-3")).unwrap();
    let record = report.records()[1];
    assert!(text.contains(&format!("{:.4}", record.bfb.us)));

    // Editing the parameters makes the stored results stale; show solves afresh.
    std::fs::write(
        project.join("case-3").join("params.yaml"),
        case_yaml(873.0, true),
    )
    .unwrap();
    let fresh = show_case(&project.join("case-3")).unwrap();
    assert!(fresh.contains("873"));
}

#[test]
fn concurrent_runs_do_not_interfere() {
    let a = five_case_project("bfb_app_concurrent_a");
    let b = three_case_project("bfb_app_concurrent_b");

    let (ra, rb) = std::thread::scope(|s| {
        let ha = s.spawn(|| {
            run_project(
                &a,
                &RunContext::parallel(Some(2)).with_output(OutputPolicy::InMemory),
            )
        });
        let hb = s.spawn(|| {
            run_project(
                &b,
                &RunContext::parallel(Some(2)).with_output(OutputPolicy::InMemory),
            )
        });
        (ha.join().unwrap(), hb.join().unwrap())
    });

    assert_eq!(ra.unwrap().status(), RunStatus::Succeeded);
    assert_eq!(rb.unwrap().status(), RunStatus::PartiallyFailed);
}
