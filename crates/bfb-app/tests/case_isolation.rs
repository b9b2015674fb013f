//! A failing case never stops the others.

mod common;

use bfb_app::{
    CaseOutcome, FailureKind, OutputPolicy, RunContext, RunStatus, discover_cases, run_project,
    validate_project,
};
use common::{case_yaml, three_case_project, unique_temp_dir, write_case};

#[test]
fn missing_field_fails_only_its_case() {
    let project = three_case_project("bfb_app_isolation");
    let ctx = RunContext::serial().with_output(OutputPolicy::InMemory);

    let report = run_project(&project, &ctx).expect("run should complete");

    assert_eq!(report.status(), RunStatus::PartiallyFailed);
    let ids: Vec<&str> = report.sorted().iter().map(|c| c.case_id.as_str()).collect();
    assert_eq!(ids, vec!["case-1", "case-2", "case-3"]);

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].case_id, "case-2");
    assert_eq!(failures[0].kind, FailureKind::Configuration);
    assert!(
        failures[0].message.contains("missing field `dp`"),
        "message should name the missing field: {}",
        failures[0].message
    );

    let records = report.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].case_id, "case-1");
    assert_eq!(records[1].case_id, "case-3");
}

#[test]
fn failure_in_parallel_mode_is_isolated() {
    let project = three_case_project("bfb_app_isolation_par");
    let ctx = RunContext::parallel(Some(3)).with_output(OutputPolicy::InMemory);

    let report = run_project(&project, &ctx).expect("run should complete");

    assert_eq!(report.successes().len(), 2);
    let failed: Vec<&str> = report
        .sorted()
        .iter()
        .filter(|c| matches!(c.outcome, CaseOutcome::Failure(_)))
        .map(|c| c.case_id.as_str())
        .collect();
    assert_eq!(failed, vec!["case-2"]);
}

#[test]
fn solver_errors_are_classified() {
    let project = unique_temp_dir("bfb_app_classify");
    // Char lighter than the gas passes schema checks but is not a physical particle.
    write_case(
        &project,
        "light-char",
        &case_yaml(773.0, true).replace("  rho: 300.0", "  rho: 0.3"),
    );
    write_case(
        &project,
        "unknown-species",
        &case_yaml(773.0, true).replace("[N2]", "[Xe]"),
    );
    write_case(&project, "ok", &case_yaml(773.0, true));

    let report = run_project(&project, &RunContext::serial().with_output(OutputPolicy::InMemory))
        .unwrap();
    let failures = report.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].case_id, "light-char");
    assert_eq!(failures[0].kind, FailureKind::InvalidGeometry);
    assert!(failures[0].message.contains("char"));
    assert_eq!(failures[1].case_id, "unknown-species");
    assert_eq!(failures[1].kind, FailureKind::Configuration);
}

#[test]
fn all_failed_is_an_explicit_status() {
    let project = unique_temp_dir("bfb_app_all_failed");
    write_case(&project, "a", &case_yaml(773.0, false));
    write_case(&project, "b", "not: [valid");

    let report = run_project(&project, &RunContext::serial().with_output(OutputPolicy::InMemory))
        .unwrap();
    assert_eq!(report.status(), RunStatus::AllFailed);
}

#[test]
fn empty_project_has_no_cases() {
    let project = unique_temp_dir("bfb_app_empty");
    std::fs::create_dir_all(project.join(".cache")).unwrap();
    std::fs::write(project.join("README.md"), "notes").unwrap();

    assert!(discover_cases(&project).unwrap().is_empty());
    let report = run_project(&project, &RunContext::serial()).unwrap();
    assert_eq!(report.status(), RunStatus::NoCases);
    assert!(report.comparison.is_none());
}

#[test]
fn case_without_parameter_file_is_reported() {
    let project = unique_temp_dir("bfb_app_no_params");
    write_case(&project, "case-1", &case_yaml(773.0, true));
    let legacy = project.join("case-2");
    std::fs::create_dir_all(&legacy).unwrap();
    std::fs::write(legacy.join("params.py"), "di = 0.05\n").unwrap();
    write_case(&project, "case-3", &case_yaml(823.0, true));

    let ids: Vec<String> = discover_cases(&project)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, ["case-1", "case-2", "case-3"]);

    let report = run_project(&project, &RunContext::serial().with_output(OutputPolicy::InMemory))
        .unwrap();
    assert_eq!(report.status(), RunStatus::PartiallyFailed);
    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].case_id, "case-2");
    assert_eq!(failures[0].kind, FailureKind::Configuration);
    assert!(
        failures[0].message.contains("No parameter file"),
        "{}",
        failures[0].message
    );

    let validation = validate_project(&project).unwrap();
    assert_eq!(validation.len(), 3);
    assert!(!validation[1].is_valid());
}

#[test]
fn unreadable_project_is_an_error() {
    let missing = unique_temp_dir("bfb_app_missing").join("nope");
    assert!(run_project(&missing, &RunContext::serial()).is_err());
}

#[test]
fn validate_reports_each_case() {
    let project = three_case_project("bfb_app_validate");
    let results = validate_project(&project).unwrap();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_valid());
    assert!(!results[1].is_valid());
    assert!(results[2].is_valid());
}
