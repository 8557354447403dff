//! Scenario: a feature module reaches into core internals
//!
//! Success Criteria:
//! - the boundary pass reports exactly one error and no warnings
//! - the error carries the offending file and line
//! - the run exits non-zero

use serde_json::Value;

use crate::common::*;

fn env() -> TestEnv {
    TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_source("core", "core/internal/Thing.java", "package core.internal;\n")
        .with_source(
            "featureA",
            "feature/A.java",
            "package feature;\n\nimport core.internal.Thing;\nimport core.api.Api;\n",
        )
        .with_source("featureB", "feature/B.java", "package feature;\n\nimport core.internal.Thing;\n")
        .build()
}

fn pass_event<'a>(events: &'a [Value], pass: &str) -> &'a Value {
    events
        .iter()
        .find(|e| e["event"] == "pass" && e["pass"] == pass)
        .unwrap_or_else(|| panic!("no pass event for {pass}"))
}

#[test]
fn scenario_forbidden_import_fails_the_run() {
    let env = env();

    let result = env.run(&["verify", "--json"]);

    assert!(!result.is_success(), "expected failure:\n{}", result.combined_output());
    let events = result.events();
    let boundary = pass_event(&events, "boundary");
    assert_eq!(boundary["errors"], 1);
    assert_eq!(boundary["warnings"], 0);
    assert_eq!(boundary["status"], "FAIL");

    let findings: Vec<&Value> = events
        .iter()
        .filter(|e| e["event"] == "finding" && e["pass"] == "boundary")
        .collect();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["module"], "featureA");
    assert_eq!(findings[0]["file"], "featureA/src/main/java/feature/A.java");
    assert_eq!(findings[0]["line"], 3);

    let last = events.last().unwrap();
    assert_eq!(last["event"], "complete");
    assert_eq!(last["success"], false);
}

#[test]
fn scenario_boundary_report_is_written() {
    let env = env();

    let result = env.run(&["verify", "--pass", "boundary"]);

    assert_eq!(result.exit_code, 1);
    crate::assert_output_contains!(result, "build contracts violated");
    crate::assert_output_contains!(result, "imports core.internal directly: import core.internal.Thing;");
    crate::assert_report_contains!(env, "build/reports/modgate/boundary.txt", "Status: FAIL");
    crate::assert_report_contains!(env, "build/reports/modgate/summary.txt", "Overall: FAIL");
}
