//! Contract: exit status is zero iff no pass produced an error.

use crate::common::*;

/// CONTRACT: Warnings alone never fail the run.
#[test]
fn contract_warnings_exit_zero() {
    let env = TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_source("gui", "G.java", "Bukkit.getScheduler().runTask(p, r);\n")
        .build();

    let result = env.run(&["verify", "--pass", "scheduler"]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
}

/// CONTRACT: Any error fails the run with a message naming every failing pass.
#[test]
fn contract_combined_failure_message() {
    let env = TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_source("featureA", "A.java", "import core.internal.Thing;\n")
        .with_descriptor("featureA", "name: A\nversion: 1.2.3\n")
        .build();

    let result = env.run(&["verify", "--pass", "boundary,descriptor"]);

    assert_ne!(result.exit_code, 0);
    assert!(result.stderr.contains("API Boundaries (boundary): 1 error(s)"));
    assert!(result.stderr.contains("Plugin Descriptors (descriptor): 4 error(s)"));
    assert!(result
        .stderr
        .contains("version must be '${version}', found '1.2.3'"));
}

/// CONTRACT: A missing project root is an error, not an empty pass.
#[test]
fn contract_missing_project_fails() {
    let env = TestEnv::builder().build();

    let result = env.run(&["verify", "--project", "does-not-exist"]);

    assert!(!result.is_success());
    assert!(result.stderr.contains("project root not found"));
}
