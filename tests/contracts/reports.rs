//! Contract: reports are deterministic and overwritten on every run.

use crate::common::*;

fn noisy_env() -> TestEnv {
    let mut builder = TestEnv::builder().with_config(SMALL_CONFIG);
    for i in 0..14 {
        builder = builder.with_source(
            "gui",
            &format!("T{i:02}.java"),
            "Bukkit.getScheduler().runTask(p, r);\n",
        );
    }
    builder.build()
}

/// CONTRACT: Warning lists are capped with an "... and N more" suffix.
#[test]
fn contract_warning_preview_is_capped() {
    let env = noisy_env();

    env.run(&["verify", "--pass", "scheduler"]);

    let report = env.read("build/reports/modgate/scheduler.txt");
    assert!(report.contains("Warnings: 14\n"));
    assert_eq!(report.matches("legacy scheduler call").count(), 10);
    assert!(report.contains("  ... and 4 more warnings"));
}

/// CONTRACT: Two runs over the same tree produce identical reports.
#[test]
fn contract_reports_are_reproducible() {
    let env = noisy_env();

    env.run(&["verify"]);
    let first = env.read("build/reports/modgate/summary.txt");
    let first_sched = env.read("build/reports/modgate/scheduler.txt");
    env.run(&["verify"]);

    assert_eq!(first, env.read("build/reports/modgate/summary.txt"));
    assert_eq!(first_sched, env.read("build/reports/modgate/scheduler.txt"));
}

/// CONTRACT: A run overwrites the previous reports.
#[test]
fn contract_reports_are_overwritten() {
    let env = TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_source("featureA", "A.java", "import core.internal.Thing;\n")
        .build();

    env.run(&["verify", "--pass", "boundary"]);
    crate::assert_report_contains!(env, "build/reports/modgate/boundary.txt", "Status: FAIL");

    env.write_file("featureA/src/main/java/A.java", "class A {}\n");
    let result = env.run(&["verify", "--pass", "boundary"]);

    assert!(result.is_success());
    crate::assert_report_contains!(env, "build/reports/modgate/boundary.txt", "Status: PASS");
}
