//! Scenario: a project that honors every contract
//!
//! Success Criteria:
//! - every pass reports PASS and the run exits zero
//! - the summary lists module counts and every report location
//! - legacy scheduler usage shows up as a warning without failing the run

use crate::common::*;

fn conforming() -> TestEnvBuilder {
    TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_source("core", "core/CorePlugin.java", "package core;\n")
        .with_descriptor("core", &plugin_descriptor("Core", "Nothing").replace("depend: [Nothing]\n", ""))
        .with_build_script("core", &shaded_build_script("Core", &[("okio", "acme.libs.okio")]))
        .with_jar(
            "core",
            "Core-1.0.jar",
            &["META-INF/", "core/CorePlugin.class", "acme/libs/okio/Buffer.class"],
        )
        .with_conforming_plugin("featureA", "FeatureA", "Core")
        .with_conforming_plugin("featureB", "FeatureB", "Core")
        .with_descriptor(
            "featureB",
            "name: FeatureB\nversion: '${version}'\nmain: b.B\napi-version: '1.21'\nsoftdepend:\n  - Vault\n\n  - Core\n",
        )
}

#[test]
fn scenario_conforming_project_passes() {
    let env = conforming().build();

    let result = env.run(&["verify"]);

    assert!(result.is_success(), "expected success:\n{}", result.combined_output());
    assert!(result.stdout.contains("Overall: PASS"));
    assert!(result.stdout.contains("Modules: 3"));
    assert!(result.stdout.contains("shaded: 1"));
    for pass in ["boundary", "descriptor", "conventions", "shading", "scheduler"] {
        let path = format!("build/reports/modgate/{pass}.txt");
        crate::assert_report_contains!(env, &path, "Status: PASS");
        assert!(result.stdout.contains(&path), "summary lacks {path}");
    }
    crate::assert_report_contains!(
        env,
        "build/reports/modgate/shading.txt",
        "Audited archive: core/build/libs/Core-1.0.jar"
    );
}

#[test]
fn scenario_scheduler_warnings_do_not_fail() {
    let env = conforming()
        .with_source(
            "featureB",
            "b/Tasks.java",
            "class Tasks {\n  void run() { Bukkit.getScheduler().runTask(p, r); }\n}\n",
        )
        .build();

    let result = env.run(&["verify"]);

    assert!(result.is_success(), "{}", result.combined_output());
    crate::assert_report_contains!(
        env,
        "build/reports/modgate/scheduler.txt",
        "featureB: featureB/src/main/java/b/Tasks.java:2: legacy scheduler call Bukkit.getScheduler()"
    );
}

#[test]
fn scenario_report_dir_flag_isolates_output() {
    let env = conforming().build();

    let result = env.run(&["verify", "--report-dir", "out/reports"]);

    assert!(result.is_success());
    assert!(env.project_path("out/reports/summary.txt").is_file());
    assert!(!env.project_path("build/reports/modgate").exists());
}
