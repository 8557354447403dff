//! Scenario: the built archive does not match the declared relocations
//!
//! Success Criteria:
//! - raw third-party classes are leaks, even next to relocated copies
//! - declared relocations that never happened are errors
//! - the newest archive is the one audited

use std::time::{Duration, SystemTime};

use crate::common::*;

fn core_project() -> TestEnvBuilder {
    TestEnv::builder()
        .with_config(SMALL_CONFIG)
        .with_build_script("core", &shaded_build_script("Core", &[("okio", "acme.libs.okio")]))
}

#[test]
fn scenario_leaked_class_is_reported() {
    let env = core_project()
        .with_jar(
            "core",
            "Core-1.0.jar",
            &["acme/libs/okio/Buffer.class", "okio/Buffer.class"],
        )
        .build();

    let result = env.run(&["verify", "--pass", "shading"]);

    assert!(!result.is_success());
    crate::assert_report_contains!(
        env,
        "build/reports/modgate/shading.txt",
        "unrelocated class leaked into archive: okio/Buffer.class"
    );
}

#[test]
fn scenario_newest_archive_wins() {
    let env = core_project()
        .with_jar("core", "Core-1.0.jar", &["okio/Buffer.class"])
        .with_jar("core", "Core-1.1.jar", &["acme/libs/okio/Buffer.class"])
        .build();
    let stale = std::fs::File::options()
        .write(true)
        .open(env.project_path("core/build/libs/Core-1.0.jar"))
        .unwrap();
    stale
        .set_modified(SystemTime::now() - Duration::from_secs(3600))
        .unwrap();

    let result = env.run(&["verify", "--pass", "shading"]);

    assert!(result.is_success(), "{}", result.combined_output());
    crate::assert_report_contains!(
        env,
        "build/reports/modgate/shading.txt",
        "Audited archive: core/build/libs/Core-1.1.jar"
    );
}

#[test]
fn scenario_missing_archive_fails_shading_only() {
    let env = core_project().build();

    let result = env.run(&["verify", "--pass", "shading", "--json"]);

    assert!(!result.is_success());
    let finding = result
        .events()
        .into_iter()
        .find(|e| e["event"] == "finding")
        .expect("finding event");
    assert_eq!(finding["kind"], "artifact-unavailable");
    assert_eq!(finding["file"], "core/build/libs");
}
