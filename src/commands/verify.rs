//! Verify command handler

use std::path::{Path, PathBuf};

use anyhow::Result;
use modgate::{PassId, VerifyOptions, VerifyUseCase};

use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, FindingEvent, PassEvent, StartEvent};

use super::{load_config, report_config_warnings};

pub fn cmd_verify(
    project: &Path,
    config_path: Option<&Path>,
    report_dir: Option<PathBuf>,
    passes: Vec<PassId>,
    json: bool,
) -> Result<()> {
    if json {
        emit_event(&StartEvent::new("verify"))?;
    }

    let (config, warnings) = load_config(project, config_path)?;
    report_config_warnings(&warnings, json);

    let use_case = VerifyUseCase::new(config);
    let options = VerifyOptions { passes, report_dir };
    let outcome = use_case.execute(project, &options)?;

    if json {
        for report in &outcome.reports {
            for finding in report.errors.iter().chain(&report.warnings) {
                emit_event(&FindingEvent::new(finding))?;
            }
            let path = outcome
                .written
                .passes
                .get(&report.pass)
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            emit_event(&PassEvent::new(report, path))?;
        }
        let mut complete = CompleteEvent::new("verify", outcome.is_success())
            .with_counts(outcome.error_count(), outcome.warning_count());
        if let Some(summary) = &outcome.written.summary {
            complete = complete.with_summary(summary.display().to_string());
        }
        emit_event(&complete)?;
    } else {
        print!("{}", outcome.summary);
    }

    outcome.into_result()?;
    Ok(())
}
