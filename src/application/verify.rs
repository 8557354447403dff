//! Verify use case
//!
//! Discovers the module graph once, runs every selected pass on its own
//! scoped thread, then renders and persists the reports. The exit decision
//! is made only after every pass has returned.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::PassId;
use crate::error::{VerifyError, VerifyResult};
use crate::graph::ModuleGraph;
use crate::passes::{build_passes, VerificationPass};
use crate::report::{
    render_pass_report, render_summary, ModuleCounts, PassReport, ReportWriter, SummaryEntry,
    WrittenReports,
};

/// Options for one verification run
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Passes to run; empty means all
    pub passes: Vec<PassId>,
    /// Overrides the configured report directory
    pub report_dir: Option<PathBuf>,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    pub counts: ModuleCounts,
    /// One report per pass, in pass order
    pub reports: Vec<PassReport>,
    pub summary: String,
    pub written: WrittenReports,
}

impl VerifyOutcome {
    /// No pass reported an error (warnings allowed)
    pub fn is_success(&self) -> bool {
        self.reports.iter().all(PassReport::is_success)
    }

    pub fn error_count(&self) -> usize {
        self.reports.iter().map(|r| r.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.reports.iter().map(|r| r.warnings.len()).sum()
    }

    /// Combined message naming every failing pass and its errors
    pub fn failure_message(&self) -> Option<String> {
        if self.is_success() {
            return None;
        }
        let mut out = String::new();
        for report in self.reports.iter().filter(|r| !r.is_success()) {
            let _ = writeln!(
                out,
                "{} ({}): {} error(s)",
                report.pass.title(),
                report.pass,
                report.errors.len()
            );
            for error in &report.errors {
                let _ = writeln!(out, "  - {}", error);
            }
        }
        Some(out.trim_end().to_string())
    }

    /// Turn a failed run into `VerifyError::ContractsViolated`
    pub fn into_result(self) -> VerifyResult<Self> {
        match self.failure_message() {
            Some(message) => Err(VerifyError::ContractsViolated { message }),
            None => Ok(self),
        }
    }
}

/// Run `passes` in parallel over the shared graph.
///
/// Reports come back in the order of `passes`. A panicking pass is
/// re-raised on the calling thread.
pub fn run_passes(passes: &[Box<dyn VerificationPass>], graph: &ModuleGraph) -> Vec<PassReport> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = passes
            .iter()
            .map(|pass| {
                scope.spawn(move || {
                    tracing::debug!(pass = %pass.id(), "pass started");
                    pass.run(graph)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(report) => report,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

/// Verify Use Case
pub struct VerifyUseCase {
    config: Config,
}

impl VerifyUseCase {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn report_dir(&self, project_root: &Path, options: &VerifyOptions) -> PathBuf {
        match &options.report_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_root.join(dir),
            None => self.config.report_dir(project_root),
        }
    }

    /// Execute a full run.
    ///
    /// Contract violations do not make this return `Err`; inspect the
    /// outcome or call [`VerifyOutcome::into_result`]. Errors are reserved
    /// for runs that could not complete (bad project root, unwritable
    /// report directory).
    pub fn execute(&self, project_root: &Path, options: &VerifyOptions) -> VerifyResult<VerifyOutcome> {
        let graph = ModuleGraph::discover(project_root, &self.config)?;
        let passes = build_passes(&self.config, &options.passes)?;

        let reports = run_passes(&passes, &graph);

        let writer = ReportWriter::new(self.report_dir(project_root, options));
        let mut written = WrittenReports::default();
        let mut entries = Vec::with_capacity(reports.len());
        for report in &reports {
            let text = render_pass_report(report, self.config.report.warning_preview);
            let path = writer.write_pass(report.pass, &text)?;
            entries.push(SummaryEntry {
                pass: report.pass,
                status: report.status(),
                errors: report.errors.len(),
                warnings: report.warnings.len(),
                report: graph.relative(&path),
            });
            written.passes.insert(report.pass, path);
        }

        let counts = ModuleCounts::from_graph(&graph);
        let summary = render_summary(&counts, &entries);
        written.summary = Some(writer.write_summary(&summary)?);

        tracing::info!(
            dir = %writer.dir().display(),
            passes = reports.len(),
            "reports written"
        );

        Ok(VerifyOutcome {
            counts,
            reports,
            summary,
            written,
        })
    }
}
