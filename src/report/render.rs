//! Plain-text report rendering
//!
//! Output is deterministic for a given set of findings: no timestamps, no
//! absolute paths beyond what the caller passes in.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{PassId, Violation};
use crate::graph::ModuleGraph;

use super::{PassReport, Status};

/// Module counts shown in the summary report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModuleCounts {
    pub total: usize,
    pub with_sources: usize,
    pub with_descriptors: usize,
    pub with_build_declarations: usize,
    pub shaded: usize,
}

impl ModuleCounts {
    pub fn from_graph(graph: &ModuleGraph) -> Self {
        let mut counts = Self::default();
        for module in graph.modules() {
            counts.total += 1;
            counts.with_sources += usize::from(module.has_source_tree());
            counts.with_descriptors += usize::from(module.has_descriptor());
            counts.with_build_declarations += usize::from(module.has_build_declaration());
            counts.shaded += usize::from(module.is_shaded());
        }
        counts
    }
}

/// One line of the summary report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    pub pass: PassId,
    pub status: Status,
    pub errors: usize,
    pub warnings: usize,
    /// Location of the pass report, as shown to the user
    pub report: String,
}

/// Render a single pass report. Warnings beyond `warning_preview` are
/// folded into an `... and N more warnings` line; errors never are.
pub fn render_pass_report(report: &PassReport, warning_preview: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report.pass.title());
    let _ = writeln!(out, "Pass: {}", report.pass);
    let _ = writeln!(out, "Status: {}", report.status());
    let _ = writeln!(out, "Errors: {}", report.errors.len());
    let _ = writeln!(out, "Warnings: {}", report.warnings.len());
    for detail in &report.details {
        let _ = writeln!(out, "{}", detail);
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        let _ = writeln!(out, "\nNo findings.");
        return out;
    }

    if !report.errors.is_empty() {
        let _ = writeln!(out, "\nErrors:");
        push_items(&mut out, &report.errors);
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        let shown = report.warnings.len().min(warning_preview);
        push_items(&mut out, &report.warnings[..shown]);
        let hidden = report.warnings.len() - shown;
        if hidden > 0 {
            let noun = if hidden == 1 { "warning" } else { "warnings" };
            let _ = writeln!(out, "  ... and {} more {}", hidden, noun);
        }
    }

    out
}

fn push_items(out: &mut String, items: &[Violation]) {
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

/// Render the run summary
pub fn render_summary(counts: &ModuleCounts, entries: &[SummaryEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== modgate summary ==");
    let _ = writeln!(out, "Modules: {}", counts.total);
    let _ = writeln!(out, "  with sources: {}", counts.with_sources);
    let _ = writeln!(out, "  with descriptors: {}", counts.with_descriptors);
    let _ = writeln!(
        out,
        "  with build declarations: {}",
        counts.with_build_declarations
    );
    let _ = writeln!(out, "  shaded: {}", counts.shaded);

    let _ = writeln!(out, "\nPasses:");
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<12} {}  errors={} warnings={}  {}",
            entry.pass.as_str(),
            entry.status,
            entry.errors,
            entry.warnings,
            entry.report
        );
    }

    let overall = if entries.iter().all(|e| e.status == Status::Pass) {
        Status::Pass
    } else {
        Status::Fail
    };
    let _ = writeln!(out, "\nOverall: {}", overall);
    out
}
