//! Pass reports, text rendering and persistence

mod render;
mod writer;

use serde::Serialize;

use crate::domain::{PassId, Violation};

pub use render::{render_pass_report, render_summary, ModuleCounts, SummaryEntry};
pub use writer::{ReportWriter, WrittenReports, SUMMARY_FILE_NAME};

/// Overall status of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Pass => write!(f, "PASS"),
            Status::Fail => write!(f, "FAIL"),
        }
    }
}

/// Receives findings as a pass produces them.
pub trait FindingSink {
    fn add(&mut self, violation: Violation);

    fn extend(&mut self, violations: impl IntoIterator<Item = Violation>)
    where
        Self: Sized,
    {
        for v in violations {
            self.add(v);
        }
    }
}

impl FindingSink for Vec<Violation> {
    fn add(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// Findings of a single pass, in the order they were produced
#[derive(Debug, Clone, Serialize)]
pub struct PassReport {
    pub pass: PassId,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
    /// Informational lines (e.g. which archive was audited)
    pub details: Vec<String>,
}

impl PassReport {
    pub fn new(pass: PassId) -> Self {
        Self {
            pass,
            errors: Vec::new(),
            warnings: Vec::new(),
            details: Vec::new(),
        }
    }

    pub fn add_detail(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    pub fn status(&self) -> Status {
        if self.errors.is_empty() {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == Status::Pass
    }
}

impl FindingSink for PassReport {
    fn add(&mut self, violation: Violation) {
        if violation.is_error() {
            self.errors.push(violation);
        } else {
            self.warnings.push(violation);
        }
    }
}
