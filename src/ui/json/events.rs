//! Event types for `--json` output.

use serde::Serialize;

use modgate::{ConfigWarning, Module, PassId, PassReport, Status, Violation};

/// Emitted once when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// A non-fatal configuration problem.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigWarningEvent {
    pub event: &'static str,
    pub key: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&ConfigWarning> for ConfigWarningEvent {
    fn from(warning: &ConfigWarning) -> Self {
        Self {
            event: "config_warning",
            key: warning.key.clone(),
            file: warning.file.display().to_string(),
            line: warning.line,
            suggestion: warning.suggestion.clone(),
        }
    }
}

/// One discovered module.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleEvent<'a> {
    pub event: &'static str,
    pub name: &'a str,
    pub source_tree: bool,
    pub descriptor: bool,
    pub build_declaration: bool,
    pub shaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_base_name: Option<&'a str>,
    pub relocations: Vec<&'a str>,
}

impl<'a> From<&'a Module> for ModuleEvent<'a> {
    fn from(module: &'a Module) -> Self {
        Self {
            event: "module",
            name: module.name(),
            source_tree: module.has_source_tree(),
            descriptor: module.has_descriptor(),
            build_declaration: module.has_build_declaration(),
            shaded: module.is_shaded(),
            archive_base_name: module.archive_base_name(),
            relocations: module.declared_relocations().into_iter().collect(),
        }
    }
}

/// One finding, error or warning.
#[derive(Debug, Clone, Serialize)]
pub struct FindingEvent<'a> {
    pub event: &'static str,
    #[serde(flatten)]
    pub violation: &'a Violation,
    pub severity: modgate::Severity,
}

impl<'a> FindingEvent<'a> {
    pub fn new(violation: &'a Violation) -> Self {
        Self {
            event: "finding",
            violation,
            severity: violation.severity(),
        }
    }
}

/// Result of one pass.
#[derive(Debug, Clone, Serialize)]
pub struct PassEvent<'a> {
    pub event: &'static str,
    pub pass: PassId,
    pub status: Status,
    pub errors: usize,
    pub warnings: usize,
    pub details: &'a [String],
    pub report: String,
}

impl<'a> PassEvent<'a> {
    pub fn new(report: &'a PassReport, path: String) -> Self {
        Self {
            event: "pass",
            pass: report.pass,
            status: report.status(),
            errors: report.errors.len(),
            warnings: report.warnings.len(),
            details: &report.details,
            report: path,
        }
    }
}

/// Emitted once when a command finishes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl<'a> CompleteEvent<'a> {
    pub fn new(command: &'a str, success: bool) -> Self {
        Self {
            event: "complete",
            command,
            success,
            errors: None,
            warnings: None,
            summary: None,
        }
    }

    pub fn with_counts(mut self, errors: usize, warnings: usize) -> Self {
        self.errors = Some(errors);
        self.warnings = Some(warnings);
        self
    }

    pub fn with_summary(mut self, path: String) -> Self {
        self.summary = Some(path);
        self
    }
}
