//! Findings produced by verification passes

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VerifyError;

/// Identifier of a verification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassId {
    Boundary,
    Descriptor,
    Conventions,
    Shading,
    Scheduler,
}

impl PassId {
    /// Every pass, in report order
    pub const ALL: [PassId; 5] = [
        PassId::Boundary,
        PassId::Descriptor,
        PassId::Conventions,
        PassId::Shading,
        PassId::Scheduler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PassId::Boundary => "boundary",
            PassId::Descriptor => "descriptor",
            PassId::Conventions => "conventions",
            PassId::Shading => "shading",
            PassId::Scheduler => "scheduler",
        }
    }

    /// Human-readable title used in report headers
    pub fn title(&self) -> &'static str {
        match self {
            PassId::Boundary => "API Boundaries",
            PassId::Descriptor => "Plugin Descriptors",
            PassId::Conventions => "Build Conventions",
            PassId::Shading => "Shaded Artifact",
            PassId::Scheduler => "Scheduler Safety",
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassId {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VerifyError::UnknownPass(s.to_string()))
    }
}

/// Whether a finding fails the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// A required file (descriptor, build declaration) is absent
    Structural,
    /// A declared contract does not hold
    Contract,
    /// The build artifact is missing or unreadable
    ArtifactUnavailable,
    /// Heuristic signal; never fails the run
    Warning,
}

impl FindingKind {
    pub fn severity(&self) -> Severity {
        match self {
            FindingKind::Warning => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A single finding. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub pass: PassId,
    pub module: String,
    /// Project-relative path, `/`-separated
    pub file: Option<String>,
    /// 1-indexed
    pub line: Option<usize>,
    pub message: String,
    pub kind: FindingKind,
}

impl Violation {
    fn new(pass: PassId, module: &str, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            pass,
            module: module.to_string(),
            file: None,
            line: None,
            message: message.into(),
            kind,
        }
    }

    pub fn structural(pass: PassId, module: &str, message: impl Into<String>) -> Self {
        Self::new(pass, module, FindingKind::Structural, message)
    }

    pub fn contract(pass: PassId, module: &str, message: impl Into<String>) -> Self {
        Self::new(pass, module, FindingKind::Contract, message)
    }

    pub fn artifact_unavailable(pass: PassId, module: &str, message: impl Into<String>) -> Self {
        Self::new(pass, module, FindingKind::ArtifactUnavailable, message)
    }

    pub fn warning(pass: PassId, module: &str, message: impl Into<String>) -> Self {
        Self::new(pass, module, FindingKind::Warning, message)
    }

    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.module)?;
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}:{}: ", file, line)?,
            (Some(file), None) => write!(f, "{}: ", file)?,
            _ => {}
        }
        f.write_str(&self.message)
    }
}
