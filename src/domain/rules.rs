//! Contract rules: static configuration and declarations parsed from build scripts

use serde::{Deserialize, Serialize};

/// Modules in `modules` may not import anything under `forbidden_root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenImportRule {
    pub modules: Vec<String>,
    pub forbidden_root: String,
}

impl ForbiddenImportRule {
    pub fn applies_to(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Literal token a trimmed source line must start with to violate the rule
    pub fn import_prefix(&self) -> String {
        format!("import {}.", self.forbidden_root)
    }

    pub fn static_import_prefix(&self) -> String {
        format!("import static {}.", self.forbidden_root)
    }

    pub fn matches_line(&self, trimmed: &str) -> bool {
        trimmed.starts_with(&self.import_prefix()) || trimmed.starts_with(&self.static_import_prefix())
    }
}

/// A declared `relocate("source", "target")` rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct RelocationRule {
    pub module: String,
    pub source: String,
    pub target: String,
}

impl RelocationRule {
    pub fn new(module: &str, source: &str, target: &str) -> Self {
        Self {
            module: module.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Archive path form of the target prefix (`a.b.c` -> `a/b/c/`)
    pub fn target_path(&self) -> String {
        package_path(&self.target)
    }
}

/// Convert a dotted package prefix into the archive entry prefix form.
pub fn package_path(package: &str) -> String {
    let mut path = package.trim_end_matches('.').replace('.', "/");
    path.push('/');
    path
}

/// Whether a convention pattern must be present or absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Require,
    Forbid,
}

/// A textual build-script convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConventionRule {
    pub id: String,
    /// Regular expression matched against the whole build declaration
    pub pattern: String,
    pub expect: Expectation,
    pub message: String,
}

impl ConventionRule {
    pub fn require(id: &str, pattern: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            expect: Expectation::Require,
            message: message.to_string(),
        }
    }

    pub fn forbid(id: &str, pattern: &str, message: &str) -> Self {
        Self {
            id: id.to_string(),
            pattern: pattern.to_string(),
            expect: Expectation::Forbid,
            message: message.to_string(),
        }
    }
}
