//! Domain types shared by discovery, the verification passes and reporting.
//!
//! Everything in here is plain data: no filesystem access, no logging.

mod finding;
mod module;
mod rules;

pub use finding::{FindingKind, PassId, Severity, Violation};
pub use module::Module;
pub use rules::{package_path, ConventionRule, Expectation, ForbiddenImportRule, RelocationRule};
