//! modgate - build-contract verification for multi-module plugin projects
//!
//! Discovers the modules of a project, runs independent verification passes
//! over them (API boundaries, plugin descriptors, build conventions, shaded
//! artifact contents, scheduler usage) and aggregates the findings into
//! per-pass reports plus one summary.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod passes;
pub mod report;

// Re-exports for convenience
pub use application::{VerifyOptions, VerifyOutcome, VerifyUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::{FindingKind, Module, PassId, Severity, Violation};
pub use error::{VerifyError, VerifyResult};
pub use graph::ModuleGraph;
pub use passes::{build_passes, VerificationPass};
pub use report::{FindingSink, PassReport, Status};
