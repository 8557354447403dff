//! Verification passes
//!
//! Each pass reads the shared, immutable [`ModuleGraph`] and produces one
//! [`PassReport`]. Passes never depend on each other and may run in parallel.

mod boundary;
mod conventions;
mod descriptor;
mod scheduler;
mod shading;
mod sources;

use crate::config::Config;
use crate::domain::PassId;
use crate::error::VerifyResult;
use crate::graph::ModuleGraph;
use crate::report::PassReport;

pub use boundary::SourceBoundaryScanner;
pub use conventions::BuildConventionChecker;
pub use descriptor::{dependency_items, DescriptorValidator};
pub use scheduler::SchedulerSafetyScanner;
pub use shading::{
    audit_entries, locate_artifact, read_manifest, within_namespace, ArchiveManifestEntry,
    EntryAudit, Ownership, ShadedArtifactAuditor,
};

/// A single verification pass
pub trait VerificationPass: Send + Sync {
    fn id(&self) -> PassId;

    /// Run to completion and return every finding; never stops early.
    fn run(&self, graph: &ModuleGraph) -> PassReport;
}

/// Build the requested passes, in report order.
pub fn build_passes(
    config: &Config,
    selected: &[PassId],
) -> VerifyResult<Vec<Box<dyn VerificationPass>>> {
    let mut passes: Vec<Box<dyn VerificationPass>> = Vec::new();
    for id in PassId::ALL {
        if !selected.is_empty() && !selected.contains(&id) {
            continue;
        }
        let pass: Box<dyn VerificationPass> = match id {
            PassId::Boundary => Box::new(SourceBoundaryScanner::new(config)),
            PassId::Descriptor => Box::new(DescriptorValidator::new(config)),
            PassId::Conventions => Box::new(BuildConventionChecker::new(config)?),
            PassId::Shading => Box::new(ShadedArtifactAuditor::new(config)),
            PassId::Scheduler => Box::new(SchedulerSafetyScanner::new(config)),
        };
        passes.push(pass);
    }
    Ok(passes)
}
