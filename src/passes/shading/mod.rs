//! Shaded artifact audit
//!
//! Three stages over the same module set:
//! 1. declared relocations and archive names, including cross-module collisions
//! 2. completeness of each module's required relocation targets
//! 3. the primary module's newest archive: leaked raw packages and
//!    relocations that never happened
//!
//! Stage 3 failures (missing or unreadable archive) never hide the findings
//! of the first two stages.

mod artifact;
mod declarations;

use crate::config::{Config, LayoutConfig, ShadingConfig};
use crate::domain::{Module, PassId, Violation};
use crate::graph::ModuleGraph;
use crate::report::{FindingSink, PassReport};

use super::VerificationPass;

pub use artifact::{audit_entries, locate_artifact, read_manifest, ArchiveManifestEntry, EntryAudit};
pub use declarations::{within_namespace, Ownership};

pub struct ShadedArtifactAuditor {
    settings: ShadingConfig,
    layout: LayoutConfig,
}

impl ShadedArtifactAuditor {
    pub fn new(config: &Config) -> Self {
        Self {
            settings: config.shading.clone(),
            layout: config.layout.clone(),
        }
    }

    fn build_file(&self, graph: &ModuleGraph, module: &Module) -> String {
        graph.relative(&module.root().join(&self.layout.build_file))
    }

    fn audit_declarations(&self, graph: &ModuleGraph, report: &mut PassReport) {
        let mut ownership = Ownership::default();
        for module in graph.modules().filter(|m| m.is_shaded()) {
            let file = self.build_file(graph, module);
            declarations::check_rules(module, &file, &self.settings.namespace_root, report);
            ownership.claim(module);
        }
        ownership.report_collisions(report);
    }

    fn audit_completeness(&self, graph: &ModuleGraph, report: &mut PassReport) {
        for (name, required) in &self.settings.required_relocations {
            let Some(module) = graph.get(name) else {
                report.add(Violation::warning(
                    PassId::Shading,
                    name,
                    "module with required relocations is not part of the project",
                ));
                continue;
            };
            let missing = declarations::missing_required(module, required);
            if !missing.is_empty() {
                report.add(
                    Violation::contract(
                        PassId::Shading,
                        name,
                        format!("missing required relocations: {}", missing.join(", ")),
                    )
                    .in_file(self.build_file(graph, module)),
                );
            }
        }
    }

    /// Targets the primary archive must contain
    fn expected_targets(&self, module: &Module) -> Vec<String> {
        match self.settings.required_relocations.get(module.name()) {
            Some(required) => required.clone(),
            None => module
                .declared_relocations()
                .into_iter()
                .filter(|t| within_namespace(t, &self.settings.namespace_root))
                .map(str::to_string)
                .collect(),
        }
    }

    fn audit_artifact(&self, graph: &ModuleGraph, report: &mut PassReport) {
        let primary = self.settings.primary_module.as_str();
        let Some(module) = graph.get(primary) else {
            report.add(Violation::warning(
                PassId::Shading,
                primary,
                "primary module is not part of the project, archive not audited",
            ));
            return;
        };
        if !module.is_shaded() {
            report.add(
                Violation::contract(
                    PassId::Shading,
                    primary,
                    "primary module does not declare a shaded artifact",
                )
                .in_file(self.build_file(graph, module)),
            );
            return;
        }

        let output_dir = module.root().join(&self.layout.build_output_dir);
        let output_rel = graph.relative(&output_dir);
        let located = match locate_artifact(&output_dir, module.archive_base_name()) {
            Ok(located) => located,
            Err(err) => {
                report.add(
                    Violation::artifact_unavailable(
                        PassId::Shading,
                        primary,
                        format!("cannot list build outputs: {}", err),
                    )
                    .in_file(output_rel),
                );
                return;
            }
        };
        let Some(archive) = located else {
            report.add(
                Violation::artifact_unavailable(
                    PassId::Shading,
                    primary,
                    format!(
                        "no built archive{} found",
                        module
                            .archive_base_name()
                            .map(|b| format!(" named {}*.jar", b))
                            .unwrap_or_default()
                    ),
                )
                .in_file(output_rel),
            );
            return;
        };

        let archive_rel = graph.relative(&archive);
        report.add_detail(format!("Audited archive: {}", archive_rel));
        tracing::info!(archive = %archive_rel, "auditing shaded archive");

        let entries = match read_manifest(&archive) {
            Ok(entries) => entries,
            Err(err) => {
                report.add(
                    Violation::artifact_unavailable(
                        PassId::Shading,
                        primary,
                        format!("cannot open archive: {}", err),
                    )
                    .in_file(archive_rel),
                );
                return;
            }
        };

        let expected = self.expected_targets(module);
        let audit = audit_entries(&entries, &self.settings.forbidden_raw_packages, &expected);
        report.add_detail(format!(
            "Class entries: {}",
            entries.iter().filter(|e| e.is_class_file).count()
        ));

        for leak in &audit.leaks {
            report.add(
                Violation::contract(
                    PassId::Shading,
                    primary,
                    format!("unrelocated class leaked into archive: {}", leak),
                )
                .in_file(archive_rel.clone()),
            );
        }

        if audit.observed.is_empty() && !expected.is_empty() {
            report.add(
                Violation::warning(
                    PassId::Shading,
                    primary,
                    "no relocated classes found, archive may not be shaded",
                )
                .in_file(archive_rel.clone()),
            );
        }
        for target in expected.iter().filter(|t| !audit.observed.contains(*t)) {
            report.add(
                Violation::contract(
                    PassId::Shading,
                    primary,
                    format!("declared relocation not present in archive: {}", target),
                )
                .in_file(archive_rel.clone()),
            );
        }
    }
}

impl VerificationPass for ShadedArtifactAuditor {
    fn id(&self) -> PassId {
        PassId::Shading
    }

    fn run(&self, graph: &ModuleGraph) -> PassReport {
        let mut report = PassReport::new(self.id());
        self.audit_declarations(graph, &mut report);
        self.audit_completeness(graph, &mut report);
        self.audit_artifact(graph, &mut report);
        tracing::info!(
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "shading pass finished"
        );
        report
    }
}
