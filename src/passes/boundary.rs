//! API boundary scanning
//!
//! Textual heuristic: a trimmed line starting with `import <forbidden-root>.`
//! is a violation. Re-exports and fully-qualified references are not seen.

use crate::config::{Config, LayoutConfig};
use crate::domain::{ForbiddenImportRule, Module, PassId, Violation};
use crate::graph::ModuleGraph;
use crate::report::{FindingSink, PassReport};

use super::sources::{for_each_line, source_files};
use super::VerificationPass;

pub struct SourceBoundaryScanner {
    rules: Vec<ForbiddenImportRule>,
    layout: LayoutConfig,
}

impl SourceBoundaryScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: config.boundary.rules.clone(),
            layout: config.layout.clone(),
        }
    }

    fn scan_module(&self, graph: &ModuleGraph, module: &Module, sink: &mut impl FindingSink) {
        let rules: Vec<&ForbiddenImportRule> = self
            .rules
            .iter()
            .filter(|r| r.applies_to(module.name()))
            .collect();
        if rules.is_empty() {
            return;
        }
        if !module.has_source_tree() {
            tracing::debug!(module = module.name(), "restricted module has no sources");
            return;
        }

        let root = module.root().join(&self.layout.source_dir);
        for file in source_files(&root, &self.layout.source_extensions) {
            let relative = graph.relative(&file);
            let result = for_each_line(&file, |number, line| {
                let trimmed = line.trim();
                if let Some(rule) = rules.iter().find(|r| r.matches_line(trimmed)) {
                    sink.add(
                        Violation::contract(
                            PassId::Boundary,
                            module.name(),
                            format!(
                                "imports {} directly: {}",
                                rule.forbidden_root, trimmed
                            ),
                        )
                        .in_file(relative.clone())
                        .at_line(number),
                    );
                }
            });
            if let Err(err) = result {
                sink.add(
                    Violation::warning(
                        PassId::Boundary,
                        module.name(),
                        format!("cannot read source file: {}", err),
                    )
                    .in_file(relative),
                );
            }
        }
    }
}

impl VerificationPass for SourceBoundaryScanner {
    fn id(&self) -> PassId {
        PassId::Boundary
    }

    fn run(&self, graph: &ModuleGraph) -> PassReport {
        let mut report = PassReport::new(self.id());
        for rule in &self.rules {
            for name in &rule.modules {
                if graph.get(name).is_none() {
                    tracing::debug!(module = %name, "restricted module not present in project");
                }
            }
        }
        for module in graph.modules() {
            self.scan_module(graph, module, &mut report);
        }
        tracing::info!(errors = report.errors.len(), "boundary pass finished");
        report
    }
}
