//! Legacy scheduler usage
//!
//! Global scheduler calls are not region-safe on threaded server forks. Hits
//! are warnings only.

use crate::config::{Config, LayoutConfig};
use crate::domain::{Module, PassId, Violation};
use crate::graph::ModuleGraph;
use crate::report::{FindingSink, PassReport};

use super::sources::{for_each_line, source_files};
use super::VerificationPass;

pub struct SchedulerSafetyScanner {
    patterns: Vec<String>,
    layout: LayoutConfig,
}

impl SchedulerSafetyScanner {
    pub fn new(config: &Config) -> Self {
        Self {
            patterns: config.scheduler.legacy_patterns.clone(),
            layout: config.layout.clone(),
        }
    }

    fn scan_module(&self, graph: &ModuleGraph, module: &Module, sink: &mut impl FindingSink) {
        let root = module.root().join(&self.layout.source_dir);
        for file in source_files(&root, &self.layout.source_extensions) {
            let relative = graph.relative(&file);
            let result = for_each_line(&file, |number, line| {
                let trimmed = line.trim();
                if trimmed.starts_with("//") || trimmed.starts_with('*') {
                    return;
                }
                if let Some(pattern) = self.patterns.iter().find(|p| trimmed.contains(p.as_str())) {
                    sink.add(
                        Violation::warning(
                            PassId::Scheduler,
                            module.name(),
                            format!("legacy scheduler call {}", pattern),
                        )
                        .in_file(relative.clone())
                        .at_line(number),
                    );
                }
            });
            if let Err(err) = result {
                tracing::warn!(file = %relative, error = %err, "cannot read source file");
            }
        }
    }
}

impl VerificationPass for SchedulerSafetyScanner {
    fn id(&self) -> PassId {
        PassId::Scheduler
    }

    fn run(&self, graph: &ModuleGraph) -> PassReport {
        let mut report = PassReport::new(self.id());
        if self.patterns.is_empty() {
            return report;
        }
        for module in graph.modules().filter(|m| m.has_source_tree()) {
            self.scan_module(graph, module, &mut report);
        }
        tracing::info!(warnings = report.warnings.len(), "scheduler pass finished");
        report
    }
}
