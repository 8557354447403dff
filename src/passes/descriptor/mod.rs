//! Plugin descriptor validation
//!
//! Checks, per module:
//! - the required top-level keys are present
//! - `version` is exactly the build placeholder, never a literal
//! - non-core modules depend on the core plugin (`depend` / `softdepend`)

mod tokens;

use std::collections::BTreeSet;
use std::fs;

use crate::config::{Config, DescriptorConfig, LayoutConfig};
use crate::domain::{Module, PassId, Violation};
use crate::graph::ModuleGraph;
use crate::report::{FindingSink, PassReport};

use super::VerificationPass;

use tokens::{find_key, list_items, tokenize, unquote};

/// Every dependency declared under any of `keys`, deduplicated.
pub fn dependency_items(content: &str, keys: &[String]) -> BTreeSet<String> {
    let lines = tokenize(content);
    keys.iter()
        .flat_map(|key| list_items(&lines, key))
        .collect()
}

pub struct DescriptorValidator {
    settings: DescriptorConfig,
    layout: LayoutConfig,
}

impl DescriptorValidator {
    pub fn new(config: &Config) -> Self {
        Self {
            settings: config.descriptor.clone(),
            layout: config.layout.clone(),
        }
    }

    fn in_scope(&self, module: &Module) -> bool {
        (module.has_source_tree() || module.has_descriptor())
            && !self.settings.exempt.iter().any(|e| e == module.name())
    }

    /// Validate descriptor text for `module_name`, reporting against `file`.
    pub fn check_content(
        &self,
        module_name: &str,
        file: &str,
        content: &str,
        sink: &mut impl FindingSink,
    ) {
        let lines = tokenize(content);

        for key in &self.settings.required_keys {
            if find_key(&lines, key).is_none() {
                sink.add(
                    Violation::contract(
                        PassId::Descriptor,
                        module_name,
                        format!("missing required key '{}'", key),
                    )
                    .in_file(file),
                );
            }
        }

        if let Some((line, value)) = find_key(&lines, "version") {
            let version = unquote(value);
            if version != self.settings.version_placeholder {
                sink.add(
                    Violation::contract(
                        PassId::Descriptor,
                        module_name,
                        format!(
                            "version must be '{}', found '{}'",
                            self.settings.version_placeholder, version
                        ),
                    )
                    .in_file(file)
                    .at_line(line),
                );
            }
        }

        if module_name != self.settings.core_module {
            let declared = self
                .settings
                .dependency_keys
                .iter()
                .any(|key| list_items(&lines, key).iter().any(|d| d == &self.settings.core_plugin));
            if !declared {
                sink.add(
                    Violation::contract(
                        PassId::Descriptor,
                        module_name,
                        format!(
                            "must declare a dependency on '{}' ({})",
                            self.settings.core_plugin,
                            self.settings.dependency_keys.join(" or ")
                        ),
                    )
                    .in_file(file),
                );
            }
        }
    }

    fn check_module(&self, graph: &ModuleGraph, module: &Module, sink: &mut impl FindingSink) {
        let path = module.root().join(&self.layout.descriptor);
        let file = graph.relative(&path);

        if !module.has_descriptor() {
            sink.add(
                Violation::structural(
                    PassId::Descriptor,
                    module.name(),
                    format!("missing plugin descriptor {}", self.layout.descriptor.display()),
                )
                .in_file(file),
            );
            return;
        }

        match fs::read_to_string(&path) {
            Ok(content) => self.check_content(module.name(), &file, &content, sink),
            Err(err) => sink.add(
                Violation::structural(
                    PassId::Descriptor,
                    module.name(),
                    format!("cannot read plugin descriptor: {}", err),
                )
                .in_file(file),
            ),
        }
    }
}

impl VerificationPass for DescriptorValidator {
    fn id(&self) -> PassId {
        PassId::Descriptor
    }

    fn run(&self, graph: &ModuleGraph) -> PassReport {
        let mut report = PassReport::new(self.id());
        for module in graph.modules().filter(|m| self.in_scope(m)) {
            self.check_module(graph, module, &mut report);
        }
        tracing::info!(errors = report.errors.len(), "descriptor pass finished");
        report
    }
}
