//! Build script conventions
//!
//! Every rule is evaluated against the whole build declaration; a failing
//! rule never stops the remaining ones.

use std::fs;

use regex::Regex;

use crate::config::{Config, LayoutConfig};
use crate::domain::{ConventionRule, Expectation, Module, PassId, Violation};
use crate::error::VerifyResult;
use crate::graph::ModuleGraph;
use crate::report::{FindingSink, PassReport};

use super::VerificationPass;

pub struct BuildConventionChecker {
    rules: Vec<(ConventionRule, Regex)>,
    layout: LayoutConfig,
}

impl BuildConventionChecker {
    pub fn new(config: &Config) -> VerifyResult<Self> {
        Ok(Self {
            rules: config.compiled_conventions()?,
            layout: config.layout.clone(),
        })
    }

    /// Check one build script's text against every rule.
    pub fn check_script(
        &self,
        module_name: &str,
        file: &str,
        script: &str,
        sink: &mut impl FindingSink,
    ) {
        for (rule, re) in &self.rules {
            match rule.expect {
                Expectation::Require => {
                    if !re.is_match(script) {
                        sink.add(
                            Violation::contract(
                                PassId::Conventions,
                                module_name,
                                format!("[{}] {}", rule.id, rule.message),
                            )
                            .in_file(file),
                        );
                    }
                }
                Expectation::Forbid => {
                    if let Some(found) = re.find(script) {
                        let line = script[..found.start()].matches('\n').count() + 1;
                        sink.add(
                            Violation::contract(
                                PassId::Conventions,
                                module_name,
                                format!("[{}] {}", rule.id, rule.message),
                            )
                            .in_file(file)
                            .at_line(line),
                        );
                    }
                }
            }
        }
    }

    fn check_module(&self, graph: &ModuleGraph, module: &Module, sink: &mut impl FindingSink) {
        let path = module.root().join(&self.layout.build_file);
        let file = graph.relative(&path);

        if !module.has_build_declaration() {
            sink.add(
                Violation::structural(
                    PassId::Conventions,
                    module.name(),
                    format!("missing build declaration {}", self.layout.build_file.display()),
                )
                .in_file(file),
            );
            return;
        }

        match fs::read_to_string(&path) {
            Ok(script) => self.check_script(module.name(), &file, &script, sink),
            Err(err) => sink.add(
                Violation::structural(
                    PassId::Conventions,
                    module.name(),
                    format!("cannot read build declaration: {}", err),
                )
                .in_file(file),
            ),
        }
    }
}

impl VerificationPass for BuildConventionChecker {
    fn id(&self) -> PassId {
        PassId::Conventions
    }

    fn run(&self, graph: &ModuleGraph) -> PassReport {
        let mut report = PassReport::new(self.id());
        for module in graph.modules().filter(|m| m.has_descriptor()) {
            self.check_module(graph, module, &mut report);
        }
        tracing::info!(errors = report.errors.len(), "conventions pass finished");
        report
    }
}
