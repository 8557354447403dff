//! Static audit of declared relocations and archive names

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{Module, PassId, Violation};
use crate::report::FindingSink;

/// Whether `target` lives under the shaded namespace `root`
pub fn within_namespace(target: &str, root: &str) -> bool {
    target == root
        || target
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// Per-rule checks for one shaded module.
pub fn check_rules(module: &Module, file: &str, namespace_root: &str, sink: &mut impl FindingSink) {
    for rule in module.relocations() {
        if !within_namespace(&rule.target, namespace_root) {
            sink.add(
                Violation::contract(
                    PassId::Shading,
                    module.name(),
                    format!(
                        "relocation target '{}' is outside the shaded namespace '{}'",
                        rule.target, namespace_root
                    ),
                )
                .in_file(file),
            );
        }
        if rule.source == rule.target {
            sink.add(
                Violation::contract(
                    PassId::Shading,
                    module.name(),
                    format!("relocation of '{}' does not change its package", rule.source),
                )
                .in_file(file),
            );
        }
    }
}

/// Global claims of every shaded module, merged in one place.
///
/// Each key maps to the set of distinct modules claiming it, so the outcome
/// does not depend on the order modules are merged.
#[derive(Debug, Default)]
pub struct Ownership<'a> {
    targets: BTreeMap<&'a str, BTreeSet<&'a str>>,
    archive_names: BTreeMap<&'a str, BTreeSet<&'a str>>,
}

impl<'a> Ownership<'a> {
    pub fn claim(&mut self, module: &'a Module) {
        for target in module.declared_relocations() {
            self.targets.entry(target).or_default().insert(module.name());
        }
        if let Some(name) = module.archive_base_name() {
            self.archive_names.entry(name).or_default().insert(module.name());
        }
    }

    /// One violation per target or archive name claimed by several modules
    pub fn report_collisions(&self, sink: &mut impl FindingSink) {
        for (target, owners) in &self.targets {
            if let Some(v) = collision("relocation target", target, owners) {
                sink.add(v);
            }
        }
        for (name, owners) in &self.archive_names {
            if let Some(v) = collision("archive base name", name, owners) {
                sink.add(v);
            }
        }
    }
}

fn collision(what: &str, key: &str, owners: &BTreeSet<&str>) -> Option<Violation> {
    if owners.len() < 2 {
        return None;
    }
    let first = owners.iter().next()?;
    let names: Vec<&str> = owners.iter().copied().collect();
    Some(Violation::contract(
        PassId::Shading,
        first,
        format!(
            "{} '{}' is claimed by multiple modules: {}",
            what,
            key,
            names.join(", ")
        ),
    ))
}

/// Required targets `module` does not declare, in sorted order
pub fn missing_required<'r>(module: &Module, required: &'r [String]) -> Vec<&'r str> {
    let declared = module.declared_relocations();
    let missing: BTreeSet<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|t| !declared.contains(t))
        .collect();
    missing.into_iter().collect()
}
