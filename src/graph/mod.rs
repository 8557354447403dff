//! Module graph discovery
//!
//! Finds the modules of a project and tags each with the attributes the
//! verification passes depend on. Ordering is lexicographic by module name so
//! reports are reproducible.

mod build_script;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::domain::Module;
use crate::error::{VerifyError, VerifyResult};

pub use build_script::{parse_shading, ShadingDeclaration};

/// The discovered set of modules of one project
#[derive(Debug, Clone, Serialize)]
pub struct ModuleGraph {
    root: PathBuf,
    modules: BTreeMap<String, Module>,
}

impl ModuleGraph {
    /// Discover modules under `root`.
    ///
    /// With an explicit `config.modules` list, only those directories are
    /// considered; otherwise every non-hidden, non-ignored child directory
    /// carrying a source tree, descriptor or build declaration is a module.
    pub fn discover(root: &Path, config: &Config) -> VerifyResult<Self> {
        if !root.is_dir() {
            return Err(VerifyError::ProjectNotFound {
                path: root.to_path_buf(),
            });
        }

        let candidates: Vec<String> = if config.modules.is_empty() {
            list_child_dirs(root, &config.layout.ignored_dirs)?
        } else {
            config.modules.clone()
        };

        let mut modules = BTreeMap::new();
        for name in candidates {
            let dir = root.join(&name);
            if !dir.is_dir() {
                tracing::warn!(module = %name, "configured module directory is missing, skipping");
                continue;
            }
            let module = inspect_module(&name, &dir, config);
            let explicit = !config.modules.is_empty();
            if explicit
                || module.has_source_tree()
                || module.has_descriptor()
                || module.has_build_declaration()
            {
                modules.insert(name, module);
            }
        }

        tracing::info!(count = modules.len(), root = %root.display(), "discovered modules");
        Ok(Self {
            root: root.to_path_buf(),
            modules,
        })
    }

    /// Build a graph from already-constructed modules
    pub fn from_modules(root: impl Into<PathBuf>, modules: impl IntoIterator<Item = Module>) -> Self {
        Self {
            root: root.into(),
            modules: modules
                .into_iter()
                .map(|m| (m.name().to_string(), m))
                .collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Modules in lexicographic name order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Path of `path` relative to the project root, `/`-separated
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn list_child_dirs(root: &Path, ignored: &[String]) -> VerifyResult<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if name.starts_with('.') || ignored.iter().any(|i| i == &name) {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

fn inspect_module(name: &str, dir: &Path, config: &Config) -> Module {
    let layout = &config.layout;
    let build_file = dir.join(&layout.build_file);

    let mut module = Module::new(name, dir)
        .with_source_tree(dir.join(&layout.source_dir).is_dir())
        .with_descriptor(dir.join(&layout.descriptor).is_file())
        .with_build_declaration(build_file.is_file());

    if module.has_build_declaration() {
        match fs::read_to_string(&build_file) {
            Ok(script) => {
                let decl = parse_shading(name, &script, &config.shading.opt_in_markers);
                module = module.with_shading(decl.shaded, decl.archive_base_name, decl.relocations);
            }
            Err(err) => {
                tracing::warn!(module = %name, error = %err, "cannot read build declaration");
            }
        }
    }

    tracing::debug!(
        module = %name,
        source = module.has_source_tree(),
        descriptor = module.has_descriptor(),
        build = module.has_build_declaration(),
        shaded = module.is_shaded(),
        "inspected module"
    );
    module
}
