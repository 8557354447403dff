//! Module entity

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::rules::RelocationRule;

/// A project module discovered under the project root.
///
/// Built once by the module graph and never mutated afterwards; passes only
/// receive shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    name: String,
    root: PathBuf,
    has_source_tree: bool,
    has_descriptor: bool,
    has_build_declaration: bool,
    shaded: bool,
    relocations: Vec<RelocationRule>,
    archive_base_name: Option<String>,
}

impl Module {
    /// Create a module with no attributes set
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            has_source_tree: false,
            has_descriptor: false,
            has_build_declaration: false,
            shaded: false,
            relocations: Vec::new(),
            archive_base_name: None,
        }
    }

    pub fn with_source_tree(mut self, present: bool) -> Self {
        self.has_source_tree = present;
        self
    }

    pub fn with_descriptor(mut self, present: bool) -> Self {
        self.has_descriptor = present;
        self
    }

    pub fn with_build_declaration(mut self, present: bool) -> Self {
        self.has_build_declaration = present;
        self
    }

    /// Attach the shading declarations parsed from the build script
    pub fn with_shading(
        mut self,
        shaded: bool,
        archive_base_name: Option<String>,
        relocations: Vec<RelocationRule>,
    ) -> Self {
        self.shaded = shaded;
        self.archive_base_name = archive_base_name;
        self.relocations = relocations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_source_tree(&self) -> bool {
        self.has_source_tree
    }

    pub fn has_descriptor(&self) -> bool {
        self.has_descriptor
    }

    pub fn has_build_declaration(&self) -> bool {
        self.has_build_declaration
    }

    /// Whether the build script opts into artifact shading
    pub fn is_shaded(&self) -> bool {
        self.shaded
    }

    pub fn relocations(&self) -> &[RelocationRule] {
        &self.relocations
    }

    /// Target prefixes of every declared relocation
    pub fn declared_relocations(&self) -> BTreeSet<&str> {
        self.relocations.iter().map(|r| r.target.as_str()).collect()
    }

    pub fn archive_base_name(&self) -> Option<&str> {
        self.archive_base_name.as_deref()
    }
}
