//! Physical archive inspection
//!
//! Only entry names and directory flags are read; entry contents never are.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use zip::result::ZipResult;
use zip::ZipArchive;

use crate::domain::package_path;

/// One entry of an opened archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveManifestEntry {
    pub path: String,
    pub is_class_file: bool,
}

impl ArchiveManifestEntry {
    pub fn new(path: impl Into<String>, is_dir: bool) -> Self {
        let path = path.into();
        let is_class_file = !is_dir && path.ends_with(".class");
        Self {
            path,
            is_class_file,
        }
    }

    /// Entry path with any multi-release `META-INF/versions/<n>/` prefix removed
    pub fn class_path(&self) -> &str {
        strip_versioned_prefix(&self.path)
    }
}

fn strip_versioned_prefix(path: &str) -> &str {
    let Some(rest) = path.strip_prefix("META-INF/versions/") else {
        return path;
    };
    match rest.split_once('/') {
        Some((version, inner)) if version.chars().all(|c| c.is_ascii_digit()) => inner,
        _ => path,
    }
}

fn is_candidate(name: &str, base_name: Option<&str>) -> bool {
    let Some(stem) = name.strip_suffix(".jar") else {
        return false;
    };
    if stem.ends_with("-sources") || stem.ends_with("-javadoc") {
        return false;
    }
    base_name.map_or(true, |base| {
        stem.strip_prefix(base)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    })
}

/// Newest archive in `output_dir`, optionally restricted to `base_name`.
///
/// Ties on modification time go to the lexicographically greatest name.
pub fn locate_artifact(output_dir: &Path, base_name: Option<&str>) -> std::io::Result<Option<PathBuf>> {
    if !output_dir.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<(SystemTime, String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_candidate(&name, base_name) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        tracing::debug!(artifact = %name, "artifact candidate");
        candidates.push((modified, name, entry.path()));
    }

    if candidates.len() > 1 {
        tracing::warn!(
            count = candidates.len(),
            dir = %output_dir.display(),
            "several build outputs present, auditing the newest"
        );
    }

    Ok(candidates
        .into_iter()
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, _, path)| path))
}

/// List every entry of the archive at `path`.
pub fn read_manifest(path: &Path) -> ZipResult<Vec<ArchiveManifestEntry>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)?;
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        entries.push(ArchiveManifestEntry::new(entry.name(), entry.is_dir()));
    }
    Ok(entries)
}

/// What a walk over the class entries found
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EntryAudit {
    /// Class entries under a forbidden raw package
    pub leaks: Vec<String>,
    /// Expected target prefixes seen at least once
    pub observed: BTreeSet<String>,
}

/// Walk class entries once, collecting leaks and observed relocations.
///
/// `forbidden_raw` and `expected` are dotted package prefixes.
pub fn audit_entries(
    entries: &[ArchiveManifestEntry],
    forbidden_raw: &[String],
    expected: &[String],
) -> EntryAudit {
    let forbidden_paths: Vec<String> = forbidden_raw.iter().map(|p| package_path(p)).collect();
    let expected_paths: Vec<(&String, String)> =
        expected.iter().map(|p| (p, package_path(p))).collect();

    let mut audit = EntryAudit::default();
    for entry in entries.iter().filter(|e| e.is_class_file) {
        let path = entry.class_path();
        if forbidden_paths.iter().any(|raw| path.starts_with(raw.as_str())) {
            audit.leaks.push(entry.path.clone());
        }
        for (target, target_path) in &expected_paths {
            if path.starts_with(target_path.as_str()) {
                audit.observed.insert((*target).clone());
            }
        }
    }
    audit
}
