//! Shading declarations extracted from a build script
//!
//! Pattern extraction only; the script is never evaluated.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::RelocationRule;

static RELOCATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"relocate\(\s*"([^"]+)"\s*,\s*"([^"]+)"\s*\)"#).expect("relocate regex")
});

static ARCHIVE_BASE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"archiveBaseName(?:\.set\(\s*|\s*=\s*)"([^"]+)""#).expect("archive name regex")
});

/// What a build script declares about its shaded artifact
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadingDeclaration {
    pub shaded: bool,
    pub archive_base_name: Option<String>,
    pub relocations: Vec<RelocationRule>,
}

/// Parse the shading intent of `module`'s build script.
///
/// Commented-out lines (`//`) are ignored. Relocations and the archive name
/// are only collected when one of `opt_in_markers` is present.
pub fn parse_shading(module: &str, script: &str, opt_in_markers: &[String]) -> ShadingDeclaration {
    let live: String = script
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");

    let shaded = opt_in_markers.iter().any(|m| live.contains(m.as_str()));
    if !shaded {
        return ShadingDeclaration::default();
    }

    let archive_base_name = ARCHIVE_BASE_NAME
        .captures_iter(&live)
        .last()
        .map(|c| c[1].to_string());

    let relocations = RELOCATE
        .captures_iter(&live)
        .map(|c| RelocationRule::new(module, &c[1], &c[2]))
        .collect();

    ShadingDeclaration {
        shaded,
        archive_base_name,
        relocations,
    }
}
