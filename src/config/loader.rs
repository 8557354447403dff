//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{VerifyError, VerifyResult};

use super::types::Config;

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "modgate.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| VerifyError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate()?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `modgate.toml` from the project root, falling back to defaults.
///
/// Unlike a missing file, a present but malformed file is an error.
pub fn load_or_default(project_root: &Path) -> VerifyResult<(Config, Vec<ConfigWarning>)> {
    let project_config = project_root.join(CONFIG_FILE_NAME);
    let (config, warnings) = if project_config.is_file() {
        tracing::debug!(path = %project_config.display(), "loading project config");
        load_with_warnings(&project_config)?
    } else {
        (Config::default(), Vec::new())
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (MODGATE_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // MODGATE_REPORT_DIR
    if let Ok(dir) = std::env::var("MODGATE_REPORT_DIR") {
        if !dir.trim().is_empty() {
            config.report.dir = PathBuf::from(dir);
        }
    }

    // MODGATE_PRIMARY_MODULE
    if let Ok(module) = std::env::var("MODGATE_PRIMARY_MODULE") {
        if !module.trim().is_empty() {
            config.shading.primary_module = module.trim().to_string();
        }
    }

    config
}

/// Line declaring `key = ...`; substrings of longer keys do not match.
fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content.lines().enumerate().find_map(|(i, line)| {
        let rest = line.trim_start().strip_prefix(key)?;
        rest.trim_start().starts_with('=').then_some(i + 1)
    })
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "modules",
        "layout",
        "source_dir",
        "source_extensions",
        "descriptor",
        "build_file",
        "build_output_dir",
        "ignored_dirs",
        "boundary",
        "rules",
        "forbidden_root",
        "required_keys",
        "version_placeholder",
        "core_module",
        "core_plugin",
        "dependency_keys",
        "exempt",
        "conventions",
        "pattern",
        "expect",
        "message",
        "shading",
        "namespace_root",
        "primary_module",
        "opt_in_markers",
        "required_relocations",
        "forbidden_raw_packages",
        "scheduler",
        "legacy_patterns",
        "report",
        "dir",
        "warning_preview",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
