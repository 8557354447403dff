//! Configuration type definitions
//!
//! Defaults describe the reference plugin project layout, so a project
//! following it needs no `modgate.toml` at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{ConventionRule, ForbiddenImportRule};
use crate::error::{VerifyError, VerifyResult};

use super::loader::{self, ConfigWarning};

/// Conventional file positions inside a module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub source_dir: PathBuf,
    pub source_extensions: Vec<String>,
    pub descriptor: PathBuf,
    pub build_file: PathBuf,
    pub build_output_dir: PathBuf,
    /// Top-level directories that are never modules
    pub ignored_dirs: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/java"),
            source_extensions: vec!["java".to_string()],
            descriptor: PathBuf::from("src/main/resources/plugin.yml"),
            build_file: PathBuf::from("build.gradle.kts"),
            build_output_dir: PathBuf::from("build/libs"),
            ignored_dirs: [
                "build",
                "gradle",
                "buildSrc",
                "tools",
                "automation",
                "examples",
                "tests",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// API boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub rules: Vec<ForbiddenImportRule>,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            rules: vec![ForbiddenImportRule {
                modules: [
                    "zakum-battlepass",
                    "zakum-crates",
                    "zakum-pets",
                    "zakum-miniaturepets",
                    "orbis-essentials",
                    "orbis-gui",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                forbidden_root: "net.orbis.zakum.core".to_string(),
            }],
        }
    }
}

/// Plugin descriptor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptorConfig {
    pub required_keys: Vec<String>,
    pub version_placeholder: String,
    /// Module that provides the core plugin (exempt from the dependency check)
    pub core_module: String,
    /// Plugin name other descriptors must depend on
    pub core_plugin: String,
    pub dependency_keys: Vec<String>,
    /// Library modules that ship no descriptor
    pub exempt: Vec<String>,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            required_keys: ["name", "version", "main", "api-version"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            version_placeholder: "${version}".to_string(),
            core_module: "zakum-core".to_string(),
            core_plugin: "Zakum".to_string(),
            dependency_keys: vec!["depend".to_string(), "softdepend".to_string()],
            exempt: vec!["zakum-api".to_string(), "zakum-packets".to_string()],
        }
    }
}

/// Build script convention configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConventionsConfig {
    pub rules: Vec<ConventionRule>,
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ConventionRule::require(
                    "platform-api-compile-only",
                    r"compileOnly\(\s*libs\.paper\.api\s*\)",
                    "must declare compileOnly(libs.paper.api)",
                ),
                ConventionRule::forbid(
                    "platform-api-no-hardcoded-version",
                    r"io\.papermc\.paper:paper-api:",
                    "must not hardcode the paper-api coordinate or version",
                ),
                ConventionRule::require(
                    "core-api-project-reference",
                    r#"project\(\s*":zakum-api"\s*\)"#,
                    "must depend on zakum-api via project(\":zakum-api\")",
                ),
                ConventionRule::require(
                    "version-placeholder-expansion",
                    r#"expand\(\s*"version"\s+to\s+project\.version\s*\)"#,
                    "must expand the version placeholder in processResources",
                ),
            ],
        }
    }
}

/// Shaded artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingConfig {
    /// Every relocation target must live under this package
    pub namespace_root: String,
    /// Module whose archive is physically audited
    pub primary_module: String,
    /// Build script substrings that opt a module into shading
    pub opt_in_markers: Vec<String>,
    /// module name -> relocation targets that module must declare
    pub required_relocations: BTreeMap<String, Vec<String>>,
    /// Raw third-party packages that must never appear in the archive
    pub forbidden_raw_packages: Vec<String>,
}

const BUNDLED_LIBRARIES: &[(&str, &str)] = &[
    ("com.github.benmanes.caffeine", "caffeine"),
    ("com.zaxxer.hikari", "hikari"),
    ("org.flywaydb", "flyway"),
    ("org.slf4j", "slf4j"),
    ("org.spongepowered.configurate", "configurate"),
    ("okhttp3", "okhttp3"),
    ("okio", "okio"),
    ("io.github.resilience4j", "resilience4j"),
    ("io.micrometer", "micrometer"),
    ("io.prometheus", "prometheus"),
    ("kotlin", "kotlin"),
    ("kotlinx", "kotlinx"),
    ("io.vavr", "vavr"),
    ("org.HdrHistogram", "hdrhistogram"),
    ("org.LatencyUtils", "latencyutils"),
];

impl Default for ShadingConfig {
    fn default() -> Self {
        let namespace_root = "net.orbis.zakum.libs".to_string();
        let targets = BUNDLED_LIBRARIES
            .iter()
            .map(|(_, alias)| format!("{}.{}", namespace_root, alias))
            .collect();

        let mut required_relocations = BTreeMap::new();
        required_relocations.insert("zakum-core".to_string(), targets);

        Self {
            namespace_root,
            primary_module: "zakum-core".to_string(),
            opt_in_markers: vec!["shadowJar".to_string(), "libs.plugins.shadow".to_string()],
            required_relocations,
            forbidden_raw_packages: BUNDLED_LIBRARIES
                .iter()
                .map(|(raw, _)| raw.to_string())
                .collect(),
        }
    }
}

/// Legacy scheduler detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub legacy_patterns: Vec<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            legacy_patterns: vec![
                "Bukkit.getScheduler()".to_string(),
                "getServer().getScheduler()".to_string(),
            ],
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Relative paths resolve against the project root
    pub dir: PathBuf,
    pub warning_preview: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build/reports/modgate"),
            warning_preview: 10,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Explicit module list; discovered from the project root when empty
    #[serde(default)]
    pub modules: Vec<String>,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub boundary: BoundaryConfig,

    #[serde(default)]
    pub descriptor: DescriptorConfig,

    #[serde(default)]
    pub conventions: ConventionsConfig,

    #[serde(default)]
    pub shading: ShadingConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> VerifyResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `modgate.toml` from the project root, or defaults
    pub fn load_or_default(project_root: &Path) -> VerifyResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(project_root)
    }

    /// Resolve the report directory against the project root
    pub fn report_dir(&self, project_root: &Path) -> PathBuf {
        if self.report.dir.is_absolute() {
            self.report.dir.clone()
        } else {
            project_root.join(&self.report.dir)
        }
    }

    /// Compile every convention rule pattern
    pub fn compiled_conventions(&self) -> VerifyResult<Vec<(ConventionRule, Regex)>> {
        self.conventions
            .rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|re| (rule.clone(), re))
                    .map_err(|source| VerifyError::InvalidPattern {
                        rule: rule.id.clone(),
                        pattern: rule.pattern.clone(),
                        source,
                    })
            })
            .collect()
    }

    /// Reject configuration that cannot be applied
    pub fn validate(&self) -> VerifyResult<()> {
        self.compiled_conventions()?;
        Ok(())
    }
}
