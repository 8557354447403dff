//! Configuration module for modgate
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (MODGATE_*)
//! 3. Project config (modgate.toml in the project root)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{with_env_overrides, ConfigWarning, CONFIG_FILE_NAME};
pub use types::{
    BoundaryConfig, Config, ConventionsConfig, DescriptorConfig, LayoutConfig, ReportConfig,
    SchedulerConfig, ShadingConfig,
};
