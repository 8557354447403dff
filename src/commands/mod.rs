//! Command handlers

pub mod modules;
pub mod verify;

use std::path::Path;

use anyhow::{Context, Result};
use modgate::config::with_env_overrides;
use modgate::{Config, ConfigWarning};

use crate::ui::json::emit_event;
use crate::ui::json::events::ConfigWarningEvent;

/// Load the explicit `--config` file, or `modgate.toml` from the project root.
pub(crate) fn load_config(
    project: &Path,
    explicit: Option<&Path>,
) -> Result<(Config, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            Ok((with_env_overrides(config), warnings))
        }
        None => Config::load_or_default(project)
            .with_context(|| format!("failed to load configuration for {}", project.display())),
    }
}

/// Print config warnings in the active output mode.
pub(crate) fn report_config_warnings(warnings: &[ConfigWarning], json: bool) {
    for warning in warnings {
        if json {
            let _ = emit_event(&ConfigWarningEvent::from(warning));
            continue;
        }
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        match &warning.suggestion {
            Some(suggestion) => eprintln!(
                "warning: unknown config key '{}' at {} (did you mean '{}'?)",
                warning.key, location, suggestion
            ),
            None => eprintln!("warning: unknown config key '{}' at {}", warning.key, location),
        }
    }
}
