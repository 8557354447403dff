//! Modules command handler
//!
//! Prints the discovered module graph without running any pass.

use std::path::Path;

use anyhow::Result;
use modgate::ModuleGraph;

use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, ModuleEvent, StartEvent};

use super::{load_config, report_config_warnings};

fn flag(present: bool, label: &str) -> String {
    if present {
        label.to_string()
    } else {
        "-".repeat(label.len())
    }
}

pub fn cmd_modules(project: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    if json {
        emit_event(&StartEvent::new("modules"))?;
    }

    let (config, warnings) = load_config(project, config_path)?;
    report_config_warnings(&warnings, json);

    let graph = ModuleGraph::discover(project, &config)?;

    if json {
        for module in graph.modules() {
            emit_event(&ModuleEvent::from(module))?;
        }
        emit_event(&CompleteEvent::new("modules", true))?;
        return Ok(());
    }

    println!("Modules in {} ({}):", graph.root().display(), graph.len());
    let width = graph.modules().map(|m| m.name().len()).max().unwrap_or(0);
    for module in graph.modules() {
        let mut line = format!(
            "  {:<width$}  {} {} {} {}",
            module.name(),
            flag(module.has_source_tree(), "src"),
            flag(module.has_descriptor(), "descriptor"),
            flag(module.has_build_declaration(), "build"),
            flag(module.is_shaded(), "shaded"),
            width = width
        );
        if let Some(name) = module.archive_base_name() {
            line.push_str(&format!("  archive={}", name));
        }
        let relocations = module.declared_relocations().len();
        if relocations > 0 {
            line.push_str(&format!("  relocations={}", relocations));
        }
        println!("{}", line);
    }
    Ok(())
}
