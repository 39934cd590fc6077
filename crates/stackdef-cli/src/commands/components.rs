//! Component listing command

use super::Settings;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use stackdef_interpreter::{load_file, Component, ComponentCategory};
use tabled::Tabled;

/// Table row for component display
#[derive(Debug, Serialize, Tabled)]
struct ComponentRow {
    /// Component name
    name: String,
    /// Category
    category: String,
    /// Instance constraint
    cardinality: String,
    /// Command script and timeout
    script: String,
    /// Primary log id
    primary_log: String,
    /// Dependency targets; `*` marks auto-deploy
    dependencies: String,
}

impl From<&Component> for ComponentRow {
    fn from(component: &Component) -> Self {
        Self {
            name: component.name.clone(),
            category: component.category.to_string(),
            cardinality: component.cardinality.to_string(),
            script: component
                .command_script
                .as_ref()
                .map(|s| format!("{} ({}s)", s.script, s.timeout.as_secs()))
                .unwrap_or_else(|| "-".into()),
            primary_log: component
                .primary_log()
                .map(|log| log.log_id.clone())
                .unwrap_or_else(|| "-".into()),
            dependencies: component
                .dependencies
                .iter()
                .map(|d| {
                    let marker = if d.auto_deploy { "*" } else { "" };
                    format!("{}{} ({})", d.name, marker, d.scope)
                })
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Execute the components command
pub fn execute(
    target: &str,
    category: Option<ComponentCategory>,
    settings: &Settings,
    format: OutputFormat,
) -> CliResult<()> {
    let model = load_file(settings.locate(target)?)?;
    let rows: Vec<ComponentRow> = model
        .components()
        .iter()
        .filter(|c| category.map_or(true, |wanted| c.category == wanted))
        .map(ComponentRow::from)
        .collect();
    output::print_output(rows, format)
}
