//! Config type listing command

use super::Settings;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};
use serde::Serialize;
use stackdef_interpreter::load_file;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct ConfigTypeRow {
    config_type: String,
    /// `component` or `service`
    source: &'static str,
}

/// Execute the config-types command
///
/// Without `--merged` only the component's own config types are listed.
pub fn execute(
    target: &str,
    component: &str,
    merged: bool,
    settings: &Settings,
    format: OutputFormat,
) -> CliResult<()> {
    let model = load_file(settings.locate(target)?)?;
    let own = model.config_types(component)?;

    let listed = if merged {
        model.merged_config_types(component)?
    } else {
        own.clone()
    };
    let rows: Vec<ConfigTypeRow> = listed
        .into_iter()
        .map(|config_type| ConfigTypeRow {
            source: if own.contains(&config_type) {
                "component"
            } else {
                "service"
            },
            config_type: config_type.to_string(),
        })
        .collect();

    output::print_output(rows, format)
}
