//! Stack catalog command

use super::Settings;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_violation, OutputFormat};
use serde::Serialize;
use stackdef_interpreter::{CatalogEntry, ComponentCategory, StackCatalog};
use std::path::PathBuf;
use tabled::Tabled;

/// Table row for catalog display
#[derive(Debug, Serialize, Tabled)]
struct ServiceRow {
    name: String,
    version: String,
    masters: usize,
    slaves: usize,
    clients: usize,
    requires: String,
    path: String,
}

impl From<&CatalogEntry> for ServiceRow {
    fn from(entry: &CatalogEntry) -> Self {
        let model = &entry.model;
        let count = |category| model.components_by_category(category).count();
        Self {
            name: model.name().to_string(),
            version: model.descriptor().version.clone(),
            masters: count(ComponentCategory::Master),
            slaves: count(ComponentCategory::Slave),
            clients: count(ComponentCategory::Client),
            requires: model.descriptor().required_services.join(", "),
            path: entry.path.display().to_string(),
        }
    }
}

/// Execute the catalog command
pub fn execute(root: Option<PathBuf>, settings: &Settings, format: OutputFormat) -> CliResult<()> {
    let root = match root {
        Some(root) => root,
        None => settings.require_stack_location()?.to_path_buf(),
    };
    let catalog = StackCatalog::load(&root)?;

    let rows: Vec<ServiceRow> = catalog.entries().map(ServiceRow::from).collect();
    output::print_output(rows, format)?;

    let report = catalog.validate_cross_references();
    report.violations.iter().for_each(print_violation);
    if report.is_valid() {
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            errors: report.error_count(),
            warnings: report.warning_count(),
        })
    }
}
