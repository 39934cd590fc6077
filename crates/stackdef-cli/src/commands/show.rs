//! Descriptor summary command

use super::Settings;
use crate::error::CliResult;
use crate::output::{self, print_violation, OutputFormat};
use colored::*;
use stackdef_interpreter::load_file;

/// Execute the show command
pub fn execute(target: &str, settings: &Settings, format: OutputFormat) -> CliResult<()> {
    let model = load_file(settings.locate(target)?)?;
    let descriptor = model.descriptor();

    if !matches!(format, OutputFormat::Table) {
        return output::print_single(descriptor, format);
    }

    println!("{} {}", "Service:".bold(), descriptor.name);
    println!("  Display name:  {}", descriptor.display_name);
    println!("  Version:       {}", descriptor.version);
    if let Some(comment) = &descriptor.comment {
        println!("  Comment:       {}", comment);
    }
    let store = descriptor.credential_store;
    println!(
        "  Credentials:   supported={} enabled={} required={}",
        store.supported, store.enabled, store.required
    );
    if !descriptor.required_services.is_empty() {
        println!("  Requires:      {}", descriptor.required_services.join(", "));
    }
    if let Some(check) = &descriptor.service_check {
        println!(
            "  Service check: {} ({}s)",
            check.script,
            check.timeout.as_secs()
        );
    }
    if let Some(links) = model.default_quick_links() {
        println!("  Quick links:   {}", links.file_name);
    }
    if let Some(theme) = model.default_theme() {
        println!("  Theme:         {}", theme.file_name);
    }
    println!(
        "  Components:    {}",
        model
            .components()
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    for block in &descriptor.os_specifics {
        println!(
            "  OS [{}]: {} package(s)",
            block.os_family,
            block.packages.len()
        );
    }

    model.warnings().iter().for_each(print_violation);
    Ok(())
}
