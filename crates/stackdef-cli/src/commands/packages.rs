//! Package query command

use super::Settings;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_status, OutputFormat, Status};
use clap::Args;
use serde::Serialize;
use stackdef_interpreter::{detect_os_family, load_file, Package};
use std::collections::HashMap;
use tabled::Tabled;

#[derive(Args)]
pub struct PackagesArgs {
    /// Descriptor file or service name
    pub target: String,

    /// Install conditions that hold on the host (repeatable); others are false
    #[arg(short = 'w', long = "with")]
    pub conditions: Vec<String>,

    /// Only list packages whose install condition holds
    #[arg(long, conflicts_with = "upgradable")]
    pub installable: bool,

    /// Only list packages that take part in stack upgrades
    #[arg(long)]
    pub upgradable: bool,
}

/// Table row for package display
#[derive(Debug, Serialize, Tabled)]
struct PackageRow {
    /// Package name
    name: String,
    /// Upgrade handling
    skip_upgrade: bool,
    /// Install condition, if any
    condition: String,
}

impl From<&Package> for PackageRow {
    fn from(package: &Package) -> Self {
        Self {
            name: package.name.clone(),
            skip_upgrade: package.skip_upgrade,
            condition: package.condition.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

/// Execute the packages command
///
/// The OS family comes from `--os-family`, then the config file, then the
/// host's os-release.
pub fn execute(args: PackagesArgs, settings: &Settings, format: OutputFormat) -> CliResult<()> {
    let family = settings
        .os_family
        .clone()
        .or_else(detect_os_family)
        .ok_or_else(|| {
            CliError::InvalidInput(
                "Cannot determine the OS family; pass --os-family (e.g. redhat7)".into(),
            )
        })?;
    let model = load_file(settings.locate(&args.target)?)?;

    let conditions: HashMap<String, bool> = args
        .conditions
        .into_iter()
        .map(|name| (name, true))
        .collect();

    let packages: Vec<&Package> = if args.installable {
        model.installable_packages(&family, &conditions)
    } else if args.upgradable {
        model.upgradable_packages(&family)
    } else {
        model
            .packages_for_os(&family)
            .unwrap_or_default()
            .iter()
            .collect()
    };

    if matches!(format, OutputFormat::Table) {
        print_status(
            Status::Note,
            &format!("{} packages for {}", model.name(), family),
        );
    }
    output::print_output(packages.into_iter().map(PackageRow::from).collect(), format)
}
