//! Descriptor validation command

use super::Settings;
use crate::error::{CliError, CliResult};
use crate::output::{self, print_status, print_violation, OutputFormat, Status};
use clap::Args;
use serde::Serialize;
use stackdef_interpreter::{
    descriptor_files, read_descriptor, validate, StackCatalog, ValidationReport, Violation,
};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ValidateArgs {
    /// Descriptor files, service names or stack directories
    /// (defaults to the stack location)
    pub targets: Vec<String>,

    /// Fail when warnings are found
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Validation outcome for one file, or for a directory's cross references
#[derive(Debug, Serialize)]
struct FileReport {
    path: PathBuf,
    service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
    violations: Vec<Violation>,
}

impl FileReport {
    fn error_count(&self) -> usize {
        usize::from(self.failure.is_some()) + self.violations.iter().filter(|v| v.is_error()).count()
    }

    fn warning_count(&self) -> usize {
        self.violations.iter().filter(|v| !v.is_error()).count()
    }
}

fn check_file(path: &Path) -> FileReport {
    match read_descriptor(path) {
        Ok(descriptor) => FileReport {
            path: path.to_path_buf(),
            violations: validate(&descriptor).violations,
            service: Some(descriptor.name),
            failure: None,
        },
        Err(e) => FileReport {
            path: path.to_path_buf(),
            service: None,
            failure: Some(e.root_cause().to_string()),
            violations: Vec::new(),
        },
    }
}

/// Per-file reports for a stack directory, plus cross references when every
/// file is individually valid
fn check_directory(root: &Path) -> CliResult<Vec<FileReport>> {
    let mut reports: Vec<FileReport> = descriptor_files(root)?
        .iter()
        .map(|path| check_file(path))
        .collect();

    if reports.iter().all(|report| report.error_count() == 0) {
        let cross: ValidationReport = match StackCatalog::load(root) {
            Ok(catalog) => catalog.validate_cross_references(),
            Err(e) => {
                reports.push(FileReport {
                    path: root.to_path_buf(),
                    service: None,
                    failure: Some(e.to_string()),
                    violations: Vec::new(),
                });
                return Ok(reports);
            }
        };
        if !cross.violations.is_empty() {
            reports.push(FileReport {
                path: root.to_path_buf(),
                service: None,
                failure: None,
                violations: cross.violations,
            });
        }
    }

    Ok(reports)
}

fn print_report(report: &FileReport) {
    let label = match &report.service {
        Some(service) => format!("{} ({})", report.path.display(), service),
        None => report.path.display().to_string(),
    };

    if let Some(failure) = &report.failure {
        print_status(Status::Failed, &format!("{}: {}", label, failure));
        return;
    }
    if report.violations.is_empty() {
        print_status(Status::Ok, &label);
        return;
    }

    print_status(
        Status::Note,
        &format!(
            "{}: {} error(s), {} warning(s)",
            label,
            report.error_count(),
            report.warning_count()
        ),
    );
    for violation in &report.violations {
        print_violation(violation);
    }
}

/// Execute the validate command
pub fn execute(args: ValidateArgs, settings: &Settings, format: OutputFormat) -> CliResult<()> {
    let mut reports = Vec::new();

    if args.targets.is_empty() {
        reports.extend(check_directory(settings.require_stack_location()?)?);
    }
    for target in &args.targets {
        let path = settings.locate(target)?;
        if path.is_dir() {
            reports.extend(check_directory(&path)?);
        } else {
            reports.push(check_file(&path));
        }
    }

    if reports.is_empty() {
        return Err(CliError::InvalidInput("No descriptor files found".into()));
    }

    match format {
        OutputFormat::Table => reports.iter().for_each(print_report),
        _ => output::print_single(&reports, format)?,
    }

    let errors: usize = reports.iter().map(FileReport::error_count).sum();
    let warnings: usize = reports.iter().map(FileReport::warning_count).sum();
    let deny_warnings = args.deny_warnings || settings.deny_warnings;

    if errors > 0 || (deny_warnings && warnings > 0) {
        Err(CliError::ValidationFailed { errors, warnings })
    } else {
        Ok(())
    }
}
