//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use stackdef_interpreter::{Severity, Violation};
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                println!("{}", Table::new(data));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&data)?),
    }
    Ok(())
}

/// Print a single item in the specified format
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?)
        }
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(data)?),
    }
    Ok(())
}

/// Outcome marker for a status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Failed,
    Warning,
    Note,
}

impl From<Severity> for Status {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Status::Failed,
            Severity::Warning => Status::Warning,
        }
    }
}

/// Print a marked status line; failures go to stderr
pub fn print_status(status: Status, message: &str) {
    match status {
        Status::Ok => println!("{} {}", "✓".green(), message),
        Status::Failed => eprintln!("{} {}", "✗".red(), message),
        Status::Warning => println!("{} {}", "⚠".yellow(), message),
        Status::Note => println!("{} {}", "ℹ".blue(), message),
    }
}

/// Print one validation finding, marked by severity
pub fn print_violation(violation: &Violation) {
    print_status(
        violation.severity.into(),
        &format!("[{}] {}: {}", violation.code, violation.path, violation.message),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        let format = OutputFormat::default();
        assert!(matches!(format, OutputFormat::Table));
    }

    #[derive(Serialize, Tabled)]
    struct Row {
        name: String,
    }

    #[test]
    fn test_status_from_severity() {
        assert_eq!(Status::from(Severity::Error), Status::Failed);
        assert_eq!(Status::from(Severity::Warning), Status::Warning);
    }

    #[test]
    fn test_print_output_formats() {
        for format in [OutputFormat::Table, OutputFormat::Json, OutputFormat::Yaml] {
            let rows = vec![Row {
                name: "LOGSEARCH".into(),
            }];
            assert!(print_output(rows, format).is_ok());
            assert!(print_output(Vec::<Row>::new(), format).is_ok());
        }
    }
}
