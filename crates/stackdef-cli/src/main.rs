//! stackdef CLI - Command-line interface for service descriptors
//!
//! This CLI lets stack authors and operators:
//! - Validate descriptors and whole stack locations
//! - Inspect components, config types and OS packages
//! - Convert descriptors between YAML, JSON and TOML

use clap::{Parser, Subcommand};
use stackdef_interpreter::{ComponentCategory, DescriptorFormat};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::{catalog, components, config_types, convert, packages, show, validate, Settings};
use config::CliConfig;
use error::CliResult;

/// stackdef CLI application
#[derive(Parser)]
#[command(name = "stackdef")]
#[command(about = "stackdef - Service descriptor interpreter CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STACKDEF_CONFIG", global = true)]
    config: Option<String>,

    /// Directory holding one sub-directory per service
    #[arg(short, long, env = "STACKDEF_STACK_LOCATION", global = true)]
    stack_location: Option<PathBuf>,

    /// OS family for package queries (e.g. redhat7, ubuntu16)
    #[arg(long, env = "STACKDEF_OS_FAMILY", global = true)]
    os_family: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Validate descriptors and report every violation
    Validate(validate::ValidateArgs),

    /// Summarize a descriptor
    Show {
        /// Descriptor file or service name
        target: String,
    },

    /// Re-encode a descriptor in another format
    Convert {
        /// Descriptor file or service name
        target: String,

        /// Target format (yaml, json, toml)
        #[arg(short, long)]
        to: DescriptorFormat,

        /// Write to a file instead of stdout
        #[arg(long = "out")]
        out: Option<PathBuf>,
    },

    /// List components
    Components {
        /// Descriptor file or service name
        target: String,

        /// Only list this category (MASTER, SLAVE, CLIENT)
        #[arg(long)]
        category: Option<ComponentCategory>,
    },

    /// List the config types a component depends on
    ConfigTypes {
        /// Descriptor file or service name
        target: String,

        /// Component name
        component: String,

        /// Include service-level config types
        #[arg(long)]
        merged: bool,
    },

    /// List OS packages for a host family
    Packages(packages::PackagesArgs),

    /// List the services under a stack location and check cross references
    Catalog {
        /// Stack location (defaults to the configured one)
        root: Option<PathBuf>,
    },

    /// Show configuration
    Config,
}

fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let settings = Settings::new(&config, cli.stack_location, cli.os_family);
    let format = cli.output;

    match cli.command {
        Commands::Validate(args) => validate::execute(args, &settings, format),
        Commands::Show { target } => show::execute(&target, &settings, format),
        Commands::Convert { target, to, out } => convert::execute(&target, to, out, &settings),
        Commands::Components { target, category } => {
            components::execute(&target, category, &settings, format)
        }
        Commands::ConfigTypes {
            target,
            component,
            merged,
        } => config_types::execute(&target, &component, merged, &settings, format),
        Commands::Packages(args) => packages::execute(args, &settings, format),
        Commands::Catalog { root } => catalog::execute(root, &settings, format),
        Commands::Config => match format {
            output::OutputFormat::Table => {
                let unset = || "(unset)".to_string();
                let location = settings.stack_location.as_ref();
                println!(
                    "Stack location: {}",
                    location.map_or_else(unset, |p| p.display().to_string())
                );
                println!(
                    "OS family:      {}",
                    settings.os_family.clone().unwrap_or_else(unset)
                );
                println!("Deny warnings:  {}", settings.deny_warnings);
                Ok(())
            }
            _ => output::print_single(&settings, format),
        },
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = run(cli) {
        output::print_status(output::Status::Failed, &e.to_string());
        std::process::exit(1);
    }
}
