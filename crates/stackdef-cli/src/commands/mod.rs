//! CLI command implementations

pub mod catalog;
pub mod components;
pub mod config_types;
pub mod convert;
pub mod packages;
pub mod show;
pub mod validate;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use serde::Serialize;
use stackdef_interpreter::{DescriptorFormat, DESCRIPTOR_FILE_STEM};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings shared by every command, after merging flags, environment and
/// the config file
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub stack_location: Option<PathBuf>,
    pub os_family: Option<String>,
    pub deny_warnings: bool,
}

impl Settings {
    pub fn new(
        config: &CliConfig,
        stack_location: Option<PathBuf>,
        os_family: Option<String>,
    ) -> Self {
        Self {
            stack_location: stack_location.or_else(|| config.stack_location.clone()),
            os_family: os_family.or_else(|| config.default_os_family.clone()),
            deny_warnings: config.deny_warnings,
        }
    }

    pub fn require_stack_location(&self) -> CliResult<&Path> {
        self.stack_location.as_deref().ok_or_else(|| {
            CliError::Config(
                "No stack location; pass --stack-location or set stack_location in the config file"
                    .into(),
            )
        })
    }

    /// Resolve a descriptor argument
    ///
    /// An existing path is used as is. Otherwise the argument is taken as a
    /// service name and looked up as `<stack location>/<NAME>/service.<ext>`.
    pub fn locate(&self, target: &str) -> CliResult<PathBuf> {
        let path = PathBuf::from(target);
        if path.exists() {
            return Ok(path);
        }

        if let Some(root) = &self.stack_location {
            let dir = root.join(target);
            for format in DescriptorFormat::ALL {
                for ext in format.extensions() {
                    let candidate = dir.join(format!("{}.{}", DESCRIPTOR_FILE_STEM, ext));
                    if candidate.is_file() {
                        debug!(service = %target, path = %candidate.display(), "Resolved service");
                        return Ok(candidate);
                    }
                }
            }
        }

        Err(CliError::InvalidInput(format!(
            "'{}' is neither a descriptor file nor a service in the stack location",
            target
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig {
            stack_location: Some(PathBuf::from("/from/config")),
            default_os_family: Some("redhat7".into()),
            deny_warnings: true,
        };
        let settings = Settings::new(&config, None, Some("ubuntu16".into()));
        assert_eq!(settings.stack_location, Some(PathBuf::from("/from/config")));
        assert_eq!(settings.os_family.as_deref(), Some("ubuntu16"));
        assert!(settings.deny_warnings);
    }

    #[test]
    fn test_locate_by_service_name() {
        let dir = TempDir::new().unwrap();
        let service_dir = dir.path().join("LOGSEARCH");
        std::fs::create_dir_all(&service_dir).unwrap();
        std::fs::write(service_dir.join("service.json"), "{}").unwrap();

        let settings = Settings::new(&CliConfig::default(), Some(dir.path().to_path_buf()), None);
        assert_eq!(
            settings.locate("LOGSEARCH").unwrap(),
            service_dir.join("service.json")
        );
        assert!(matches!(
            settings.locate("KAFKA"),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_stack_location() {
        let settings = Settings::new(&CliConfig::default(), None, None);
        assert!(settings.require_stack_location().is_err());
    }
}
