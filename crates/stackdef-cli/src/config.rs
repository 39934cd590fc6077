//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Directory holding one sub-directory per service descriptor
    pub stack_location: Option<PathBuf>,

    /// OS family used for package queries when the host cannot be detected
    pub default_os_family: Option<String>,

    /// Treat validation warnings as failures
    #[serde(default)]
    pub deny_warnings: bool,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig = toml::from_str(&contents)
                .map_err(|e| CliError::Config(format!("{}: {}", config_path.display(), e)))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("stackdef").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.stack_location.is_none());
        assert!(config.default_os_family.is_none());
        assert!(!config.deny_warnings);
    }

    #[test]
    fn test_load_missing_config() {
        let config = CliConfig::load(Some("/nonexistent/path/config.toml")).unwrap();
        assert!(config.stack_location.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "stack_location = \"/var/lib/stacks/HDP/2.6/services\"\n\
             default_os_family = \"redhat7\"\n\
             deny_warnings = true\n",
        )
        .unwrap();

        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(
            config.stack_location,
            Some(PathBuf::from("/var/lib/stacks/HDP/2.6/services"))
        );
        assert_eq!(config.default_os_family.as_deref(), Some("redhat7"));
        assert!(config.deny_warnings);
    }

    #[test]
    fn test_bad_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "deny_warnings = \"sometimes\"\n").unwrap();
        assert!(matches!(
            CliConfig::load(path.to_str()),
            Err(CliError::Config(_))
        ));
    }
}
