//! Concrete document syntaxes
//!
//! The parser works on a generic attribute tree. Each format only has to
//! decode text into that tree and encode a descriptor back into text.

use crate::error::{DescriptorError, Result};
use serde_json::Value;
use stackdef_types::ServiceDescriptor;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported descriptor syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorFormat {
    Yaml,
    Json,
    Toml,
}

impl DescriptorFormat {
    pub const ALL: [DescriptorFormat; 3] = [
        DescriptorFormat::Yaml,
        DescriptorFormat::Json,
        DescriptorFormat::Toml,
    ];

    /// File extensions recognised for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            DescriptorFormat::Yaml => &["yaml", "yml"],
            DescriptorFormat::Json => &["json"],
            DescriptorFormat::Toml => &["toml"],
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }

    /// Pick the format from a file's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| DescriptorError::UnsupportedFormat(path.display().to_string()))
    }

    /// Decode text into an attribute tree
    pub fn decode(&self, content: &str) -> Result<Value> {
        let decoded = match self {
            DescriptorFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
            DescriptorFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
            DescriptorFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        };
        decoded.map_err(|reason| {
            DescriptorError::malformed("<root>", format!("not valid {}: {}", self, reason))
        })
    }

    /// Encode a descriptor in this format
    pub fn encode(&self, descriptor: &ServiceDescriptor) -> Result<String> {
        let encoded = match self {
            DescriptorFormat::Yaml => serde_yaml::to_string(descriptor).map_err(|e| e.to_string()),
            DescriptorFormat::Json => {
                serde_json::to_string_pretty(descriptor).map_err(|e| e.to_string())
            }
            DescriptorFormat::Toml => toml::to_string_pretty(descriptor).map_err(|e| e.to_string()),
        };
        encoded.map_err(|reason| DescriptorError::Encode {
            format: *self,
            reason,
        })
    }
}

impl FromStr for DescriptorFormat {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_extension(s.trim()).ok_or_else(|| DescriptorError::UnsupportedFormat(s.to_string()))
    }
}

impl fmt::Display for DescriptorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DescriptorFormat::Yaml => f.write_str("yaml"),
            DescriptorFormat::Json => f.write_str("json"),
            DescriptorFormat::Toml => f.write_str("toml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            DescriptorFormat::from_path(Path::new("LOGSEARCH/service.yml")).unwrap(),
            DescriptorFormat::Yaml
        );
        assert_eq!(
            DescriptorFormat::from_path(Path::new("service.JSON")).unwrap(),
            DescriptorFormat::Json
        );
        assert!(matches!(
            DescriptorFormat::from_path(Path::new("metainfo.xml")),
            Err(DescriptorError::UnsupportedFormat(_))
        ));
        assert!(DescriptorFormat::from_path(Path::new("service")).is_err());
    }

    #[test]
    fn test_decode_failure_is_malformed() {
        let err = DescriptorFormat::Json.decode("{ not json").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_same_tree_from_every_syntax() {
        let yaml = "name: LOGSEARCH\nversion: 0.5.0\n";
        let json = r#"{"name": "LOGSEARCH", "version": "0.5.0"}"#;
        let toml = "name = \"LOGSEARCH\"\nversion = \"0.5.0\"\n";
        let a = DescriptorFormat::Yaml.decode(yaml).unwrap();
        let b = DescriptorFormat::Json.decode(json).unwrap();
        let c = DescriptorFormat::Toml.decode(toml).unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }
}
