//! Interpreter error types

use crate::format::DescriptorFormat;
use crate::validation::ValidationReport;
use std::path::PathBuf;
use thiserror::Error;

/// Interpreter errors
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// Input could not be turned into a descriptor; aborts the load
    #[error("Malformed descriptor at {path}: {reason}")]
    MalformedDescriptor { path: String, reason: String },

    /// Descriptor parsed but broke one or more invariants
    #[error("Descriptor '{service}' failed validation: {report}")]
    Validation {
        service: String,
        report: ValidationReport,
    },

    #[error("Unknown component '{component}' in service '{service}'")]
    UnknownComponent { service: String, component: String },

    #[error("Unsupported descriptor format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode descriptor as {format}: {reason}")]
    Encode {
        format: DescriptorFormat,
        reason: String,
    },

    #[error("Duplicate service '{name}' in catalog: {} and {}", .first.display(), .second.display())]
    DuplicateService {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<DescriptorError>,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DescriptorError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        DescriptorError::MalformedDescriptor {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        DescriptorError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with file context stripped
    pub fn root_cause(&self) -> &DescriptorError {
        match self {
            DescriptorError::InFile { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.root_cause(), DescriptorError::MalformedDescriptor { .. })
    }

    /// Validation report, if this error carries one
    pub fn report(&self) -> Option<&ValidationReport> {
        match self.root_cause() {
            DescriptorError::Validation { report, .. } => Some(report),
            _ => None,
        }
    }
}

/// Result type for interpreter operations
pub type Result<T> = std::result::Result<T, DescriptorError>;
