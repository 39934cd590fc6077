//! Service descriptors
//!
//! A `ServiceDescriptor` is the root of the document. It is built once per
//! load and never mutated afterwards; reloading means building a new one.

use crate::component::{CommandScript, Component};
use crate::os::OsSpecific;
use serde::{Deserialize, Serialize};

/// Root of a service-definition document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    /// Service name (e.g. `LOGSEARCH`)
    pub name: String,

    /// Human-readable name
    pub display_name: String,

    /// Free-form description shown by the UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Service version as published by the stack
    pub version: String,

    /// Credential store policy
    #[serde(default)]
    pub credential_store: CredentialStorePolicy,

    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub os_specifics: Vec<OsSpecific>,

    /// Service-level configuration bundles
    #[serde(default)]
    pub config_dependencies: Vec<String>,

    /// Quick-link configuration files for the UI
    #[serde(default)]
    pub quick_links: Vec<FileReference>,

    /// Theme files for the UI
    #[serde(default)]
    pub themes: Vec<FileReference>,

    /// Script run for the service check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_check: Option<CommandScript>,

    /// Other services that must be installed first
    #[serde(default)]
    pub required_services: Vec<String>,

    #[serde(default)]
    pub restart_required_after_change: bool,
}

impl ServiceDescriptor {
    /// Create an empty descriptor
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            comment: None,
            version: version.into(),
            credential_store: CredentialStorePolicy::default(),
            components: Vec::new(),
            os_specifics: Vec::new(),
            config_dependencies: Vec::new(),
            quick_links: Vec::new(),
            themes: Vec::new(),
            service_check: None,
            required_services: Vec::new(),
            restart_required_after_change: false,
        }
    }

    /// Look up a component by name
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }
}

/// Whether the service may, does, and must keep secrets in the credential store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialStorePolicy {
    #[serde(default)]
    pub supported: bool,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub required: bool,
}

/// A UI file shipped with the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub file_name: String,

    #[serde(default)]
    pub default: bool,
}

impl FileReference {
    pub fn new(file_name: impl Into<String>, default: bool) -> Self {
        Self {
            file_name: file_name.into(),
            default,
        }
    }
}
