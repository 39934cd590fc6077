//! Components and everything hanging off them

use crate::cardinality::Cardinality;
use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// An installable unit of a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Component name, unique within its service (e.g. `LOGSEARCH_SERVER`)
    pub name: String,

    /// Human-readable name
    pub display_name: String,

    /// Role of the component in the cluster
    pub category: ComponentCategory,

    /// Allowed instance count
    pub cardinality: Cardinality,

    /// Lifecycle script run by the installer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_script: Option<CommandScript>,

    /// Log files produced by this component
    #[serde(default)]
    pub logs: Vec<LogDefinition>,

    /// Components that must be present for this one to work
    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    /// Configuration bundles this component reads
    #[serde(default)]
    pub config_dependencies: Vec<String>,
}

impl Component {
    /// Create a component with no script, logs or dependencies
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        category: ComponentCategory,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            category,
            cardinality,
            command_script: None,
            logs: Vec::new(),
            dependencies: Vec::new(),
            config_dependencies: Vec::new(),
        }
    }

    /// First log marked primary
    pub fn primary_log(&self) -> Option<&LogDefinition> {
        self.logs.iter().find(|log| log.primary)
    }
}

/// Role of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentCategory {
    /// Central service process, usually few instances
    Master,
    /// Per-host agent or worker
    Slave,
    /// Client libraries and configuration only, no daemon
    Client,
}

impl ComponentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentCategory::Master => "MASTER",
            ComponentCategory::Slave => "SLAVE",
            ComponentCategory::Client => "CLIENT",
        }
    }
}

impl FromStr for ComponentCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "MASTER" => Ok(ComponentCategory::Master),
            "SLAVE" => Ok(ComponentCategory::Slave),
            "CLIENT" => Ok(ComponentCategory::Client),
            other => Err(ModelError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle script reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandScript {
    /// Script path, relative to the service package
    pub script: String,

    /// Interpreter used to run the script
    pub script_type: ScriptType,

    /// Maximum run time of one command
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

/// Script interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptType {
    Python,
}

impl FromStr for ScriptType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "PYTHON" => Ok(ScriptType::Python),
            other => Err(ModelError::UnknownScriptType(other.to_string())),
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptType::Python => f.write_str("PYTHON"),
        }
    }
}

/// A log file the monitoring layer may tail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogDefinition {
    pub log_id: String,

    #[serde(default)]
    pub primary: bool,
}

/// Dependency of one component on another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    /// Target component
    pub name: ComponentRef,

    /// Where the target must be present
    pub scope: DependencyScope,

    /// Whether the orchestrator installs the target automatically
    #[serde(default)]
    pub auto_deploy: bool,
}

/// Placement requirement of a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    /// Target must run on the same host
    Host,
    /// Target must run somewhere in the cluster
    Cluster,
}

impl FromStr for DependencyScope {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "host" => Ok(DependencyScope::Host),
            "cluster" => Ok(DependencyScope::Cluster),
            other => Err(ModelError::UnknownScope(other.to_string())),
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyScope::Host => f.write_str("host"),
            DependencyScope::Cluster => f.write_str("cluster"),
        }
    }
}

/// Reference to a component, written `COMPONENT` or `SERVICE/COMPONENT`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentRef {
    pub service: Option<String>,
    pub component: String,
}

impl ComponentRef {
    pub fn new(service: Option<&str>, component: impl Into<String>) -> Self {
        Self {
            service: service.map(str::to_string),
            component: component.into(),
        }
    }

    /// True when this reference points into `service_name` itself
    pub fn is_local_to(&self, service_name: &str) -> bool {
        self.service.as_deref().map_or(true, |s| s == service_name)
    }
}

fn is_ref_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl FromStr for ComponentRef {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || ModelError::InvalidComponentRef(s.to_string());
        match s.split_once('/') {
            Some((service, component)) => {
                if !is_ref_segment(service) || !is_ref_segment(component) {
                    return Err(invalid());
                }
                Ok(ComponentRef::new(Some(service), component))
            }
            None if is_ref_segment(s) => Ok(ComponentRef::new(None, s)),
            None => Err(invalid()),
        }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.service {
            Some(service) => write!(f, "{}/{}", service, self.component),
            None => f.write_str(&self.component),
        }
    }
}

impl TryFrom<String> for ComponentRef {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ComponentRef> for String {
    fn from(value: ComponentRef) -> Self {
        value.to_string()
    }
}

/// Serde helper for timeouts expressed in whole seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
