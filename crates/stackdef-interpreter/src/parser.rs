//! Descriptor parser
//!
//! Turns an attribute tree into a [`ServiceDescriptor`]. Every failure is a
//! `MalformedDescriptor` naming the offending path, e.g.
//! `components[1].cardinality`.
//!
//! Descriptors often start life as tag trees in which every leaf is text, so
//! the parser is lenient about leaf encoding:
//!
//! - booleans may be `true`/`false` or the strings `"true"`/`"false"`
//! - integers may be numbers or decimal strings
//! - a list may be written directly, or wrapped in a single-key object
//!   (`logs: { log: [...] }`), and a one-element list may be the element itself
//!   (`logs: { logId: app }`, `configDependencies: logfeeder-env`)
//!
//! The root may also be wrapped as `{ service: {...} }`.

use crate::error::{DescriptorError, Result};
use serde_json::{Map, Value};
use stackdef_types::{
    CommandScript, Component, ComponentCategory, CredentialStorePolicy, Dependency,
    DependencyScope, FileReference, LogDefinition, ModelError, OsFamilySet, OsSpecific, Package,
    ScriptType, ServiceDescriptor,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Timeout applied when a command script does not declare one
pub const DEFAULT_SCRIPT_TIMEOUT: Duration = Duration::from_secs(900);

const SERVICE_KEYS: &[&str] = &[
    "name",
    "displayName",
    "comment",
    "version",
    "credentialStore",
    "components",
    "osSpecifics",
    "configDependencies",
    "quickLinks",
    "themes",
    "serviceCheck",
    "requiredServices",
    "restartRequiredAfterChange",
];

const COMPONENT_KEYS: &[&str] = &[
    "name",
    "displayName",
    "category",
    "cardinality",
    "commandScript",
    "logs",
    "dependencies",
    "configDependencies",
];

const SCRIPT_KEYS: &[&str] = &["script", "scriptType", "timeout"];
const LOG_KEYS: &[&str] = &["logId", "primary"];
const DEPENDENCY_KEYS: &[&str] = &["name", "scope", "autoDeploy"];
const OS_SPECIFIC_KEYS: &[&str] = &["osFamily", "packages"];
const PACKAGE_KEYS: &[&str] = &["name", "skipUpgrade", "condition"];
const FILE_REFERENCE_KEYS: &[&str] = &["fileName", "default"];

/// Parse an attribute tree into a descriptor
pub fn parse_descriptor(tree: &Value) -> Result<ServiceDescriptor> {
    let root = Node::root(tree).unwrap_root()?;
    root.note_unknown_keys(SERVICE_KEYS)?;

    let name = root.required("name")?.string()?;
    let components = root
        .list("components", COMPONENT_KEYS)?
        .iter()
        .map(parse_component)
        .collect::<Result<Vec<_>>>()?;
    ensure_unique_components(&components)?;

    let descriptor = ServiceDescriptor {
        display_name: root.required("displayName")?.string()?,
        comment: root.optional_string("comment")?,
        version: root.required("version")?.string()?,
        credential_store: match root.get("credentialStore")? {
            Some(node) => parse_credential_store(&node)?,
            None => CredentialStorePolicy::default(),
        },
        components,
        os_specifics: root
            .list("osSpecifics", OS_SPECIFIC_KEYS)?
            .iter()
            .map(parse_os_specific)
            .collect::<Result<Vec<_>>>()?,
        config_dependencies: root.string_list("configDependencies")?,
        quick_links: root
            .list("quickLinks", FILE_REFERENCE_KEYS)?
            .iter()
            .map(parse_file_reference)
            .collect::<Result<Vec<_>>>()?,
        themes: root
            .list("themes", FILE_REFERENCE_KEYS)?
            .iter()
            .map(parse_file_reference)
            .collect::<Result<Vec<_>>>()?,
        service_check: root
            .get("serviceCheck")?
            .map(|node| parse_command_script(&node))
            .transpose()?,
        required_services: root.string_list("requiredServices")?,
        restart_required_after_change: root.flag("restartRequiredAfterChange")?,
        name,
    };

    debug!(
        service = %descriptor.name,
        components = descriptor.components.len(),
        os_blocks = descriptor.os_specifics.len(),
        "Parsed service descriptor"
    );
    Ok(descriptor)
}

fn ensure_unique_components(components: &[Component]) -> Result<()> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, component) in components.iter().enumerate() {
        if let Some(first) = seen.insert(component.name.as_str(), index) {
            return Err(DescriptorError::malformed(
                format!("components[{}].name", index),
                format!(
                    "duplicate component name '{}' (first declared at components[{}])",
                    component.name, first
                ),
            ));
        }
    }
    Ok(())
}

fn parse_component(node: &Node<'_>) -> Result<Component> {
    node.note_unknown_keys(COMPONENT_KEYS)?;
    Ok(Component {
        name: node.required("name")?.string()?,
        display_name: node.required("displayName")?.string()?,
        category: node.required("category")?.parse::<ComponentCategory>()?,
        cardinality: node.required("cardinality")?.parse()?,
        command_script: node
            .get("commandScript")?
            .map(|script| parse_command_script(&script))
            .transpose()?,
        logs: node
            .list("logs", LOG_KEYS)?
            .iter()
            .map(parse_log)
            .collect::<Result<Vec<_>>>()?,
        dependencies: node
            .list("dependencies", DEPENDENCY_KEYS)?
            .iter()
            .map(parse_dependency)
            .collect::<Result<Vec<_>>>()?,
        config_dependencies: node.string_list("configDependencies")?,
    })
}

fn parse_command_script(node: &Node<'_>) -> Result<CommandScript> {
    node.note_unknown_keys(SCRIPT_KEYS)?;
    Ok(CommandScript {
        script: node.required("script")?.string()?,
        script_type: match node.get("scriptType")? {
            Some(kind) => kind.parse::<ScriptType>()?,
            None => ScriptType::Python,
        },
        timeout: match node.get("timeout")? {
            Some(secs) => Duration::from_secs(secs.unsigned()?),
            None => DEFAULT_SCRIPT_TIMEOUT,
        },
    })
}

fn parse_log(node: &Node<'_>) -> Result<LogDefinition> {
    node.note_unknown_keys(LOG_KEYS)?;
    Ok(LogDefinition {
        log_id: node.required("logId")?.string()?,
        primary: node.flag("primary")?,
    })
}

fn parse_dependency(node: &Node<'_>) -> Result<Dependency> {
    node.note_unknown_keys(DEPENDENCY_KEYS)?;
    let auto_deploy = match node.get("autoDeploy")? {
        // Tag trees nest the flag: autoDeploy: { enabled: true }
        Some(inner) if inner.value.is_object() => inner.flag("enabled")?,
        Some(inner) => inner.boolean()?,
        None => false,
    };
    Ok(Dependency {
        name: node.required("name")?.parse()?,
        scope: node.required("scope")?.parse::<DependencyScope>()?,
        auto_deploy,
    })
}

fn parse_os_specific(node: &Node<'_>) -> Result<OsSpecific> {
    node.note_unknown_keys(OS_SPECIFIC_KEYS)?;
    Ok(OsSpecific {
        os_family: node.required("osFamily")?.parse::<OsFamilySet>()?,
        packages: node
            .list("packages", PACKAGE_KEYS)?
            .iter()
            .map(parse_package)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn parse_package(node: &Node<'_>) -> Result<Package> {
    node.note_unknown_keys(PACKAGE_KEYS)?;
    Ok(Package {
        name: node.required("name")?.string()?,
        skip_upgrade: node.flag("skipUpgrade")?,
        condition: node.optional_string("condition")?,
    })
}

fn parse_credential_store(node: &Node<'_>) -> Result<CredentialStorePolicy> {
    node.note_unknown_keys(&["supported", "enabled", "required"])?;
    Ok(CredentialStorePolicy {
        supported: node.flag("supported")?,
        enabled: node.flag("enabled")?,
        required: node.flag("required")?,
    })
}

fn parse_file_reference(node: &Node<'_>) -> Result<FileReference> {
    node.note_unknown_keys(FILE_REFERENCE_KEYS)?;
    Ok(FileReference {
        file_name: node.required("fileName")?.string()?,
        default: node.flag("default")?,
    })
}

/// Cursor into the attribute tree that remembers how it got there
struct Node<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Node<'a> {
    fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    fn display_path(&self) -> &str {
        if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        }
    }

    fn malformed(&self, reason: impl Into<String>) -> DescriptorError {
        DescriptorError::malformed(self.display_path(), reason)
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn child(&self, key: &str, value: &'a Value) -> Node<'a> {
        Node {
            value,
            path: self.child_path(key),
        }
    }

    fn element(&self, index: usize, value: &'a Value) -> Node<'a> {
        Node {
            value,
            path: format!("{}[{}]", self.path, index),
        }
    }

    fn unwrap_root(self) -> Result<Node<'a>> {
        let map = self.object()?;
        match map.get("service") {
            Some(inner) if map.len() == 1 && inner.is_object() => Ok(self.child("service", inner)),
            _ => Ok(self),
        }
    }

    fn object(&self) -> Result<&'a Map<String, Value>> {
        self.value
            .as_object()
            .ok_or_else(|| self.malformed(format!("expected an object, found {}", kind(self.value))))
    }

    /// Child node; explicit nulls count as absent
    fn get(&self, key: &str) -> Result<Option<Node<'a>>> {
        Ok(self
            .object()?
            .get(key)
            .filter(|value| !value.is_null())
            .map(|value| self.child(key, value)))
    }

    fn required(&self, key: &str) -> Result<Node<'a>> {
        self.get(key)?.ok_or_else(|| {
            DescriptorError::malformed(self.child_path(key), "missing required field")
        })
    }

    fn string(&self) -> Result<String> {
        match self.value {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(self.malformed(format!("expected a string, found {}", kind(other)))),
        }
    }

    fn boolean(&self) -> Result<bool> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
            Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
            other => Err(self.malformed(format!("expected a boolean, found {}", kind(other)))),
        }
    }

    fn unsigned(&self) -> Result<u64> {
        let parsed = match self.value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            self.malformed(format!(
                "expected a non-negative integer, found {}",
                kind(self.value)
            ))
        })
    }

    fn parse<T>(&self) -> Result<T>
    where
        T: FromStr<Err = ModelError>,
    {
        self.string()?
            .parse()
            .map_err(|err: ModelError| self.malformed(err.to_string()))
    }

    fn optional_string(&self, key: &str) -> Result<Option<String>> {
        self.get(key)?.map(|node| node.string()).transpose()
    }

    /// Optional boolean, `false` when absent
    fn flag(&self, key: &str) -> Result<bool> {
        Ok(match self.get(key)? {
            Some(node) => node.boolean()?,
            None => false,
        })
    }

    /// Optional list of records with the given fields, empty when absent
    fn list(&self, key: &str, fields: &[&str]) -> Result<Vec<Node<'a>>> {
        match self.get(key)? {
            Some(node) => node.items(fields),
            None => Ok(Vec::new()),
        }
    }

    /// Optional list of strings; a bare string is a one-element list
    fn string_list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key)? {
            Some(node) if node.value.is_string() => {
                Ok(vec![node.element(0, node.value).string()?])
            }
            Some(node) => node.items(&[])?.iter().map(Node::string).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Elements of a list; `fields` are the keys an element record may carry
    fn items(&self, fields: &[&str]) -> Result<Vec<Node<'a>>> {
        match self.value {
            Value::Array(values) => Ok(values
                .iter()
                .enumerate()
                .map(|(index, value)| self.element(index, value))
                .collect()),
            Value::Object(map) if map.len() == 1 => {
                let Some((key, inner)) = map.iter().next() else {
                    return Ok(Vec::new());
                };
                // A record with a single field is the element itself
                if fields.contains(&key.as_str()) {
                    return Ok(vec![self.element(0, self.value)]);
                }
                let wrapped = self.child(key, inner);
                match inner {
                    Value::Array(_) => wrapped.items(fields),
                    Value::Object(_) | Value::String(_) => Ok(vec![wrapped.element(0, inner)]),
                    other => Err(wrapped.malformed(format!("expected a list, found {}", kind(other)))),
                }
            }
            other => Err(self.malformed(format!("expected a list, found {}", kind(other)))),
        }
    }

    /// Unknown keys are tolerated; they are only reported at debug level
    fn note_unknown_keys(&self, known: &[&str]) -> Result<()> {
        for key in self.object()?.keys() {
            if !known.contains(&key.as_str()) {
                debug!(path = %self.display_path(), key = %key, "Ignoring unknown descriptor field");
            }
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
