//! Descriptor validation
//!
//! Validation never stops at the first problem. Every rule runs and the
//! findings are collected into one [`ValidationReport`], so a broken
//! descriptor can be fixed in a single pass.

use regex::Regex;
use serde::{Deserialize, Serialize};
use stackdef_types::{Component, FileReference, OsSpecific, ServiceDescriptor};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Stable violation codes
pub mod codes {
    pub const EMPTY_NAME: &str = "EMPTY_NAME";
    pub const INVALID_NAME: &str = "INVALID_NAME";
    pub const MULTIPLE_PRIMARY_LOGS: &str = "MULTIPLE_PRIMARY_LOGS";
    pub const DUPLICATE_LOG_ID: &str = "DUPLICATE_LOG_ID";
    pub const UNKNOWN_DEPENDENCY: &str = "UNKNOWN_DEPENDENCY";
    pub const SELF_DEPENDENCY: &str = "SELF_DEPENDENCY";
    pub const DUPLICATE_CONFIG_TYPE: &str = "DUPLICATE_CONFIG_TYPE";
    pub const INVALID_CONFIG_TYPE: &str = "INVALID_CONFIG_TYPE";
    pub const INVALID_CONDITION: &str = "INVALID_CONDITION";
    pub const EMPTY_OS_FAMILY: &str = "EMPTY_OS_FAMILY";
    pub const DUPLICATE_PACKAGE: &str = "DUPLICATE_PACKAGE";
    pub const CREDENTIAL_STORE_UNSUPPORTED: &str = "CREDENTIAL_STORE_UNSUPPORTED";
    pub const UNKNOWN_SERVICE: &str = "UNKNOWN_SERVICE";

    pub const NO_SCRIPT_OR_LOGS: &str = "NO_SCRIPT_OR_LOGS";
    pub const SHADOWED_OS_FAMILY: &str = "SHADOWED_OS_FAMILY";
    pub const NON_SEMVER_VERSION: &str = "NON_SEMVER_VERSION";
    pub const ZERO_TIMEOUT: &str = "ZERO_TIMEOUT";
    pub const NO_PRIMARY_LOG: &str = "NO_PRIMARY_LOG";
    pub const MULTIPLE_DEFAULT_FILES: &str = "MULTIPLE_DEFAULT_FILES";
}

/// How bad a violation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks use of the descriptor
    Error,
    /// Reported and logged, nothing more
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub severity: Severity,

    /// Stable code from [`codes`]
    pub code: String,

    pub message: String,

    /// Path of the offending field (e.g. `components[0].logs`)
    pub path: String,
}

impl Violation {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            path: String::new(),
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            path: String::new(),
        }
    }

    /// Set the path
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}: {}", self.severity, self.code, self.path, self.message)
    }
}

/// Result of descriptor validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty (passing) report
    pub fn pass() -> Self {
        Self::default()
    }

    /// True when no errors were found; warnings do not count
    pub fn is_valid(&self) -> bool {
        !self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// True if any violation carries `code`
    pub fn has(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Add a violation
    pub fn with(mut self, violation: Violation) -> Self {
        self.push(violation);
        self
    }

    /// Merge another validation report
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.violations.extend(other.violations);
        self
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.error_count(),
            self.warning_count()
        )?;
        for violation in &self.violations {
            write!(f, "\n  {}", violation)?;
        }
        Ok(())
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid regex"))
}

fn condition_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"))
}

fn config_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("valid regex"))
}

/// True if `name` is a syntactically valid predicate identifier
pub fn is_condition_identifier(name: &str) -> bool {
    condition_pattern().is_match(name)
}

/// Validate a descriptor
pub fn validate(descriptor: &ServiceDescriptor) -> ValidationReport {
    let mut report = ValidationReport::pass();

    report = report.merge(validate_identity(descriptor));
    report = report.merge(validate_credential_store(descriptor));
    for (index, component) in descriptor.components.iter().enumerate() {
        report = report.merge(validate_component(descriptor, index, component));
    }
    report = report.merge(validate_config_types(
        &descriptor.config_dependencies,
        "configDependencies",
    ));
    report = report.merge(validate_os_specifics(&descriptor.os_specifics));
    if let Some(script) = &descriptor.service_check {
        if script.timeout.is_zero() {
            report.push(
                Violation::warning(codes::ZERO_TIMEOUT, "Service check timeout is zero")
                    .at("serviceCheck.timeout"),
            );
        }
    }
    report = report.merge(validate_file_references(&descriptor.quick_links, "quickLinks"));
    report = report.merge(validate_file_references(&descriptor.themes, "themes"));

    report
}

fn validate_name(name: &str, what: &str, path: String) -> Option<Violation> {
    if name.is_empty() {
        Some(Violation::error(codes::EMPTY_NAME, format!("{} name cannot be empty", what)).at(path))
    } else if !name_pattern().is_match(name) {
        Some(
            Violation::error(
                codes::INVALID_NAME,
                format!(
                    "{} name '{}' must start with a letter and contain only letters, digits or underscores",
                    what, name
                ),
            )
            .at(path),
        )
    } else {
        None
    }
}

fn validate_identity(descriptor: &ServiceDescriptor) -> ValidationReport {
    let mut report = ValidationReport::pass();

    if let Some(violation) = validate_name(&descriptor.name, "Service", "name".into()) {
        report.push(violation);
    }

    if semver::Version::parse(&descriptor.version).is_err() {
        report.push(
            Violation::warning(
                codes::NON_SEMVER_VERSION,
                format!("Service version '{}' is not valid semver", descriptor.version),
            )
            .at("version"),
        );
    }

    for (index, required) in descriptor.required_services.iter().enumerate() {
        if let Some(violation) =
            validate_name(required, "Required service", format!("requiredServices[{}]", index))
        {
            report.push(violation);
        }
    }

    report
}

fn validate_credential_store(descriptor: &ServiceDescriptor) -> ValidationReport {
    let mut report = ValidationReport::pass();
    let policy = descriptor.credential_store;

    if !policy.supported && (policy.enabled || policy.required) {
        report.push(
            Violation::error(
                codes::CREDENTIAL_STORE_UNSUPPORTED,
                "Credential store is enabled or required but not supported",
            )
            .at("credentialStore"),
        );
    }

    report
}

fn validate_component(
    descriptor: &ServiceDescriptor,
    index: usize,
    component: &Component,
) -> ValidationReport {
    let mut report = ValidationReport::pass();
    let base = format!("components[{}]", index);

    if let Some(violation) = validate_name(&component.name, "Component", format!("{}.name", base)) {
        report.push(violation);
    }

    // Logs
    let primaries: Vec<&str> = component
        .logs
        .iter()
        .filter(|log| log.primary)
        .map(|log| log.log_id.as_str())
        .collect();
    if primaries.len() > 1 {
        report.push(
            Violation::error(
                codes::MULTIPLE_PRIMARY_LOGS,
                format!(
                    "Component '{}' marks {} logs as primary ({}); at most one is allowed",
                    component.name,
                    primaries.len(),
                    primaries.join(", ")
                ),
            )
            .at(format!("{}.logs", base)),
        );
    } else if primaries.is_empty() && !component.logs.is_empty() {
        report.push(
            Violation::warning(
                codes::NO_PRIMARY_LOG,
                format!("Component '{}' has logs but none is primary", component.name),
            )
            .at(format!("{}.logs", base)),
        );
    }

    let mut log_ids = HashSet::new();
    for (log_index, log) in component.logs.iter().enumerate() {
        if !log_ids.insert(log.log_id.as_str()) {
            report.push(
                Violation::error(
                    codes::DUPLICATE_LOG_ID,
                    format!("Log id '{}' is declared more than once", log.log_id),
                )
                .at(format!("{}.logs[{}].logId", base, log_index)),
            );
        }
    }

    // Script
    match &component.command_script {
        Some(script) if script.timeout.is_zero() => report.push(
            Violation::warning(
                codes::ZERO_TIMEOUT,
                format!("Command script of '{}' has a zero timeout", component.name),
            )
            .at(format!("{}.commandScript.timeout", base)),
        ),
        None if component.logs.is_empty() => report.push(
            Violation::warning(
                codes::NO_SCRIPT_OR_LOGS,
                format!(
                    "Component '{}' has neither a command script nor logs",
                    component.name
                ),
            )
            .at(base.clone()),
        ),
        _ => {}
    }

    // Dependencies
    for (dep_index, dependency) in component.dependencies.iter().enumerate() {
        let path = format!("{}.dependencies[{}].name", base, dep_index);
        let target = &dependency.name;
        if !target.is_local_to(&descriptor.name) {
            // Cross-service targets are resolved by the stack catalog
            continue;
        }
        if target.component == component.name {
            report.push(
                Violation::error(
                    codes::SELF_DEPENDENCY,
                    format!("Component '{}' depends on itself", component.name),
                )
                .at(path),
            );
        } else if descriptor.component(&target.component).is_none() {
            report.push(
                Violation::error(
                    codes::UNKNOWN_DEPENDENCY,
                    format!(
                        "Dependency target '{}' is not a component of service '{}'",
                        target, descriptor.name
                    ),
                )
                .at(path),
            );
        }
    }

    report.merge(validate_config_types(
        &component.config_dependencies,
        &format!("{}.configDependencies", base),
    ))
}

fn validate_config_types(config_types: &[String], base: &str) -> ValidationReport {
    let mut report = ValidationReport::pass();
    let mut seen = HashSet::new();

    for (index, config_type) in config_types.iter().enumerate() {
        let path = format!("{}[{}]", base, index);
        if !config_type_pattern().is_match(config_type) {
            report.push(
                Violation::error(
                    codes::INVALID_CONFIG_TYPE,
                    format!("Config type '{}' is not a well-formed key", config_type),
                )
                .at(path),
            );
        } else if !seen.insert(config_type.as_str()) {
            report.push(
                Violation::error(
                    codes::DUPLICATE_CONFIG_TYPE,
                    format!("Config type '{}' is listed more than once", config_type),
                )
                .at(path),
            );
        }
    }

    report
}

fn validate_os_specifics(blocks: &[OsSpecific]) -> ValidationReport {
    let mut report = ValidationReport::pass();
    let mut claimed: HashMap<&str, usize> = HashMap::new();

    for (index, block) in blocks.iter().enumerate() {
        let base = format!("osSpecifics[{}]", index);

        if block.os_family.is_empty() {
            report.push(
                Violation::error(codes::EMPTY_OS_FAMILY, "osFamily lists no OS family tags")
                    .at(format!("{}.osFamily", base)),
            );
        }

        for tag in block.os_family.iter() {
            if let Some(first) = claimed.get(tag) {
                report.push(
                    Violation::warning(
                        codes::SHADOWED_OS_FAMILY,
                        format!(
                            "OS family '{}' is already matched by osSpecifics[{}]; this block never applies to it",
                            tag, first
                        ),
                    )
                    .at(format!("{}.osFamily", base)),
                );
            } else {
                claimed.insert(tag, index);
            }
        }

        let mut names = HashSet::new();
        for (pkg_index, package) in block.packages.iter().enumerate() {
            let path = format!("{}.packages[{}]", base, pkg_index);
            if package.name.is_empty() {
                report.push(
                    Violation::error(codes::EMPTY_NAME, "Package name cannot be empty")
                        .at(format!("{}.name", path)),
                );
            } else if !names.insert(package.name.as_str()) {
                report.push(
                    Violation::error(
                        codes::DUPLICATE_PACKAGE,
                        format!("Package '{}' is listed more than once", package.name),
                    )
                    .at(format!("{}.name", path)),
                );
            }

            if let Some(condition) = &package.condition {
                if !is_condition_identifier(condition) {
                    report.push(
                        Violation::error(
                            codes::INVALID_CONDITION,
                            format!("Condition '{}' is not a valid identifier", condition),
                        )
                        .at(format!("{}.condition", path)),
                    );
                }
            }
        }
    }

    report
}

fn validate_file_references(files: &[FileReference], base: &str) -> ValidationReport {
    let mut report = ValidationReport::pass();

    for (index, file) in files.iter().enumerate() {
        if file.file_name.is_empty() {
            report.push(
                Violation::error(codes::EMPTY_NAME, "File name cannot be empty")
                    .at(format!("{}[{}].fileName", base, index)),
            );
        }
    }

    if files.iter().filter(|file| file.default).count() > 1 {
        report.push(
            Violation::warning(
                codes::MULTIPLE_DEFAULT_FILES,
                "More than one file is marked default; the first one is used",
            )
            .at(base.to_string()),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackdef_types::{
        Cardinality, CommandScript, ComponentCategory, ComponentRef, Dependency, DependencyScope,
        LogDefinition, Package, ScriptType,
    };
    use std::time::Duration;

    fn log(id: &str, primary: bool) -> LogDefinition {
        LogDefinition {
            log_id: id.into(),
            primary,
        }
    }

    fn server() -> Component {
        let mut component = Component::new(
            "LOGSEARCH_SERVER",
            "Log Search Server",
            ComponentCategory::Master,
            Cardinality::Range { min: 0, max: 1 },
        );
        component.command_script = Some(CommandScript {
            script: "scripts/logsearch.py".into(),
            script_type: ScriptType::Python,
            timeout: Duration::from_secs(1800),
        });
        component.logs = vec![log("logsearch_app", true), log("logsearch_perf", false)];
        component
    }

    fn descriptor() -> ServiceDescriptor {
        let mut descriptor = ServiceDescriptor::new("LOGSEARCH", "Log Search", "0.5.0");
        descriptor.components.push(server());
        descriptor
    }

    #[test]
    fn test_clean_descriptor() {
        let report = validate(&descriptor());
        assert!(report.is_valid());
        assert_eq!(report.violations, vec![]);
    }

    #[test]
    fn test_two_primary_logs() {
        let mut descriptor = descriptor();
        descriptor.components[0].logs[1].primary = true;
        let report = validate(&descriptor);
        assert!(!report.is_valid());
        let violation = report.errors().next().unwrap();
        assert_eq!(violation.code, codes::MULTIPLE_PRIMARY_LOGS);
        assert_eq!(violation.path, "components[0].logs");
    }

    #[test]
    fn test_collects_every_violation() {
        let mut descriptor = descriptor();
        descriptor.components[0].logs.push(log("logsearch_app", true));
        descriptor.components[0].config_dependencies =
            vec!["logsearch-env".into(), "logsearch-env".into(), "bad key".into()];
        descriptor.credential_store.required = true;

        let report = validate(&descriptor);
        assert!(report.has(codes::MULTIPLE_PRIMARY_LOGS));
        assert!(report.has(codes::DUPLICATE_LOG_ID));
        assert!(report.has(codes::DUPLICATE_CONFIG_TYPE));
        assert!(report.has(codes::INVALID_CONFIG_TYPE));
        assert!(report.has(codes::CREDENTIAL_STORE_UNSUPPORTED));
        assert_eq!(report.error_count(), 5);
    }

    #[test]
    fn test_dependency_targets() {
        let mut descriptor = descriptor();
        let mut feeder = Component::new(
            "LOGSEARCH_LOGFEEDER",
            "Log Feeder",
            ComponentCategory::Slave,
            Cardinality::All,
        );
        feeder.logs.push(log("logsearch_feeder", true));
        feeder.dependencies = vec![
            Dependency {
                name: "LOGSEARCH_SERVER".parse().unwrap(),
                scope: DependencyScope::Cluster,
                auto_deploy: false,
            },
            Dependency {
                name: "AMBARI_INFRA/INFRA_SOLR_CLIENT".parse().unwrap(),
                scope: DependencyScope::Host,
                auto_deploy: true,
            },
        ];
        descriptor.components.push(feeder);
        assert!(validate(&descriptor).is_valid());

        descriptor.components[1].dependencies.push(Dependency {
            name: ComponentRef::new(Some("LOGSEARCH"), "LOGSEARCH_PORTAL"),
            scope: DependencyScope::Host,
            auto_deploy: false,
        });
        descriptor.components[1].dependencies.push(Dependency {
            name: ComponentRef::new(None, "LOGSEARCH_LOGFEEDER"),
            scope: DependencyScope::Host,
            auto_deploy: false,
        });
        let report = validate(&descriptor);
        assert!(report.has(codes::UNKNOWN_DEPENDENCY));
        assert!(report.has(codes::SELF_DEPENDENCY));
        assert_eq!(report.error_count(), 2);
    }

    #[test]
    fn test_condition_identifiers() {
        assert!(is_condition_identifier("should_install_logsearch_portal"));
        assert!(is_condition_identifier("_private"));
        assert!(!is_condition_identifier("should-install"));
        assert!(!is_condition_identifier("1st"));
        assert!(!is_condition_identifier("a b"));

        let mut descriptor = descriptor();
        let mut package = Package::new("ambari-logsearch-portal");
        package.condition = Some("should install portal".into());
        descriptor.os_specifics.push(OsSpecific {
            os_family: "redhat7".parse().unwrap(),
            packages: vec![package],
        });
        let report = validate(&descriptor);
        let violation = report.errors().next().unwrap();
        assert_eq!(violation.code, codes::INVALID_CONDITION);
        assert_eq!(violation.path, "osSpecifics[0].packages[0].condition");
    }

    #[test]
    fn test_warnings_do_not_block() {
        let mut descriptor = descriptor();
        descriptor.version = "2.7.0.0".into();
        descriptor.components.push(Component::new(
            "LOGSEARCH_CLIENT",
            "Log Search Client",
            ComponentCategory::Client,
            Cardinality::AtLeast(0),
        ));
        descriptor.os_specifics = vec![
            OsSpecific {
                os_family: "redhat7,redhat6".parse().unwrap(),
                packages: vec![Package::new("ambari-logsearch-logfeeder")],
            },
            OsSpecific {
                os_family: "redhat7".parse().unwrap(),
                packages: vec![Package::new("ambari-logsearch-portal")],
            },
        ];

        let report = validate(&descriptor);
        assert!(report.is_valid());
        assert!(report.has(codes::NON_SEMVER_VERSION));
        assert!(report.has(codes::NO_SCRIPT_OR_LOGS));
        assert!(report.has(codes::SHADOWED_OS_FAMILY));
        assert_eq!(report.warning_count(), 3);
    }

    #[test]
    fn test_empty_os_family_and_duplicate_package() {
        let mut descriptor = descriptor();
        descriptor.os_specifics.push(OsSpecific {
            os_family: "".parse().unwrap(),
            packages: vec![Package::new("a"), Package::new("a")],
        });
        let report = validate(&descriptor);
        assert!(report.has(codes::EMPTY_OS_FAMILY));
        assert!(report.has(codes::DUPLICATE_PACKAGE));
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport::pass()
            .with(Violation::error(codes::EMPTY_NAME, "Service name cannot be empty").at("name"));
        let text = report.to_string();
        assert!(text.starts_with("1 error(s), 0 warning(s)"));
        assert!(text.contains("error [EMPTY_NAME] name: Service name cannot be empty"));
    }
    /// The only violation carrying `code`
    fn single<'r>(report: &'r ValidationReport, code: &str) -> &'r Violation {
        let mut found = report.violations.iter().filter(|v| v.code == code);
        let violation = found.next().unwrap_or_else(|| panic!("no {} in {}", code, report));
        assert!(found.next().is_none(), "more than one {} in {}", code, report);
        violation
    }

    #[test]
    fn test_invalid_names() {
        let mut descriptor = descriptor();
        descriptor.name = "log-search".into();
        descriptor.components[0].name = "1X".into();
        descriptor.required_services = vec!["AMBARI_INFRA".into(), "ambari infra".into()];

        let report = validate(&descriptor);
        let paths: Vec<&str> = report
            .violations
            .iter()
            .filter(|v| v.code == codes::INVALID_NAME)
            .inspect(|v| assert_eq!(v.severity, Severity::Error))
            .map(|v| v.path.as_str())
            .collect();
        assert_eq!(paths, vec!["name", "requiredServices[1]", "components[0].name"]);
    }

    #[test]
    fn test_empty_package_and_file_names() {
        let mut descriptor = descriptor();
        descriptor.os_specifics.push(OsSpecific {
            os_family: "redhat7".parse().unwrap(),
            packages: vec![Package::new("ambari-logsearch-logfeeder"), Package::new("")],
        });
        descriptor.quick_links = vec![FileReference::new("", true)];

        let report = validate(&descriptor);
        let paths: Vec<&str> = report
            .violations
            .iter()
            .filter(|v| v.code == codes::EMPTY_NAME)
            .inspect(|v| assert_eq!(v.severity, Severity::Error))
            .map(|v| v.path.as_str())
            .collect();
        assert_eq!(
            paths,
            vec!["osSpecifics[0].packages[1].name", "quickLinks[0].fileName"]
        );
    }

    #[test]
    fn test_no_primary_log() {
        let mut descriptor = descriptor();
        descriptor.components[0].logs[0].primary = false;

        let report = validate(&descriptor);
        assert!(report.is_valid());
        let violation = single(&report, codes::NO_PRIMARY_LOG);
        assert_eq!(violation.severity, Severity::Warning);
        assert_eq!(violation.path, "components[0].logs");
    }

    #[test]
    fn test_zero_timeouts() {
        let mut descriptor = descriptor();
        if let Some(script) = descriptor.components[0].command_script.as_mut() {
            script.timeout = Duration::ZERO;
        }
        descriptor.service_check = Some(CommandScript {
            script: "scripts/service_check.py".into(),
            script_type: ScriptType::Python,
            timeout: Duration::ZERO,
        });

        let report = validate(&descriptor);
        assert!(report.is_valid());
        let zero: Vec<&Violation> = report
            .warnings()
            .filter(|v| v.code == codes::ZERO_TIMEOUT)
            .collect();
        assert_eq!(zero.len(), 2);
        assert_eq!(zero[0].path, "components[0].commandScript.timeout");
        assert_eq!(zero[1].path, "serviceCheck.timeout");
    }

    #[test]
    fn test_multiple_default_files() {
        let mut descriptor = descriptor();
        descriptor.themes = vec![
            FileReference::new("theme.json", true),
            FileReference::new("theme_version_2.json", true),
        ];
        descriptor.quick_links = vec![FileReference::new("quicklinks.json", true)];

        let report = validate(&descriptor);
        assert!(report.is_valid());
        let violation = single(&report, codes::MULTIPLE_DEFAULT_FILES);
        assert_eq!(violation.severity, Severity::Warning);
        assert_eq!(violation.path, "themes");
    }
}
