//! Read-only query API over a validated descriptor
//!
//! A [`ServiceModel`] can only be built from a descriptor that passed
//! validation. It holds no interior mutability, so one instance can be
//! shared between orchestrator threads (e.g. behind an `Arc`) without locks.

use crate::error::{DescriptorError, Result};
use crate::validation::{self, Violation};
use stackdef_types::{
    Component, ComponentCategory, Dependency, FileReference, LogDefinition, OsSpecific, Package,
    ServiceDescriptor,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::warn;

/// Decides orchestrator-side install conditions such as
/// `should_install_logsearch_portal`
///
/// The interpreter treats condition names as opaque; what they mean is up to
/// the implementor.
pub trait ConditionEvaluator {
    fn evaluate(&self, predicate: &str) -> bool;
}

/// Unknown predicates evaluate to `false`
impl ConditionEvaluator for HashMap<String, bool> {
    fn evaluate(&self, predicate: &str) -> bool {
        self.get(predicate).copied().unwrap_or(false)
    }
}

impl ConditionEvaluator for BTreeMap<String, bool> {
    fn evaluate(&self, predicate: &str) -> bool {
        self.get(predicate).copied().unwrap_or(false)
    }
}

/// Validated, immutable, indexed view of one service
#[derive(Debug, Clone)]
pub struct ServiceModel {
    descriptor: ServiceDescriptor,
    by_name: HashMap<String, usize>,
    warnings: Vec<Violation>,
}

impl ServiceModel {
    /// Validate `descriptor` and index it
    ///
    /// Fails with [`DescriptorError::Validation`] carrying every violation
    /// when any error is found. Warnings are logged and kept on the model.
    pub fn new(descriptor: ServiceDescriptor) -> Result<Self> {
        let report = validation::validate(&descriptor);
        if !report.is_valid() {
            return Err(DescriptorError::Validation {
                service: descriptor.name.clone(),
                report,
            });
        }

        for violation in report.warnings() {
            warn!(
                service = %descriptor.name,
                code = %violation.code,
                path = %violation.path,
                "{}",
                violation.message
            );
        }

        let by_name = descriptor
            .components
            .iter()
            .enumerate()
            .map(|(index, component)| (component.name.clone(), index))
            .collect();

        Ok(Self {
            warnings: report.warnings().cloned().collect(),
            descriptor,
            by_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    /// Warnings found while validating
    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn into_descriptor(self) -> ServiceDescriptor {
        self.descriptor
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.by_name
            .get(name)
            .map(|&index| &self.descriptor.components[index])
    }

    /// Components in declaration order
    pub fn components(&self) -> &[Component] {
        &self.descriptor.components
    }

    pub fn components_by_category(
        &self,
        category: ComponentCategory,
    ) -> impl Iterator<Item = &Component> + '_ {
        self.descriptor
            .components
            .iter()
            .filter(move |component| component.category == category)
    }

    fn require_component(&self, name: &str) -> Result<&Component> {
        self.component(name)
            .ok_or_else(|| DescriptorError::UnknownComponent {
                service: self.descriptor.name.clone(),
                component: name.to_string(),
            })
    }

    pub fn dependencies_of(&self, component: &str) -> Result<&[Dependency]> {
        Ok(&self.require_component(component)?.dependencies)
    }

    /// Dependencies the orchestrator installs on its own
    pub fn auto_deploy_dependencies(&self, component: &str) -> Result<Vec<&Dependency>> {
        Ok(self
            .dependencies_of(component)?
            .iter()
            .filter(|dependency| dependency.auto_deploy)
            .collect())
    }

    pub fn primary_log(&self, component: &str) -> Result<Option<&LogDefinition>> {
        Ok(self.require_component(component)?.primary_log())
    }

    // ------------------------------------------------------------------
    // Config types
    // ------------------------------------------------------------------

    /// Config types declared by the component itself, in declaration order
    ///
    /// Service-level config types are not folded in; that merge belongs to
    /// the config merger (see [`ServiceModel::merged_config_types`]).
    pub fn config_types(&self, component: &str) -> Result<Vec<&str>> {
        Ok(self
            .require_component(component)?
            .config_dependencies
            .iter()
            .map(String::as_str)
            .collect())
    }

    pub fn service_config_types(&self) -> &[String] {
        &self.descriptor.config_dependencies
    }

    /// Component config types followed by the service-level ones, without repeats
    pub fn merged_config_types(&self, component: &str) -> Result<Vec<&str>> {
        let mut seen = BTreeSet::new();
        let own = &self.require_component(component)?.config_dependencies;
        Ok(own
            .iter()
            .chain(self.descriptor.config_dependencies.iter())
            .map(String::as_str)
            .filter(|config_type| seen.insert(*config_type))
            .collect())
    }

    // ------------------------------------------------------------------
    // Packages
    // ------------------------------------------------------------------

    /// First block, in declaration order, whose tags contain `family` exactly
    pub fn os_specific_for(&self, family: &str) -> Option<&OsSpecific> {
        self.descriptor
            .os_specifics
            .iter()
            .find(|block| block.matches(family))
    }

    pub fn packages_for_os(&self, family: &str) -> Option<&[Package]> {
        self.os_specific_for(family)
            .map(|block| block.packages.as_slice())
    }

    /// Applicable packages whose install condition holds
    pub fn installable_packages(
        &self,
        family: &str,
        conditions: &dyn ConditionEvaluator,
    ) -> Vec<&Package> {
        self.packages_for_os(family)
            .unwrap_or_default()
            .iter()
            .filter(|package| {
                package
                    .condition
                    .as_deref()
                    .map_or(true, |predicate| conditions.evaluate(predicate))
            })
            .collect()
    }

    /// Applicable packages that take part in stack upgrades
    pub fn upgradable_packages(&self, family: &str) -> Vec<&Package> {
        self.packages_for_os(family)
            .unwrap_or_default()
            .iter()
            .filter(|package| !package.skip_upgrade)
            .collect()
    }

    /// Every predicate name referenced by any package, sorted
    pub fn condition_names(&self) -> BTreeSet<&str> {
        self.descriptor
            .os_specifics
            .iter()
            .flat_map(|block| block.packages.iter())
            .filter_map(|package| package.condition.as_deref())
            .collect()
    }

    // ------------------------------------------------------------------
    // UI files
    // ------------------------------------------------------------------

    pub fn default_quick_links(&self) -> Option<&FileReference> {
        default_file(&self.descriptor.quick_links)
    }

    pub fn default_theme(&self) -> Option<&FileReference> {
        default_file(&self.descriptor.themes)
    }
}

fn default_file(files: &[FileReference]) -> Option<&FileReference> {
    files.iter().find(|file| file.default)
}
