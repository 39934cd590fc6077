//! Stack catalog
//!
//! A stack location holds one directory per service, each with a descriptor
//! file named `service.<ext>`:
//!
//! ```text
//! <root>/
//!   AMBARI_INFRA/service.yaml
//!   LOGSEARCH/service.yaml
//!   LOGSEARCH/quicklinks/quicklinks.json   (ignored)
//! ```
//!
//! Only files whose stem is `service` and whose extension is a supported
//! descriptor format are loaded; everything else under the root is ignored.

use crate::error::{DescriptorError, Result};
use crate::format::DescriptorFormat;
use crate::query::ServiceModel;
use crate::validation::{codes, ValidationReport, Violation};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File stem of descriptor files inside a stack location
pub const DESCRIPTOR_FILE_STEM: &str = "service";

/// A loaded service and where it came from
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub path: PathBuf,
    pub model: ServiceModel,
}

/// Every service found under one stack location
#[derive(Debug, Clone)]
pub struct StackCatalog {
    root: PathBuf,
    services: BTreeMap<String, CatalogEntry>,
}

impl StackCatalog {
    /// Walk `root` and load every descriptor file
    ///
    /// The first malformed or invalid descriptor aborts the load; the error
    /// names the file.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut services: BTreeMap<String, CatalogEntry> = BTreeMap::new();

        for path in descriptor_files(&root)? {
            debug!(path = %path.display(), "Loading service descriptor");
            let model = crate::load_file(&path)?;
            let name = model.name().to_string();

            if let Some(existing) = services.get(&name) {
                return Err(DescriptorError::DuplicateService {
                    name,
                    first: existing.path.clone(),
                    second: path,
                });
            }
            services.insert(name, CatalogEntry { path, model });
        }

        info!(
            root = %root.display(),
            services = services.len(),
            "Loaded stack catalog"
        );
        Ok(Self { root, services })
    }

    /// Load the same location again into a fresh catalog
    pub fn reload(&self) -> Result<Self> {
        Self::load(&self.root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn service(&self, name: &str) -> Option<&ServiceModel> {
        self.services.get(name).map(|entry| &entry.model)
    }

    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.services.get(name)
    }

    /// Services sorted by name
    pub fn services(&self) -> impl Iterator<Item = &ServiceModel> {
        self.services.values().map(|entry| &entry.model)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Check references that cross service boundaries
    ///
    /// Each service was validated on its own at load time; this adds
    /// required-service and cross-service dependency checks. Paths are
    /// prefixed with the service name.
    pub fn validate_cross_references(&self) -> ValidationReport {
        let mut report = ValidationReport::pass();

        for model in self.services() {
            let descriptor = model.descriptor();

            for (index, required) in descriptor.required_services.iter().enumerate() {
                if !self.services.contains_key(required) {
                    report.push(
                        Violation::error(
                            codes::UNKNOWN_SERVICE,
                            format!("Required service '{}' is not in the catalog", required),
                        )
                        .at(format!("{}:requiredServices[{}]", descriptor.name, index)),
                    );
                }
            }

            for (c_index, component) in descriptor.components.iter().enumerate() {
                for (d_index, dependency) in component.dependencies.iter().enumerate() {
                    let target = &dependency.name;
                    let Some(service) = target.service.as_deref() else {
                        continue;
                    };
                    if target.is_local_to(&descriptor.name) {
                        continue;
                    }

                    let path = format!(
                        "{}:components[{}].dependencies[{}].name",
                        descriptor.name, c_index, d_index
                    );
                    match self.service(service) {
                        None => report.push(
                            Violation::error(
                                codes::UNKNOWN_SERVICE,
                                format!("Dependency target service '{}' is not in the catalog", service),
                            )
                            .at(path),
                        ),
                        Some(other) if other.component(&target.component).is_none() => report.push(
                            Violation::error(
                                codes::UNKNOWN_DEPENDENCY,
                                format!(
                                    "Dependency target '{}' is not a component of service '{}'",
                                    target, service
                                ),
                            )
                            .at(path),
                        ),
                        Some(_) => {}
                    }
                }
            }
        }

        report
    }
}

/// Descriptor files under `root`, sorted by path
pub fn descriptor_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            DescriptorError::Io { path, source }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_descriptor = path.file_stem().and_then(|stem| stem.to_str())
            == Some(DESCRIPTOR_FILE_STEM)
            && DescriptorFormat::from_path(path).is_ok();
        if is_descriptor {
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}
