//! stackdef Interpreter - Parse, validate and query service descriptors
//!
//! Loading a descriptor is a linear pipeline:
//!
//! 1. **Decode** text (YAML, JSON or TOML) into an attribute tree
//! 2. **Parse** the tree into a typed [`ServiceDescriptor`]; any structural
//!    problem aborts with `MalformedDescriptor` and the offending path
//! 3. **Validate** invariants and cross-references, collecting every
//!    violation into a [`ValidationReport`]
//! 4. **Query** the resulting immutable [`ServiceModel`]
//!
//! ```no_run
//! use stackdef_interpreter::{load_file, ComponentCategory};
//!
//! let model = load_file("descriptors/LOGSEARCH/service.yaml")?;
//! for master in model.components_by_category(ComponentCategory::Master) {
//!     println!("{} -> {:?}", master.name, model.config_types(&master.name)?);
//! }
//! let packages = model.packages_for_os("redhat7").unwrap_or_default();
//! # Ok::<(), stackdef_interpreter::DescriptorError>(())
//! ```
//!
//! Several descriptors under one directory form a [`StackCatalog`], which
//! additionally resolves references between services.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod catalog;
pub mod error;
pub mod format;
pub mod host;
pub mod parser;
pub mod query;
pub mod validation;

use std::path::Path;

pub use catalog::{descriptor_files, CatalogEntry, StackCatalog, DESCRIPTOR_FILE_STEM};
pub use error::{DescriptorError, Result};
pub use format::DescriptorFormat;
pub use host::detect_os_family;
pub use parser::{parse_descriptor, DEFAULT_SCRIPT_TIMEOUT};
pub use query::{ConditionEvaluator, ServiceModel};
pub use validation::{validate, Severity, ValidationReport, Violation};

pub use stackdef_types::*;

/// Decode and parse a descriptor, without validating it
pub fn parse_str(content: &str, format: DescriptorFormat) -> Result<ServiceDescriptor> {
    let tree = format.decode(content)?;
    parse_descriptor(&tree)
}

/// Read and parse a descriptor file, without validating it
pub fn read_descriptor(path: impl AsRef<Path>) -> Result<ServiceDescriptor> {
    let path = path.as_ref();
    let format = DescriptorFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content, format).map_err(|e| e.in_file(path))
}

/// Full pipeline over in-memory text
pub fn load_str(content: &str, format: DescriptorFormat) -> Result<ServiceModel> {
    ServiceModel::new(parse_str(content, format)?)
}

/// Full pipeline over a file
pub fn load_file(path: impl AsRef<Path>) -> Result<ServiceModel> {
    let path = path.as_ref();
    let descriptor = read_descriptor(path)?;
    ServiceModel::new(descriptor).map_err(|e| e.in_file(path))
}

/// Serialize a descriptor back into text
pub fn to_string(descriptor: &ServiceDescriptor, format: DescriptorFormat) -> Result<String> {
    format.encode(descriptor)
}
