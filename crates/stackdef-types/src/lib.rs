//! stackdef Types - Typed model for service descriptors
//!
//! A service descriptor tells a cluster orchestrator how to install,
//! configure and monitor one service: which components it is made of, how
//! many instances of each may run, which lifecycle script drives them, which
//! configuration bundles they read and which OS packages they need.
//!
//! ## Key Concepts
//!
//! - **ServiceDescriptor**: The whole document for one service
//! - **Component**: An installable unit (server, agent, client) of a service
//! - **Cardinality**: Allowed instance count of a component across a cluster
//! - **OsSpecific**: Package list applicable to a set of OS family tags
//!
//! Everything the source document expresses as free text (category,
//! cardinality, script type, dependency scope, component references) is a
//! tagged Rust type here, so an invalid value cannot survive parsing.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod cardinality;
pub mod component;
pub mod descriptor;
pub mod error;
pub mod os;

pub use cardinality::Cardinality;
pub use component::{
    CommandScript, Component, ComponentCategory, ComponentRef, Dependency, DependencyScope,
    LogDefinition, ScriptType,
};
pub use descriptor::{CredentialStorePolicy, FileReference, ServiceDescriptor};
pub use error::ModelError;
pub use os::{OsFamilySet, OsSpecific, Package};
