//! Common types and utilities for ordgen
//!
//! This crate contains the linked definition graph consumed by the
//! generator, the Open Resource Discovery (ORD) document types it produces,
//! the user-facing configuration and the shared error type.

pub mod config;
pub mod document;
pub mod model;
mod visibility;

pub use config::{McpConfig, OrdConfig, ProductConfig, ProjectDescriptor};
pub use document::{
    AccessStrategy, ApiResource, DataProduct, Document, EntityType, EntityTypeMapping, Extensible,
    EntityTypeTarget, EventResource, Group, OutputPort, Package, Product, ResourceDefinition,
    TargetScope, ORD_VERSION,
};
pub use model::{
    annotations, Annotations, Definition, DefinitionGraph, DefinitionKind, Endpoint,
    Relationship, RelationshipKind,
};
pub use visibility::{InvalidVisibility, Visibility};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a model or synthesizing a document
#[derive(Error, Debug)]
pub enum OrdError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Project descriptor not found: {}", .0.display())]
    MissingProjectDescriptor(PathBuf),

    #[error("Invalid ORD namespace '{namespace}': {reason}")]
    InvalidNamespace { namespace: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for ordgen operations
pub type Result<T> = std::result::Result<T, OrdError>;
