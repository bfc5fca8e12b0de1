//! File loaders

use crate::csn::{convert_csn_to_definition_graph, CsnDocument};
use ordgen_common::{DefinitionGraph, OrdConfig, OrdError, ProjectDescriptor, Result};
use std::fs;
use std::path::Path;

/// Compiled model parser
///
/// Reads the JSON produced by the model compiler and links it into a
/// `DefinitionGraph`.
pub struct ModelParser {
    /// Loaded compiled model
    doc: CsnDocument,
}

impl ModelParser {
    /// Load a compiled model from file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = ModelParser::from_file("gen/csn.json")?;
    /// let graph = parser.parse();
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            OrdError::Parse(format!(
                "Failed to read model file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parse a compiled model from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: CsnDocument = serde_json::from_str(json)
            .map_err(|e| OrdError::Parse(format!("Failed to parse model JSON: {}", e)))?;

        Ok(Self { doc })
    }

    /// Link the compiled model into a definition graph
    pub fn parse(&self) -> DefinitionGraph {
        convert_csn_to_definition_graph(&self.doc)
    }

    /// Get reference to the underlying compiled model
    pub fn doc(&self) -> &CsnDocument {
        &self.doc
    }
}

/// Load the project descriptor (`package.json`)
///
/// A missing file is fatal: without it the run has no project identity.
pub fn load_project_descriptor(path: &Path) -> Result<ProjectDescriptor> {
    if !path.is_file() {
        return Err(OrdError::MissingProjectDescriptor(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        OrdError::Parse(format!(
            "Failed to parse project descriptor {}: {}",
            path.display(),
            e
        ))
    })
}

/// Load override configuration; `.yaml`/`.yml` files are read as YAML,
/// everything else as JSON
pub fn load_config(path: &Path) -> Result<OrdConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        OrdError::Config(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));

    let config = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    Ok(config)
}
