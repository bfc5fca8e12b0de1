//! User-facing configuration
//!
//! `OrdConfig` carries the optional overrides a project may supply;
//! `ProjectDescriptor` is the subset of `package.json` the generator needs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project identity, read from `package.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Package name (e.g. "@acme/bookshop")
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl ProjectDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            version: None,
        }
    }
}

/// Product entry supplied by configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    pub ord_id: String,
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
}

/// Settings for the MCP server API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Interaction entry point (default "/mcp")
    #[serde(default)]
    pub entry_point: Option<String>,
    /// Raw visibility; validated when the run configuration is resolved
    #[serde(default)]
    pub visibility: Option<String>,
}

/// Optional override configuration
///
/// All fields are optional; the generator derives defaults from the project
/// descriptor and the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdConfig {
    /// ORD namespace (e.g. "sap.sample"); defaults to `customer.<app>`
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub policy_levels: Vec<String>,
    /// Raw default visibility; invalid values fall back to public
    #[serde(default)]
    pub default_visibility: Option<String>,
    #[serde(default)]
    pub products: Vec<ProductConfig>,
    #[serde(default, rename = "existingProductORDId")]
    pub existing_product_ord_id: Option<String>,
    /// RFC 3339 timestamp; defaults to the time of the run
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    /// Access strategy types, as resolved by the authentication setup
    #[serde(default)]
    pub access_strategies: Vec<String>,
    #[serde(default)]
    pub mcp: Option<McpConfig>,
    /// Drop entity types referenced only by private services
    #[serde(default)]
    pub exclude_entity_types_of_private_resources: bool,
    /// Custom content overlay; recorded, merged by a separate step
    #[serde(default)]
    pub custom_ord_content_file: Option<PathBuf>,
}
