//! Open Resource Discovery document types
//!
//! Field names follow the published ORD JSON format (`camelCase`). Optional
//! members are skipped when empty so the output can be overlaid by a
//! separately authored document fragment keyed by `ordId`.

use crate::Visibility;
use serde::{Deserialize, Serialize};

/// ORD specification version the document declares
pub const ORD_VERSION: &str = "1.12";

/// Root of the generated discovery document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub open_resource_discovery: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub policy_levels: Vec<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
    #[serde(default)]
    pub packages: Vec<Package>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub api_resources: Vec<ApiResource>,
    #[serde(default)]
    pub event_resources: Vec<EventResource>,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data_products: Vec<DataProduct>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub ord_id: String,
    pub title: String,
    pub short_description: String,
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub ord_id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of_products: Vec<String>,
    pub vendor: String,
}

/// Grouping of resources by owning service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    pub group_type_id: String,
    pub title: String,
}

/// How a resource may be authenticated against; opaque to the generator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessStrategy {
    #[serde(rename = "type")]
    pub kind: String,
}

impl AccessStrategy {
    pub const OPEN: &'static str = "open";

    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn open() -> Self {
        Self::new(Self::OPEN)
    }

    pub fn is_open(&self) -> bool {
        self.kind == Self::OPEN
    }
}

/// Pointer to a machine-readable interface description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub media_type: String,
    pub url: String,
    pub access_strategies: Vec<AccessStrategy>,
}

/// Whether an entity-type target lives in the shared cross-domain model or
/// in the application's own namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetScope {
    CrossDomain,
    #[default]
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeTarget {
    pub ord_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip)]
    pub scope: TargetScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTypeMapping {
    pub entity_type_targets: Vec<EntityTypeTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extensible {
    pub supported: String,
}

impl Default for Extensible {
    fn default() -> Self {
        Self {
            supported: "no".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResource {
    pub ord_id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub version: String,
    pub last_update: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of_groups: Vec<String>,
    pub release_status: String,
    pub api_protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    pub resource_definitions: Vec<ResourceDefinition>,
    pub entry_points: Vec<String>,
    pub extensible: Extensible,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_type_mappings: Vec<EntityTypeMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResource {
    pub ord_id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub version: String,
    pub last_update: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of_groups: Vec<String>,
    pub release_status: String,
    pub resource_definitions: Vec<ResourceDefinition>,
    pub extensible: Extensible,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_type_mappings: Vec<EntityTypeMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    pub ord_id: String,
    pub local_id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub version: String,
    pub last_update: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_package: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_of_groups: Vec<String>,
    pub release_status: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPort {
    pub ord_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    pub ord_id: String,
    pub local_id: String,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub version: String,
    pub last_update: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_package: Option<String>,
    pub release_status: String,
    pub lifecycle_status: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub output_ports: Vec<OutputPort>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_type_mappings: Vec<EntityTypeMapping>,
}

impl Document {
    /// Every compound identifier in the document, in output order
    pub fn ord_ids(&self) -> Vec<&str> {
        self.packages
            .iter()
            .map(|p| p.ord_id.as_str())
            .chain(self.api_resources.iter().map(|r| r.ord_id.as_str()))
            .chain(self.event_resources.iter().map(|r| r.ord_id.as_str()))
            .chain(self.entity_types.iter().map(|e| e.ord_id.as_str()))
            .chain(self.data_products.iter().map(|d| d.ord_id.as_str()))
            .collect()
    }
}
