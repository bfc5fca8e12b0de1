//! Compiled model (CSN-style) input types and conversion into the
//! definition graph

use indexmap::IndexMap;
use ordgen_common::{
    Annotations, Definition, DefinitionGraph, DefinitionKind, Endpoint, Relationship,
    RelationshipKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Compiled model document root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsnDocument {
    /// Declared model namespace
    #[serde(default)]
    pub namespace: Option<String>,

    /// Definitions keyed by fully-qualified name, in compiler order
    #[serde(default)]
    pub definitions: IndexMap<String, CsnDefinition>,
}

/// One compiled definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsnDefinition {
    /// Raw kind ("service", "entity", "type", ...)
    pub kind: String,

    /// Explicit owning service; inferred from the name when absent
    #[serde(default)]
    pub service: Option<String>,

    /// Transport endpoints reported by the framework (services)
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    /// Structured elements (entities, events)
    #[serde(default)]
    pub elements: IndexMap<String, CsnElement>,

    /// Everything else, including `@`-prefixed annotations
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Element of a structured definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsnElement {
    /// Element type (e.g. "cds.String", "cds.Association")
    #[serde(rename = "type", default)]
    pub element_type: Option<String>,

    /// Target entity of an association or composition
    #[serde(default)]
    pub target: Option<String>,
}

impl CsnElement {
    fn relationship_kind(&self) -> Option<RelationshipKind> {
        match self.element_type.as_deref()? {
            "cds.Association" => Some(RelationshipKind::Association),
            "cds.Composition" => Some(RelationshipKind::Composition),
            _ => None,
        }
    }
}

/// Convert a compiled model into the linked definition graph
pub fn convert_csn_to_definition_graph(doc: &CsnDocument) -> DefinitionGraph {
    let service_names: Vec<&str> = doc
        .definitions
        .iter()
        .filter(|(_, def)| def.kind == "service")
        .map(|(name, _)| name.as_str())
        .collect();

    let mut graph = DefinitionGraph::new(doc.namespace.as_deref());

    for (name, raw) in &doc.definitions {
        let Some(kind) = DefinitionKind::from_raw(&raw.kind) else {
            tracing::debug!(definition = %name, kind = %raw.kind, "skipping definition kind");
            continue;
        };

        let service = match kind {
            DefinitionKind::Service => None,
            _ => raw
                .service
                .clone()
                .or_else(|| owning_service(name, &service_names).map(str::to_string)),
        };

        let annotations: Annotations = raw
            .extra
            .iter()
            .filter(|(key, _)| key.starts_with('@'))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let relationships = if kind == DefinitionKind::Entity {
            extract_relationships(&raw.elements)
        } else {
            Vec::new()
        };

        let endpoints = if kind == DefinitionKind::Service {
            raw.endpoints.clone()
        } else {
            Vec::new()
        };

        graph.insert(Definition {
            name: name.clone(),
            kind,
            service,
            annotations,
            endpoints,
            relationships,
        });
    }

    graph
}

/// Longest service name that is a dotted prefix of `name`
fn owning_service<'a>(name: &str, service_names: &[&'a str]) -> Option<&'a str> {
    service_names
        .iter()
        .copied()
        .filter(|service| {
            name.strip_prefix(service)
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .max_by_key(|service| service.len())
}

fn extract_relationships(elements: &IndexMap<String, CsnElement>) -> Vec<Relationship> {
    elements
        .values()
        .filter_map(|element| {
            let kind = element.relationship_kind()?;
            let target = element.target.clone()?;
            Some(Relationship { kind, target })
        })
        .collect()
}
