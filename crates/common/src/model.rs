//! Linked definition graph
//!
//! The graph is produced by the model loader and is read-only for the
//! generator. Definitions keep the order in which the compiler emitted them,
//! which is also the order of the generated document entries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Well-known annotation names
pub mod annotations {
    pub const TITLE: &str = "@title";
    pub const LABEL: &str = "@Common.Label";
    pub const DESCRIPTION: &str = "@description";
    pub const CORE_DESCRIPTION: &str = "@Core.Description";
    pub const VISIBILITY: &str = "@ORD.Extensions.visibility";
    pub const IMPLEMENTATION_STANDARD: &str = "@ORD.Extensions.implementationStandard";
    pub const PROTOCOL: &str = "@protocol";
    pub const PATH: &str = "@path";
    pub const DATA_PRODUCT_TYPE: &str = "@DataIntegration.dataProduct.type";
    pub const ODM_ENTITY_NAME: &str = "@ODM.entityName";
    pub const ENTITY_TYPE: &str = "@EntityRelationship.entityType";
    pub const EXTERNAL: &str = "@cds.external";
}

/// Kind of a definition in the model graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Service,
    Entity,
    Event,
    Action,
    Function,
}

impl DefinitionKind {
    /// Map a raw compiler kind; `None` for kinds the generator ignores
    /// (types, aspects, contexts, ...)
    pub fn from_raw(kind: &str) -> Option<Self> {
        match kind {
            "service" => Some(DefinitionKind::Service),
            "entity" => Some(DefinitionKind::Entity),
            "event" => Some(DefinitionKind::Event),
            "action" => Some(DefinitionKind::Action),
            "function" => Some(DefinitionKind::Function),
            _ => None,
        }
    }
}

/// Free-form annotation map with typed accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Annotations(HashMap<String, Value>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert, handy for constructing fixtures
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String value of an annotation; `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Boolean flag; absent or non-boolean values read as `false`
    pub fn is_set(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A string or list-of-strings annotation; `None` when absent.
    ///
    /// Non-string list members are dropped.
    pub fn get_str_list(&self, key: &str) -> Option<Vec<String>> {
        match self.0.get(key)? {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => Some(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Transport endpoint reported by the service framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Protocol kind (e.g. "odata", "rest")
    pub kind: String,
    /// Served path; `None` when the framework did not report one
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    Association,
    Composition,
}

/// Association or composition from one entity to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    /// Fully-qualified name of the target entity
    pub target: String,
}

/// A node of the definition graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Fully-qualified name
    pub name: String,
    pub kind: DefinitionKind,
    /// Fully-qualified name of the owning service, if any
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
    /// Framework endpoints (services only)
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Outgoing relationships (entities only)
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl Definition {
    pub fn new(name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            service: None,
            annotations: Annotations::new(),
            endpoints: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn owned_by(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn annotate(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.annotations.insert(key, value);
        self
    }

    pub fn with_endpoint(mut self, kind: impl Into<String>, path: Option<&str>) -> Self {
        self.endpoints.push(Endpoint {
            kind: kind.into(),
            path: path.map(str::to_string),
        });
        self
    }

    pub fn relates_to(mut self, kind: RelationshipKind, target: impl Into<String>) -> Self {
        self.relationships.push(Relationship {
            kind,
            target: target.into(),
        });
        self
    }

    /// Title from `@title` or `@Common.Label`
    pub fn title(&self) -> Option<&str> {
        self.annotations
            .get_str(annotations::TITLE)
            .or_else(|| self.annotations.get_str(annotations::LABEL))
    }

    /// Description from `@description` or `@Core.Description`
    pub fn description(&self) -> Option<&str> {
        self.annotations
            .get_str(annotations::DESCRIPTION)
            .or_else(|| self.annotations.get_str(annotations::CORE_DESCRIPTION))
    }

    pub fn is_service(&self) -> bool {
        self.kind == DefinitionKind::Service
    }
}

/// Ordered map of fully-qualified name to definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionGraph {
    /// Declared model namespace (the application namespace)
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub definitions: IndexMap<String, Definition>,
}

impl DefinitionGraph {
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            definitions: IndexMap::new(),
        }
    }

    /// Insert a definition keyed by its name; a later insert replaces an
    /// earlier one but keeps its position
    pub fn insert(&mut self, definition: Definition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn with(mut self, definition: Definition) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.definitions.get(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }

    pub fn of_kind(&self, kind: DefinitionKind) -> impl Iterator<Item = &Definition> {
        self.iter().filter(move |d| d.kind == kind)
    }

    pub fn services(&self) -> impl Iterator<Item = &Definition> {
        self.of_kind(DefinitionKind::Service)
    }

    /// Definitions of `kind` owned by `service`
    pub fn owned_by<'a>(
        &'a self,
        service: &'a str,
        kind: DefinitionKind,
    ) -> impl Iterator<Item = &'a Definition> + 'a {
        self.of_kind(kind)
            .filter(move |d| d.service.as_deref() == Some(service))
    }
}
