//! Entity type mappings
//!
//! A service exposes the entities it owns plus everything reachable from
//! them through associations and compositions. Each exposed entity may map
//! to a cross-domain entity type (`@ODM.entityName`), to an entity type in
//! the application's own namespace (`@EntityRelationship.entityType`), or to
//! both. Only local entity types are materialized into the catalog.

use crate::context::Context;
use crate::diagnostics::SynthesisWarning;
use crate::identifier::{
    local_name, normalize_local_id, parse_entity_type_version, EntityTypeVersion, OrdId,
    ResourceKind, CROSS_DOMAIN_NAMESPACE,
};
use indexmap::IndexMap;
use ordgen_common::{
    annotations, Definition, DefinitionGraph, DefinitionKind, EntityTypeMapping,
    EntityTypeTarget, TargetScope,
};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};

/// Entities exposed by a service, in breadth-first order.
///
/// Every entity is visited at most once, so cyclic relationship graphs
/// terminate. Relationship targets that are not entities in the graph are
/// ignored.
pub fn exposed_entities<'g>(service: &Definition, graph: &'g DefinitionGraph) -> Vec<&'g Definition> {
    let mut visited: HashSet<&'g str> = HashSet::new();
    let mut queue: VecDeque<&'g Definition> = VecDeque::new();

    for entity in graph.iter().filter(|d| {
        d.kind == DefinitionKind::Entity && d.service.as_deref() == Some(service.name.as_str())
    }) {
        if visited.insert(entity.name.as_str()) {
            queue.push_back(entity);
        }
    }

    let mut exposed = Vec::new();
    while let Some(entity) = queue.pop_front() {
        exposed.push(entity);
        for relationship in &entity.relationships {
            let Some(target) = graph.get(&relationship.target) else {
                continue;
            };
            if target.kind == DefinitionKind::Entity && visited.insert(target.name.as_str()) {
                queue.push_back(target);
            }
        }
    }

    exposed
}

/// Entity type declared in the application's own namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalEntityType {
    pub ord_id: String,
    pub local_id: String,
    pub version: EntityTypeVersion,
}

/// Read `@EntityRelationship.entityType`.
///
/// Accepted values: `true` (use the entity's own name), `"Name"` and
/// `"Name:v<N>[letter]"`. Malformed values are reported and skipped.
pub fn local_entity_type(entity: &Definition, ctx: &Context<'_>) -> Option<LocalEntityType> {
    let value = entity.annotations.get(annotations::ENTITY_TYPE)?;

    let (name, raw_version) = match value {
        Value::Bool(false) => return None,
        Value::Bool(true) => {
            let local = local_name(&entity.name, ctx.config.app_namespace.as_deref());
            (local.rsplit('.').next().unwrap_or(local), None)
        }
        Value::String(raw) => match raw.split_once(':') {
            Some((name, version)) => (name, Some(version)),
            None => (raw.as_str(), None),
        },
        _ => ("", None),
    };

    let malformed = || {
        ctx.diagnostics.report(SynthesisWarning::MalformedEntityType {
            definition: entity.name.clone(),
            value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
        });
    };

    if name.trim().is_empty() {
        malformed();
        return None;
    }

    let version = match raw_version {
        None => EntityTypeVersion::default(),
        Some(raw) => match parse_entity_type_version(raw) {
            Some(version) => version,
            None => {
                malformed();
                return None;
            }
        },
    };

    if version.lettered {
        ctx.diagnostics.report(SynthesisWarning::LetteredVersion {
            definition: entity.name.clone(),
            version: version.tag.clone(),
            normalized: version.semver(),
        });
    }

    let local_id = normalize_local_id(name.trim());
    let ord_id = OrdId::new(
        ctx.config.namespace.as_str(),
        ResourceKind::EntityType,
        local_id.as_str(),
        version.tag.as_str(),
    )
    .to_string();

    Some(LocalEntityType {
        ord_id,
        local_id,
        version,
    })
}

/// Targets contributed by one entity: cross-domain first, then local
pub fn entity_targets(entity: &Definition, ctx: &Context<'_>) -> Vec<EntityTypeTarget> {
    let mut targets = Vec::with_capacity(2);

    if let Some(name) = entity
        .annotations
        .get_str(annotations::ODM_ENTITY_NAME)
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        targets.push(EntityTypeTarget {
            ord_id: OrdId::new(
                CROSS_DOMAIN_NAMESPACE,
                ResourceKind::EntityType,
                normalize_local_id(name),
                "v1",
            )
            .to_string(),
            visibility: None,
            scope: TargetScope::CrossDomain,
        });
    }

    if let Some(local) = local_entity_type(entity, ctx) {
        targets.push(EntityTypeTarget {
            ord_id: local.ord_id,
            visibility: Some(ctx.visibility(entity)),
            scope: TargetScope::Local,
        });
    }

    targets
}

/// Deduplicated targets of everything a service exposes; `None` when the
/// service exposes no mapped entity
pub fn entity_type_mapping(service: &Definition, ctx: &Context<'_>) -> Option<EntityTypeMapping> {
    let mut targets: IndexMap<String, EntityTypeTarget> = IndexMap::new();

    for entity in exposed_entities(service, ctx.graph) {
        for target in entity_targets(entity, ctx) {
            targets.entry(target.ord_id.clone()).or_insert(target);
        }
    }

    if targets.is_empty() {
        return None;
    }

    Some(EntityTypeMapping {
        entity_type_targets: targets.into_values().collect(),
    })
}

/// A local entity type together with where it was found
#[derive(Debug, Clone)]
pub struct EntityTypeSource<'g> {
    /// First entity declaring the type
    pub entity: &'g Definition,
    pub local: LocalEntityType,
    /// Services exposing the type, in discovery order
    pub services: Vec<&'g Definition>,
}

/// Collect the local entity types exposed by `services`, deduplicated by
/// identifier (first declaration wins)
pub fn collect_entity_types<'g>(
    services: &[&'g Definition],
    ctx: &Context<'g>,
) -> Vec<EntityTypeSource<'g>> {
    let mut sources: IndexMap<String, EntityTypeSource<'g>> = IndexMap::new();

    for &service in services {
        for entity in exposed_entities(service, ctx.graph) {
            let Some(local) = local_entity_type(entity, ctx) else {
                continue;
            };
            let source = sources
                .entry(local.ord_id.clone())
                .or_insert_with(|| EntityTypeSource {
                    entity,
                    local,
                    services: Vec::new(),
                });
            if !source.services.iter().any(|s| s.name == service.name) {
                source.services.push(service);
            }
        }
    }

    sources.into_values().collect()
}
