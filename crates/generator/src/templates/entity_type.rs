//! Entity type catalog

use super::{description_of, short_description, title_of, PackageIds, PackageKind, RELEASE_STATUS};
use crate::context::Context;
use crate::entity_types::EntityTypeSource;
use crate::identifier::group_id;
use indexmap::IndexSet;
use ordgen_common::{EntityType, Visibility};

/// Granularity reported for generated entity types
const ENTITY_TYPE_LEVEL: &str = "aggregate";

/// Materialize local entity types into catalog entries.
///
/// Each entry keeps the visibility of the entity declaring it, regardless of
/// the resources referencing it. Private entity types are omitted, and the
/// whole catalog is empty under a `sap:core` policy level. With the legacy
/// exclusion flag set, types exposed only by private services are dropped as
/// well.
pub fn entity_types(
    sources: &[EntityTypeSource<'_>],
    ctx: &Context<'_>,
    package_ids: &PackageIds,
) -> Vec<EntityType> {
    if ctx.config.suppresses_entity_types() {
        tracing::debug!("entity type catalog suppressed by policy level");
        return Vec::new();
    }

    sources
        .iter()
        .filter_map(|source| build(source, ctx, package_ids))
        .collect()
}

fn build(
    source: &EntityTypeSource<'_>,
    ctx: &Context<'_>,
    package_ids: &PackageIds,
) -> Option<EntityType> {
    let service_visibilities: Vec<Visibility> = source
        .services
        .iter()
        .map(|service| ctx.visibility(service))
        .collect();

    if ctx.config.exclude_entity_types_of_private_resources
        && service_visibilities
            .iter()
            .all(|visibility| *visibility == Visibility::Private)
    {
        tracing::debug!(
            entity_type = %source.local.ord_id,
            "excluding entity type exposed only by private services"
        );
        return None;
    }

    let visibility = ctx.visibility(source.entity);
    if visibility == Visibility::Private {
        return None;
    }

    let part_of_groups: IndexSet<String> = source
        .services
        .iter()
        .zip(&service_visibilities)
        .filter(|(_, visibility)| visibility.is_exposed())
        .map(|(service, _)| {
            group_id(&ctx.config.namespace, &ctx.versioned_name(service).base)
        })
        .collect();

    let local_id = &source.local.local_id;
    let description = description_of(source.entity, &format!("Entity type {local_id}"));

    Some(EntityType {
        ord_id: source.local.ord_id.clone(),
        local_id: local_id.clone(),
        title: title_of(source.entity, local_id),
        short_description: short_description(&description),
        description,
        version: source.local.version.semver(),
        last_update: ctx.config.last_update.clone(),
        visibility,
        part_of_package: package_ids.resolve(
            &ctx.config.namespace,
            PackageKind::EntityType,
            visibility,
        ),
        part_of_groups: part_of_groups.into_iter().collect(),
        release_status: RELEASE_STATUS.to_string(),
        level: ENTITY_TYPE_LEVEL.to_string(),
    })
}
