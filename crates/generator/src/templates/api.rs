//! API resources

use super::{
    description_of, resource_definition, service_groups, short_description, title_of, PackageIds,
    PackageKind, RELEASE_STATUS,
};
use crate::context::Context;
use crate::entity_types::entity_type_mapping;
use crate::identifier::{OrdId, ResourceKind};
use crate::protocol::{resolve_protocols, ProtocolEntry};
use ordgen_common::{AccessStrategy, ApiResource, Extensible, ResourceDefinition, Visibility};

/// API resources of a service, one per resolved protocol.
///
/// The first protocol keeps the plain local id; every further one gets a
/// `-<apiProtocol>` suffix so identifiers stay unique.
pub fn api_resources(
    name: &str,
    ctx: &Context<'_>,
    package_ids: &PackageIds,
    access_strategies: &[AccessStrategy],
) -> Vec<ApiResource> {
    let Some(service) = super::service(name, ctx) else {
        return Vec::new();
    };
    let visibility = ctx.visibility(service);
    if visibility == Visibility::Private {
        return Vec::new();
    }

    let local = ctx.local_name(service);
    let versioned = ctx.versioned_name(service);
    let title = title_of(service, &versioned.base);
    let description = description_of(service, &format!("API of service {local}"));
    let part_of_package =
        package_ids.resolve(&ctx.config.namespace, PackageKind::Api, visibility);
    let part_of_groups = service_groups(service, ctx);
    let entity_type_mappings: Vec<_> = entity_type_mapping(service, ctx).into_iter().collect();

    resolve_protocols(service, ctx)
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let local_id = if index == 0 {
                versioned.base.clone()
            } else {
                format!("{}-{}", versioned.base, entry.protocol)
            };
            let ord_id = OrdId::new(
                ctx.config.namespace.as_str(),
                ResourceKind::ApiResource,
                local_id,
                versioned.tag(),
            )
            .to_string();

            ApiResource {
                resource_definitions: definitions(entry, &ord_id, local, access_strategies),
                ord_id,
                title: title.clone(),
                short_description: short_description(&description),
                description: description.clone(),
                version: versioned.semver(),
                last_update: ctx.config.last_update.clone(),
                visibility,
                part_of_package: part_of_package.clone(),
                part_of_groups: part_of_groups.clone(),
                release_status: RELEASE_STATUS.to_string(),
                api_protocol: entry.protocol.as_str().to_string(),
                implementation_standard: entry.implementation_standard.map(str::to_string),
                direction: entry.outbound.then(|| "outbound".to_string()),
                entry_points: entry.entry_points.clone(),
                extensible: Extensible::default(),
                entity_type_mappings: entity_type_mappings.clone(),
            }
        })
        .collect()
}

fn definitions(
    entry: &ProtocolEntry,
    ord_id: &str,
    local: &str,
    access_strategies: &[AccessStrategy],
) -> Vec<ResourceDefinition> {
    entry
        .definition_formats()
        .iter()
        .map(|format| {
            resource_definition(
                format.type_name(),
                format.media_type(),
                format!("/ord/v1/{ord_id}/{local}.{}", format.file_suffix()),
                access_strategies,
            )
        })
        .collect()
}
