//! Event resources

use super::{
    description_of, resource_definition, service_groups, short_description, title_of, PackageIds,
    PackageKind, RELEASE_STATUS,
};
use crate::context::Context;
use crate::entity_types::entity_type_mapping;
use crate::identifier::{OrdId, ResourceKind};
use ordgen_common::{AccessStrategy, DefinitionKind, EventResource, Extensible};

/// The event resource of a service.
///
/// A non-private service contributes one event resource when at least one
/// of its events is not private. The resource takes the most open visibility
/// among those events.
pub fn event_resources(
    name: &str,
    ctx: &Context<'_>,
    package_ids: &PackageIds,
    access_strategies: &[AccessStrategy],
) -> Vec<EventResource> {
    let Some(service) = super::service(name, ctx) else {
        return Vec::new();
    };
    if !ctx.visibility(service).is_exposed() {
        return Vec::new();
    }

    let Some(visibility) = ctx
        .graph
        .owned_by(&service.name, DefinitionKind::Event)
        .map(|event| ctx.visibility(event))
        .filter(|visibility| visibility.is_exposed())
        .reduce(|a, b| a.most_open(b))
    else {
        return Vec::new();
    };

    let local = ctx.local_name(service);
    let versioned = ctx.versioned_name(service);
    let ord_id = OrdId::new(
        ctx.config.namespace.as_str(),
        ResourceKind::EventResource,
        versioned.base.as_str(),
        versioned.tag(),
    )
    .to_string();
    let description = description_of(service, &format!("Events emitted by service {local}"));

    vec![EventResource {
        resource_definitions: vec![resource_definition(
            "asyncapi-v2",
            "application/json",
            format!("/ord/v1/{ord_id}/{local}.asyncapi2.json"),
            access_strategies,
        )],
        ord_id,
        title: format!("{} Events", title_of(service, &versioned.base)),
        short_description: short_description(&description),
        description,
        version: versioned.semver(),
        last_update: ctx.config.last_update.clone(),
        visibility,
        part_of_package: package_ids.resolve(&ctx.config.namespace, PackageKind::Event, visibility),
        part_of_groups: service_groups(service, ctx),
        release_status: RELEASE_STATUS.to_string(),
        extensible: Extensible::default(),
        entity_type_mappings: entity_type_mapping(service, ctx).into_iter().collect(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::*;
    use crate::context::AnnotatedDataProducts;
    use crate::diagnostics::Diagnostics;
    use ordgen_common::{annotations, DefinitionGraph, Visibility};

    fn build(graph: &DefinitionGraph, name: &str) -> Vec<EventResource> {
        let config = app_config();
        let diagnostics = Diagnostics::new();
        let ctx = Context::new(&config, graph, &AnnotatedDataProducts, &diagnostics);
        let package_ids = PackageIds::for_app(&ctx);
        event_resources(name, &ctx, &package_ids, &config.access_strategies)
    }

    #[test]
    fn test_service_without_events_yields_nothing() {
        let graph = DefinitionGraph::default().with(service("CatalogService"));
        assert!(build(&graph, "my.bookshop.CatalogService").is_empty());
    }

    #[test]
    fn test_one_resource_per_service() {
        let graph = DefinitionGraph::default()
            .with(service("CatalogService"))
            .with(owned("CatalogService", "BookCreated", DefinitionKind::Event))
            .with(owned("CatalogService", "BookDeleted", DefinitionKind::Event));

        let events = build(&graph, "my.bookshop.CatalogService");
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].ord_id,
            "sap.sample:eventResource:CatalogService:v1"
        );
        assert_eq!(events[0].title, "CatalogService Events");
        assert_eq!(events[0].resource_definitions[0].kind, "asyncapi-v2");
        assert_eq!(
            events[0].part_of_package.as_deref(),
            Some("sap.sample:package:bookshop-event-public:v1")
        );
    }

    #[test]
    fn test_most_open_event_visibility_wins() {
        let graph = DefinitionGraph::default()
            .with(service("AdminService").annotate(annotations::VISIBILITY, "internal"))
            .with(owned("AdminService", "Audited", DefinitionKind::Event))
            .with(
                owned("AdminService", "Hidden", DefinitionKind::Event)
                    .annotate(annotations::VISIBILITY, "private"),
            );

        let events = build(&graph, "my.bookshop.AdminService");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].visibility, Visibility::Internal);
    }

    #[test]
    fn test_private_events_only_yield_nothing() {
        let graph = DefinitionGraph::default()
            .with(service("AdminService").annotate(annotations::VISIBILITY, "private"))
            .with(owned("AdminService", "Changed", DefinitionKind::Event));
        assert!(build(&graph, "my.bookshop.AdminService").is_empty());
    }

    #[test]
    fn test_private_service_hides_public_events() {
        let graph = DefinitionGraph::default()
            .with(service("AdminService").annotate(annotations::VISIBILITY, "private"))
            .with(
                owned("AdminService", "Changed", DefinitionKind::Event)
                    .annotate(annotations::VISIBILITY, "public"),
            );
        assert!(build(&graph, "my.bookshop.AdminService").is_empty());
    }
}
