//! Document assembly
//!
//! One pass over the graph: filter the services that belong in the document,
//! run every template builder and keep only the packages something points at.

use crate::context::Context;
use crate::diagnostics::SynthesisWarning;
use crate::entity_types::collect_entity_types;
use crate::templates::{
    api_resources, data_products, entity_types, event_resources, group, mcp_resource, package,
    product_ids, products, PackageIds,
};
use indexmap::{IndexMap, IndexSet};
use ordgen_common::{
    annotations, ApiResource, DataProduct, Definition, Document, EventResource, ORD_VERSION,
};

/// Name prefix of the multitenancy infrastructure services
pub const MTX_SERVICE_PREFIX: &str = "cds.xt.";

/// Whether a service takes part in the document at all
pub fn is_document_service(service: &Definition) -> bool {
    if service.name.starts_with(MTX_SERVICE_PREFIX) {
        tracing::debug!(service = %service.name, "skipping multitenancy service");
        return false;
    }
    if service.annotations.is_set(annotations::EXTERNAL) {
        tracing::debug!(service = %service.name, "skipping external service");
        return false;
    }
    true
}

/// Resources of one kind keyed by ordId, remembering which definition
/// produced each. The first producer of an id wins.
struct UniqueResources<T> {
    entries: IndexMap<String, (String, T)>,
}

impl<T> UniqueResources<T> {
    fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    fn extend(
        &mut self,
        source: &str,
        resources: impl IntoIterator<Item = T>,
        ord_id: impl Fn(&T) -> &str,
        ctx: &Context<'_>,
    ) {
        for resource in resources {
            let id = ord_id(&resource);
            if let Some((kept, _)) = self.entries.get(id) {
                ctx.diagnostics.report(SynthesisWarning::DuplicateOrdId {
                    ord_id: id.to_string(),
                    kept: kept.clone(),
                    dropped: source.to_string(),
                });
                continue;
            }
            self.entries
                .insert(id.to_string(), (source.to_string(), resource));
        }
    }

    fn into_vec(self) -> Vec<T> {
        self.entries.into_values().map(|(_, resource)| resource).collect()
    }
}

fn api_ord_id(resource: &ApiResource) -> &str {
    &resource.ord_id
}

fn event_ord_id(resource: &EventResource) -> &str {
    &resource.ord_id
}

fn data_product_ord_id(product: &DataProduct) -> &str {
    &product.ord_id
}

/// Build the document for an already resolved run context
pub fn assemble<'a>(ctx: &Context<'a>) -> Document {
    let services: Vec<&'a Definition> = ctx
        .graph
        .services()
        .filter(|service| is_document_service(service))
        .collect();
    tracing::debug!(services = services.len(), "assembling document");

    let package_ids = PackageIds::for_app(ctx);
    let access_strategies = &ctx.config.access_strategies;

    let mut groups = IndexMap::new();
    for service in &services {
        if let Some(group) = group(&service.name, ctx) {
            groups.entry(group.group_id.clone()).or_insert(group);
        }
    }

    let mut api = UniqueResources::new();
    let mut events = UniqueResources::new();
    let mut data = UniqueResources::new();
    for service in &services {
        let name = service.name.as_str();
        api.extend(
            name,
            api_resources(name, ctx, &package_ids, access_strategies),
            api_ord_id,
            ctx,
        );
        events.extend(
            name,
            event_resources(name, ctx, &package_ids, access_strategies),
            event_ord_id,
            ctx,
        );
        data.extend(name, data_products(name, ctx, &package_ids), data_product_ord_id, ctx);
    }
    api.extend("mcp", mcp_resource(ctx, &package_ids), api_ord_id, ctx);
    let (api, events, data) = (api.into_vec(), events.into_vec(), data.into_vec());

    let sources = collect_entity_types(&services, ctx);
    let catalog = entity_types(&sources, ctx, &package_ids);

    let products = products(ctx);
    let product_ids = product_ids(ctx, &products);

    let referenced: IndexSet<&str> = api
        .iter()
        .filter_map(|r| r.part_of_package.as_deref())
        .chain(events.iter().filter_map(|r| r.part_of_package.as_deref()))
        .chain(catalog.iter().filter_map(|e| e.part_of_package.as_deref()))
        .chain(data.iter().filter_map(|d| d.part_of_package.as_deref()))
        .collect();
    let packages = package_ids
        .candidates()
        .iter()
        .filter(|candidate| referenced.contains(candidate.ord_id.as_str()))
        .map(|candidate| package(candidate, ctx, &product_ids))
        .collect();

    Document {
        open_resource_discovery: ORD_VERSION.to_string(),
        policy_levels: ctx.config.policy_levels.clone(),
        description: ctx.config.description.clone(),
        products,
        packages,
        groups: groups.into_values().collect(),
        api_resources: api,
        event_resources: events,
        entity_types: catalog,
        data_products: data,
    }
}
