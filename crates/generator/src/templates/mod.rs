//! Resource template builders
//!
//! Each builder turns one definition (looked up by name) into zero or more
//! document entries. Builders never fail: absent or private definitions
//! simply produce nothing.

mod api;
mod data_product;
mod entity_type;
mod event;
mod group;
mod mcp;
mod package;
mod product;

pub use api::api_resources;
pub use data_product::data_products;
pub use entity_type::entity_types;
pub use event::event_resources;
pub use group::group;
pub use mcp::{mcp_resource, MCP_LOCAL_ID};
pub use package::{package, PackageCandidate, PackageIds, PackageKind};
pub use product::{product_ids, products, RESERVED_VENDOR_PREFIX};

use crate::context::Context;
use crate::identifier::group_id;
use ordgen_common::{AccessStrategy, Definition, ResourceDefinition, Visibility};

/// Release status of every generated resource
pub(crate) const RELEASE_STATUS: &str = "active";

/// Upper bound for `shortDescription`
const SHORT_DESCRIPTION_MAX: usize = 250;

/// `@title`/`@Common.Label`, else the fallback
pub(crate) fn title_of(definition: &Definition, fallback: &str) -> String {
    definition
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// `@description`/`@Core.Description`, else the fallback
pub(crate) fn description_of(definition: &Definition, fallback: &str) -> String {
    definition
        .description()
        .filter(|d| !d.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

/// First line of a description, cut to the short description limit
pub(crate) fn short_description(description: &str) -> String {
    let first_line = description.lines().next().unwrap_or_default().trim();
    match first_line.char_indices().nth(SHORT_DESCRIPTION_MAX) {
        Some((cut, _)) => first_line[..cut].to_string(),
        None => first_line.to_string(),
    }
}

pub(crate) fn resource_definition(
    kind: &str,
    media_type: &str,
    url: String,
    access_strategies: &[AccessStrategy],
) -> ResourceDefinition {
    ResourceDefinition {
        kind: kind.to_string(),
        media_type: media_type.to_string(),
        url,
        access_strategies: access_strategies.to_vec(),
    }
}

/// Groups a service's resources belong to; none when the service itself is
/// private, since no group is emitted for it
pub(crate) fn service_groups(service: &Definition, ctx: &Context<'_>) -> Vec<String> {
    if ctx.visibility(service) == Visibility::Private {
        return Vec::new();
    }
    vec![group_id(
        &ctx.config.namespace,
        &ctx.versioned_name(service).base,
    )]
}

/// Look a service up by name
pub(crate) fn service<'g>(name: &str, ctx: &Context<'g>) -> Option<&'g Definition> {
    ctx.graph.get(name).filter(|d| d.is_service())
}
