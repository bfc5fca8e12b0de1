//! MCP server API resource

use super::{PackageIds, PackageKind, RELEASE_STATUS};
use crate::context::Context;
use crate::identifier::{OrdId, ResourceKind};
use ordgen_common::{ApiResource, Extensible, Visibility};

pub const MCP_LOCAL_ID: &str = "mcp-server";

const MCP_PROTOCOL: &str = "mcp";

/// The MCP server resource, when enabled.
///
/// Identifier and visibility come from configuration only; no model
/// definition is involved.
pub fn mcp_resource(ctx: &Context<'_>, package_ids: &PackageIds) -> Option<ApiResource> {
    let settings = ctx.config.mcp.as_ref()?;
    if settings.visibility == Visibility::Private {
        return None;
    }

    let description = format!("MCP server of {}", ctx.config.app_name);
    Some(ApiResource {
        ord_id: OrdId::new(
            ctx.config.namespace.as_str(),
            ResourceKind::ApiResource,
            MCP_LOCAL_ID,
            "v1",
        )
        .to_string(),
        title: "MCP Server".to_string(),
        short_description: description.clone(),
        description,
        version: "1.0.0".to_string(),
        last_update: ctx.config.last_update.clone(),
        visibility: settings.visibility,
        part_of_package: package_ids.resolve(
            &ctx.config.namespace,
            PackageKind::Api,
            settings.visibility,
        ),
        part_of_groups: Vec::new(),
        release_status: RELEASE_STATUS.to_string(),
        api_protocol: MCP_PROTOCOL.to_string(),
        implementation_standard: None,
        direction: None,
        resource_definitions: Vec::new(),
        entry_points: vec![settings.entry_point.clone()],
        extensible: Extensible::default(),
        entity_type_mappings: Vec::new(),
    })
}
