//! Service groups

use crate::context::Context;
use crate::identifier::{group_id, SERVICE_GROUP_TYPE};
use ordgen_common::{Group, Visibility};

/// Group of a service; `None` for private or absent services
pub fn group(name: &str, ctx: &Context<'_>) -> Option<Group> {
    let service = super::service(name, ctx)?;
    if ctx.visibility(service) == Visibility::Private {
        return None;
    }

    let base = ctx.versioned_name(service).base;
    let title = if base.contains("Service") {
        base.clone()
    } else {
        format!("{base} Service")
    };

    Some(Group {
        group_id: group_id(&ctx.config.namespace, &base),
        group_type_id: SERVICE_GROUP_TYPE.to_string(),
        title,
    })
}
