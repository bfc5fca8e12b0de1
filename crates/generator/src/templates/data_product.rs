//! Data products

use super::{description_of, short_description, title_of, PackageIds, PackageKind, RELEASE_STATUS};
use crate::context::Context;
use crate::entity_types::entity_type_mapping;
use crate::identifier::{OrdId, ResourceKind};
use ordgen_common::{DataProduct, OutputPort, Visibility};

const DATA_PRODUCT_TYPE: &str = "primary";
const DATA_PRODUCT_CATEGORY: &str = "business-object";
const LIFECYCLE_STATUS: &str = "active";

/// The data product of a primary data product service.
///
/// Its single output port is the service's data subscription API resource.
pub fn data_products(name: &str, ctx: &Context<'_>, package_ids: &PackageIds) -> Vec<DataProduct> {
    let Some(service) = super::service(name, ctx) else {
        return Vec::new();
    };
    if !ctx.is_primary_data_product(service) {
        return Vec::new();
    }
    let visibility = ctx.visibility(service);
    if visibility == Visibility::Private {
        return Vec::new();
    }

    let versioned = ctx.versioned_name(service);
    let ord_id = |kind| {
        OrdId::new(
            ctx.config.namespace.as_str(),
            kind,
            versioned.base.as_str(),
            versioned.tag(),
        )
        .to_string()
    };
    let description = description_of(
        service,
        &format!("Data product of service {}", ctx.local_name(service)),
    );

    vec![DataProduct {
        ord_id: ord_id(ResourceKind::DataProduct),
        local_id: versioned.base.clone(),
        title: title_of(service, &versioned.base),
        short_description: short_description(&description),
        description,
        version: versioned.semver(),
        last_update: ctx.config.last_update.clone(),
        visibility,
        part_of_package: package_ids.resolve(
            &ctx.config.namespace,
            PackageKind::DataProduct,
            visibility,
        ),
        release_status: RELEASE_STATUS.to_string(),
        lifecycle_status: LIFECYCLE_STATUS.to_string(),
        kind: DATA_PRODUCT_TYPE.to_string(),
        category: DATA_PRODUCT_CATEGORY.to_string(),
        output_ports: vec![OutputPort {
            ord_id: ord_id(ResourceKind::ApiResource),
        }],
        entity_type_mappings: entity_type_mapping(service, ctx).into_iter().collect(),
    }]
}
