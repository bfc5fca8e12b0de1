//! Products

use crate::context::Context;
use crate::diagnostics::SynthesisWarning;
use ordgen_common::Product;

/// Vendor prefix reserved for products shipped by SAP itself
pub const RESERVED_VENDOR_PREFIX: &str = "sap:";

/// Products declared by the document.
///
/// Configured products are used as given, except those claiming the
/// reserved vendor prefix, which are reported and skipped. Without
/// configured products a default `customer:product:<app>:` is generated.
/// Nothing is generated when the application belongs to an existing product.
pub fn products(ctx: &Context<'_>) -> Vec<Product> {
    if ctx.config.existing_product_ord_id.is_some() {
        return Vec::new();
    }

    if ctx.config.products.is_empty() {
        let app_name = &ctx.config.app_name;
        return vec![Product {
            ord_id: format!("customer:product:{app_name}:"),
            title: app_name.clone(),
            short_description: format!("Default product of {app_name}"),
            vendor: ctx.config.vendor.clone(),
        }];
    }

    ctx.config
        .products
        .iter()
        .filter(|product| {
            if product.ord_id.starts_with(RESERVED_VENDOR_PREFIX) {
                ctx.diagnostics.report(SynthesisWarning::ReservedProductVendor {
                    ord_id: product.ord_id.clone(),
                    prefix: RESERVED_VENDOR_PREFIX.to_string(),
                });
                return false;
            }
            true
        })
        .map(|product| Product {
            ord_id: product.ord_id.clone(),
            title: product.title.clone(),
            short_description: product
                .short_description
                .clone()
                .unwrap_or_else(|| product.title.clone()),
            vendor: product
                .vendor
                .clone()
                .unwrap_or_else(|| ctx.config.vendor.clone()),
        })
        .collect()
}

/// Product identifiers packages belong to
pub fn product_ids(ctx: &Context<'_>, products: &[Product]) -> Vec<String> {
    match &ctx.config.existing_product_ord_id {
        Some(existing) => vec![existing.clone()],
        None => products.iter().map(|p| p.ord_id.clone()).collect(),
    }
}
