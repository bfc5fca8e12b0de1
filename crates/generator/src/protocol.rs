//! Protocol resolution
//!
//! Decides which wire protocols a service is reachable through:
//!
//! - primary data products always get a single outbound data subscription
//!   entry and nothing else
//! - an explicit `@protocol` annotation is authoritative, there is no
//!   fallback to inferred protocols even when nothing usable remains
//! - without an annotation the framework endpoints are used, and a default
//!   OData V4 entry when the framework reports none
//!
//! Unsupported (GraphQL) and unknown names are reported and skipped.

use crate::context::Context;
use crate::diagnostics::SynthesisWarning;
use ordgen_common::{annotations, Definition};
use std::fmt;

/// Implementation standard of data subscription APIs
pub const DATA_SUBSCRIPTION_STANDARD: &str = "sap.dp:data-subscription-api:v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiProtocol {
    ODataV4,
    ODataV2,
    Rest,
    SapInaApiV1,
    SapSqlApiV1,
    DeltaSharing,
}

/// Machine-readable description formats served for a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    OpenApiV3,
    Edmx,
    CsnInterop,
}

impl DefinitionFormat {
    pub fn type_name(&self) -> &'static str {
        match self {
            DefinitionFormat::OpenApiV3 => "openapi-v3",
            DefinitionFormat::Edmx => "edmx",
            DefinitionFormat::CsnInterop => "sap-csn-interop-effective-v1",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            DefinitionFormat::OpenApiV3 | DefinitionFormat::CsnInterop => "application/json",
            DefinitionFormat::Edmx => "application/xml",
        }
    }

    pub fn file_suffix(&self) -> &'static str {
        match self {
            DefinitionFormat::OpenApiV3 => "oas3.json",
            DefinitionFormat::Edmx => "edmx",
            DefinitionFormat::CsnInterop => "csn.json",
        }
    }
}

impl ApiProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiProtocol::ODataV4 => "odata-v4",
            ApiProtocol::ODataV2 => "odata-v2",
            ApiProtocol::Rest => "rest",
            ApiProtocol::SapInaApiV1 => "sap-ina-api-v1",
            ApiProtocol::SapSqlApiV1 => "sap-sql-api-v1",
            ApiProtocol::DeltaSharing => "delta-sharing",
        }
    }

    /// Served by the framework itself, as opposed to reachable only
    /// through the discovery document
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiProtocol::ODataV4 | ApiProtocol::ODataV2 | ApiProtocol::Rest
        )
    }

    /// Path prefix the framework mounts services of this protocol under
    fn path_prefix(&self) -> &'static str {
        match self {
            ApiProtocol::ODataV4 => "/odata/v4",
            ApiProtocol::ODataV2 => "/odata/v2",
            ApiProtocol::Rest => "/rest",
            _ => "",
        }
    }

    /// Discovery-only protocols reachable under `@path`
    fn has_annotated_entry_point(&self) -> bool {
        matches!(self, ApiProtocol::SapInaApiV1 | ApiProtocol::DeltaSharing)
    }

    fn has_resource_definitions(&self) -> bool {
        !matches!(self, ApiProtocol::SapInaApiV1 | ApiProtocol::DeltaSharing)
    }
}

impl fmt::Display for ApiProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum ProtocolName {
    Known(ApiProtocol),
    Unsupported,
    Unknown,
}

fn lookup(name: &str) -> ProtocolName {
    match name.trim().to_ascii_lowercase().as_str() {
        "odata" | "odata-v4" => ProtocolName::Known(ApiProtocol::ODataV4),
        "odata-v2" => ProtocolName::Known(ApiProtocol::ODataV2),
        "rest" => ProtocolName::Known(ApiProtocol::Rest),
        "ina" | "sap-ina-api-v1" => ProtocolName::Known(ApiProtocol::SapInaApiV1),
        "sql" | "sap-sql-api-v1" => ProtocolName::Known(ApiProtocol::SapSqlApiV1),
        "delta-sharing" => ProtocolName::Known(ApiProtocol::DeltaSharing),
        "graphql" => ProtocolName::Unsupported,
        _ => ProtocolName::Unknown,
    }
}

/// One way a service is reachable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolEntry {
    pub protocol: ApiProtocol,
    /// Never contains empty placeholders; empty when no path is known
    pub entry_points: Vec<String>,
    pub has_resource_definitions: bool,
    pub implementation_standard: Option<&'static str>,
    pub outbound: bool,
}

impl ProtocolEntry {
    fn new(protocol: ApiProtocol, path: Option<String>) -> Self {
        Self {
            protocol,
            entry_points: path.into_iter().filter(|p| !p.is_empty()).collect(),
            has_resource_definitions: protocol.has_resource_definitions(),
            implementation_standard: None,
            outbound: false,
        }
    }

    /// Outbound data subscription of a primary data product
    pub fn data_subscription() -> Self {
        Self {
            protocol: ApiProtocol::Rest,
            entry_points: Vec::new(),
            has_resource_definitions: true,
            implementation_standard: Some(DATA_SUBSCRIPTION_STANDARD),
            outbound: true,
        }
    }

    /// Formats published as resource definitions for this entry
    pub fn definition_formats(&self) -> &'static [DefinitionFormat] {
        if !self.has_resource_definitions {
            return &[];
        }
        if self.implementation_standard == Some(DATA_SUBSCRIPTION_STANDARD) {
            return &[DefinitionFormat::CsnInterop];
        }
        match self.protocol {
            ApiProtocol::ODataV4 | ApiProtocol::ODataV2 => {
                &[DefinitionFormat::OpenApiV3, DefinitionFormat::Edmx]
            }
            ApiProtocol::Rest => &[DefinitionFormat::OpenApiV3],
            ApiProtocol::SapSqlApiV1 => &[DefinitionFormat::CsnInterop],
            ApiProtocol::SapInaApiV1 | ApiProtocol::DeltaSharing => &[],
        }
    }
}

/// Resolve the protocols of a service
pub fn resolve_protocols(service: &Definition, ctx: &Context<'_>) -> Vec<ProtocolEntry> {
    if ctx.is_primary_data_product(service) {
        return vec![ProtocolEntry::data_subscription()];
    }

    match service.annotations.get_str_list(annotations::PROTOCOL) {
        Some(names) => resolve_explicit(service, &names, ctx),
        None => resolve_inferred(service, ctx),
    }
}

fn resolve_explicit(
    service: &Definition,
    names: &[String],
    ctx: &Context<'_>,
) -> Vec<ProtocolEntry> {
    let mut entries: Vec<ProtocolEntry> = Vec::new();
    let mut skipped = false;

    for name in names {
        match lookup(name) {
            ProtocolName::Known(protocol) => {
                if entries.iter().any(|e| e.protocol == protocol) {
                    continue;
                }
                let path = if protocol.is_transport() {
                    Some(transport_path(service, protocol, ctx))
                } else if protocol.has_annotated_entry_point() {
                    annotated_path(service)
                } else {
                    None
                };
                entries.push(ProtocolEntry::new(protocol, path));
            }
            ProtocolName::Unsupported => {
                skipped = true;
                ctx.diagnostics.report(SynthesisWarning::UnsupportedProtocol {
                    service: service.name.clone(),
                    protocol: name.clone(),
                });
            }
            ProtocolName::Unknown => {
                skipped = true;
                ctx.diagnostics.report(SynthesisWarning::UnknownProtocol {
                    service: service.name.clone(),
                    protocol: name.clone(),
                });
            }
        }
    }

    if entries.is_empty() && !skipped {
        ctx.diagnostics.report(SynthesisWarning::NoProtocols {
            service: service.name.clone(),
        });
    }

    entries
}

fn resolve_inferred(service: &Definition, ctx: &Context<'_>) -> Vec<ProtocolEntry> {
    let mut entries: Vec<ProtocolEntry> = Vec::new();

    for endpoint in &service.endpoints {
        match lookup(&endpoint.kind) {
            ProtocolName::Known(protocol) if protocol.is_transport() => {
                if !entries.iter().any(|e| e.protocol == protocol) {
                    entries.push(ProtocolEntry::new(protocol, endpoint.path.clone()));
                }
            }
            ProtocolName::Known(_) => {
                tracing::debug!(
                    service = %service.name,
                    kind = %endpoint.kind,
                    "ignoring discovery-only endpoint reported by the framework"
                );
            }
            ProtocolName::Unsupported => {
                ctx.diagnostics.report(SynthesisWarning::UnsupportedProtocol {
                    service: service.name.clone(),
                    protocol: endpoint.kind.clone(),
                });
            }
            ProtocolName::Unknown => {
                ctx.diagnostics.report(SynthesisWarning::UnknownProtocol {
                    service: service.name.clone(),
                    protocol: endpoint.kind.clone(),
                });
            }
        }
    }

    if entries.is_empty() {
        let path = transport_path(service, ApiProtocol::ODataV4, ctx);
        entries.push(ProtocolEntry::new(ApiProtocol::ODataV4, Some(path)));
    }

    entries
}

/// Entry point of a framework-served protocol: the reported endpoint path,
/// else `@path`, else the default path derived from the service name
fn transport_path(service: &Definition, protocol: ApiProtocol, ctx: &Context<'_>) -> String {
    let reported = service.endpoints.iter().find_map(|endpoint| match lookup(&endpoint.kind) {
        ProtocolName::Known(p) if p == protocol => endpoint.path.clone(),
        _ => None,
    });
    if let Some(path) = reported.filter(|p| !p.is_empty()) {
        return path;
    }

    let segment = match service.annotations.get_str(annotations::PATH) {
        Some(path) if path.starts_with('/') => return path.to_string(),
        Some(path) if !path.is_empty() => path.to_string(),
        _ => default_path_segment(&ctx.versioned_name(service).base),
    };

    format!("{}/{}", protocol.path_prefix(), segment)
}

/// `@path` for discovery-only protocols; absent means no entry point
fn annotated_path(service: &Definition) -> Option<String> {
    let path = service.annotations.get_str(annotations::PATH)?;
    if path.is_empty() {
        None
    } else if path.starts_with('/') {
        Some(path.to_string())
    } else {
        Some(format!("/{path}"))
    }
}

/// `CatalogService` → `catalog`, `sub.BookOrderService` → `book-order`
pub fn default_path_segment(base_name: &str) -> String {
    let last = base_name.rsplit('.').next().unwrap_or(base_name);
    let trimmed = match last.strip_suffix("Service") {
        Some(rest) if !rest.is_empty() => rest,
        _ => last,
    };

    let mut segment = String::with_capacity(trimmed.len() + 4);
    let mut previous_lower = false;
    for c in trimmed.chars() {
        if c.is_ascii_uppercase() {
            if previous_lower {
                segment.push('-');
            }
            segment.push(c.to_ascii_lowercase());
            previous_lower = false;
        } else {
            segment.push(c);
            previous_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        }
    }
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::*;
    use crate::context::AnnotatedDataProducts;
    use crate::diagnostics::Diagnostics;
    use ordgen_common::DefinitionGraph;
    use serde_json::json;

    fn resolve(service: Definition) -> (Vec<ProtocolEntry>, Vec<SynthesisWarning>) {
        let config = app_config();
        let graph = DefinitionGraph::default();
        let diagnostics = Diagnostics::new();
        let ctx = Context::new(&config, &graph, &AnnotatedDataProducts, &diagnostics);
        let entries = resolve_protocols(&service, &ctx);
        (entries, diagnostics.into_warnings())
    }

    #[test]
    fn test_default_path_segment() {
        assert_eq!(default_path_segment("CatalogService"), "catalog");
        assert_eq!(default_path_segment("sub.BookOrderService"), "book-order");
        assert_eq!(default_path_segment("Service"), "service");
        assert_eq!(default_path_segment("Orders"), "orders");
    }

    #[test]
    fn test_primary_data_product_short_circuits() {
        let (entries, warnings) = resolve(
            service("DataService.v2")
                .annotate(annotations::DATA_PRODUCT_TYPE, "primary")
                .annotate(annotations::PROTOCOL, "graphql"),
        );
        assert_eq!(entries, vec![ProtocolEntry::data_subscription()]);
        assert!(entries[0].entry_points.is_empty());
        assert!(entries[0].has_resource_definitions);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_no_annotation_no_endpoints_falls_back_to_odata() {
        let (entries, warnings) = resolve(service("CatalogService"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].protocol, ApiProtocol::ODataV4);
        assert_eq!(entries[0].entry_points, vec!["/odata/v4/catalog".to_string()]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_framework_endpoints_are_used() {
        let (entries, _) = resolve(
            service("CatalogService")
                .with_endpoint("odata", Some("/odata/v4/browse"))
                .with_endpoint("rest", None),
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_points, vec!["/odata/v4/browse".to_string()]);
        assert_eq!(entries[1].protocol, ApiProtocol::Rest);
        assert!(entries[1].entry_points.is_empty());
    }

    #[test]
    fn test_graphql_annotation_warns_once_and_yields_nothing() {
        let (entries, warnings) =
            resolve(service("CatalogService").annotate(annotations::PROTOCOL, "graphql"));
        assert!(entries.is_empty());
        assert_eq!(
            warnings,
            vec![SynthesisWarning::UnsupportedProtocol {
                service: "my.bookshop.CatalogService".to_string(),
                protocol: "graphql".to_string(),
            }]
        );
    }

    #[test]
    fn test_explicit_discovery_only_protocols() {
        let (entries, warnings) = resolve(
            service("AnalyticsService")
                .annotate(annotations::PROTOCOL, json!(["ina", "sql", "soap"]))
                .annotate(annotations::PATH, "analytics"),
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].protocol, ApiProtocol::SapInaApiV1);
        assert_eq!(entries[0].entry_points, vec!["/analytics".to_string()]);
        assert!(!entries[0].has_resource_definitions);
        assert_eq!(entries[1].protocol, ApiProtocol::SapSqlApiV1);
        assert!(entries[1].entry_points.is_empty());
        assert!(entries[1].has_resource_definitions);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], SynthesisWarning::UnknownProtocol { .. }));
    }

    #[test]
    fn test_explicit_annotation_never_falls_back() {
        let (entries, warnings) = resolve(
            service("CatalogService")
                .annotate(annotations::PROTOCOL, json!([]))
                .with_endpoint("odata", Some("/odata/v4/catalog")),
        );
        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], SynthesisWarning::NoProtocols { .. }));
    }

    #[test]
    fn test_explicit_transport_prefers_reported_path_then_annotation() {
        let (entries, _) = resolve(
            service("CatalogService")
                .annotate(annotations::PROTOCOL, json!(["odata", "odata-v4", "rest"]))
                .annotate(annotations::PATH, "browse")
                .with_endpoint("odata", Some("/odata/v4/browse")),
        );
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_points, vec!["/odata/v4/browse".to_string()]);
        assert_eq!(entries[1].entry_points, vec!["/rest/browse".to_string()]);
    }

    #[test]
    fn test_entry_points_never_contain_empty_paths() {
        let (entries, _) = resolve(
            service("CatalogService")
                .with_endpoint("odata", Some(""))
                .with_endpoint("rest", None),
        );
        for entry in entries {
            assert!(entry.entry_points.iter().all(|p| !p.is_empty()));
        }
    }

    #[test]
    fn test_definition_formats() {
        let odata = ProtocolEntry::new(ApiProtocol::ODataV4, None);
        assert_eq!(
            odata.definition_formats(),
            &[DefinitionFormat::OpenApiV3, DefinitionFormat::Edmx]
        );
        assert_eq!(
            ProtocolEntry::data_subscription().definition_formats(),
            &[DefinitionFormat::CsnInterop]
        );
        assert!(ProtocolEntry::new(ApiProtocol::DeltaSharing, None)
            .definition_formats()
            .is_empty());
    }
}
