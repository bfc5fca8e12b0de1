//! Integration tests for document synthesis

use ordgen_common::{
    annotations, Definition, DefinitionGraph, DefinitionKind, Document, OrdConfig, OrdError,
    ProjectDescriptor, RelationshipKind, Visibility,
};
use ordgen_generator::{OrdGenerator, Synthesis, SynthesisWarning};
use regex::Regex;
use serde_json::json;

const APP: &str = "my.bookshop";

fn service(name: &str) -> Definition {
    Definition::new(format!("{APP}.{name}"), DefinitionKind::Service)
}

fn owned(service: &str, name: &str, kind: DefinitionKind) -> Definition {
    let service = format!("{APP}.{service}");
    Definition::new(format!("{service}.{name}"), kind).owned_by(service)
}

fn config() -> OrdConfig {
    OrdConfig {
        namespace: Some("sap.sample".to_string()),
        last_update: Some("2024-01-01T00:00:00Z".to_string()),
        ..OrdConfig::default()
    }
}

fn synthesize(graph: DefinitionGraph) -> Synthesis {
    synthesize_with(graph, &config())
}

fn synthesize_with(graph: DefinitionGraph, config: &OrdConfig) -> Synthesis {
    OrdGenerator::new(graph)
        .generate(Some(&ProjectDescriptor::new("bookshop")), config)
        .unwrap()
}

fn bookshop() -> DefinitionGraph {
    DefinitionGraph::new(Some(APP))
        .with(service("CatalogService").annotate(annotations::TITLE, "Catalog"))
        .with(
            owned("CatalogService", "Books", DefinitionKind::Entity)
                .annotate(annotations::ODM_ENTITY_NAME, "Book")
                .annotate(annotations::ENTITY_TYPE, "Book:v2")
                .relates_to(RelationshipKind::Association, "my.bookshop.Authors"),
        )
        .with(
            Definition::new("my.bookshop.Authors", DefinitionKind::Entity)
                .annotate(annotations::ENTITY_TYPE, "Author:v1b")
                .relates_to(RelationshipKind::Association, "my.bookshop.CatalogService.Books"),
        )
        .with(owned("CatalogService", "BookOrdered", DefinitionKind::Event))
        .with(service("AdminService").annotate(annotations::VISIBILITY, "internal"))
        .with(owned("AdminService", "Orders", DefinitionKind::Entity))
        .with(owned("AdminService", "OrderChanged", DefinitionKind::Event))
        .with(
            service("AnalyticsService")
                .annotate(annotations::PROTOCOL, json!(["odata", "ina", "sql"]))
                .annotate(annotations::PATH, "analytics"),
        )
        .with(service("DataService.v2").annotate(annotations::DATA_PRODUCT_TYPE, "primary"))
        .with(
            owned("DataService.v2", "Orders", DefinitionKind::Entity)
                .annotate(annotations::ENTITY_TYPE, "Order"),
        )
}

#[test]
fn test_single_public_service_round_trip() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("CatalogService"))
        .with(owned("CatalogService", "Books", DefinitionKind::Entity));

    let synthesis = synthesize(graph);
    let document = &synthesis.document;

    assert_eq!(document.groups.len(), 1);
    assert_eq!(document.api_resources.len(), 1);
    assert!(document.event_resources.is_empty());
    assert!(document.entity_types.is_empty());
    let packages: Vec<&str> = document.packages.iter().map(|p| p.ord_id.as_str()).collect();
    assert_eq!(packages, vec!["sap.sample:package:bookshop-api-public:v1"]);
    assert_eq!(
        document.api_resources[0].part_of_package.as_deref(),
        Some(packages[0])
    );
    assert!(synthesis.warnings.is_empty());
}

#[test]
fn test_graphql_only_service_warns_once() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("GraphService").annotate(annotations::PROTOCOL, "graphql"));

    let synthesis = synthesize(graph);
    assert!(synthesis.document.api_resources.is_empty());
    assert_eq!(synthesis.warnings.len(), 1);
    assert!(matches!(
        synthesis.warnings[0],
        SynthesisWarning::UnsupportedProtocol { .. }
    ));
}

#[test]
fn test_multitenancy_services_filtered_out() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(Definition::new(
            "cds.xt.ModelProviderService",
            DefinitionKind::Service,
        ))
        .with(
            Definition::new("cds.xt.ModelProviderService.Changed", DefinitionKind::Event)
                .owned_by("cds.xt.ModelProviderService"),
        )
        .with(service("AdminService").annotate(annotations::VISIBILITY, "internal"))
        .with(owned("AdminService", "OrderChanged", DefinitionKind::Event));

    let document = synthesize(graph).document;
    assert_eq!(document.api_resources.len(), 1);
    assert_eq!(document.event_resources.len(), 1);
    assert_eq!(document.groups.len(), 1);
    assert_eq!(document.event_resources[0].visibility, Visibility::Internal);
}

#[test]
fn test_external_services_filtered_out() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("RemoteService").annotate(annotations::EXTERNAL, true))
        .with(service("CatalogService"));

    let document = synthesize(graph).document;
    assert_eq!(document.api_resources.len(), 1);
    assert_eq!(
        document.api_resources[0].ord_id,
        "sap.sample:apiResource:CatalogService:v1"
    );
}

#[test]
fn test_data_product_version_suffix() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("DataService.v2").annotate(annotations::DATA_PRODUCT_TYPE, "primary"))
        .with(service("DataService.v1.1").annotate(annotations::DATA_PRODUCT_TYPE, "primary"));

    let document = synthesize(graph).document;
    let data: Vec<(&str, &str)> = document
        .data_products
        .iter()
        .map(|d| (d.ord_id.as_str(), d.version.as_str()))
        .collect();
    assert_eq!(
        data,
        vec![
            ("sap.sample:dataProduct:DataService:v2", "2.0.0"),
            ("sap.sample:dataProduct:DataService.v1.1:v1", "1.0.0"),
        ]
    );

    let api = &document.api_resources[0];
    assert_eq!(api.ord_id, "sap.sample:apiResource:DataService:v2");
    assert_eq!(api.visibility, Visibility::Internal);
    assert_eq!(api.direction.as_deref(), Some("outbound"));
    assert_eq!(
        document.data_products[0].output_ports[0].ord_id,
        api.ord_id
    );
}

#[test]
fn test_every_identifier_matches_the_ord_format() {
    let pattern = Regex::new(
        r"^[a-z0-9.]+:(package|apiResource|eventResource|entityType|dataProduct):[a-zA-Z0-9._/-]+:(v0|v[1-9][0-9]*)$",
    )
    .unwrap();

    let mut config = config();
    config.mcp = Some(ordgen_common::McpConfig {
        enabled: true,
        entry_point: None,
        visibility: None,
    });
    let document = synthesize_with(bookshop(), &config).document;

    let ids = document.ord_ids();
    assert!(ids.len() > 10);
    for id in ids {
        // lettered entity type versions are kept verbatim in the identifier
        if id.ends_with(":v1b") {
            continue;
        }
        assert!(pattern.is_match(id), "{id} is not a valid ORD id");
    }
}

#[test]
fn test_entity_type_mappings_are_deduplicated_and_stable() {
    let first = synthesize(bookshop()).document;
    let second = synthesize(bookshop()).document;

    for api in &first.api_resources {
        for mapping in &api.entity_type_mappings {
            let mut ids: Vec<&str> = mapping
                .entity_type_targets
                .iter()
                .map(|t| t.ord_id.as_str())
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate targets in {}", api.ord_id);
        }
    }

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_private_service_emits_no_events() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("AdminService").annotate(annotations::VISIBILITY, "private"))
        .with(
            owned("AdminService", "Changed", DefinitionKind::Event)
                .annotate(annotations::VISIBILITY, "public"),
        );

    let document = synthesize(graph).document;
    assert!(document.api_resources.is_empty());
    assert!(document.event_resources.is_empty());
    assert!(document.groups.is_empty());
    assert!(document.packages.is_empty());
}

#[test]
fn test_unversioned_and_v1_services_share_one_identifier() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("DataService"))
        .with(service("DataService.v1"));

    let synthesis = synthesize(graph);
    let ids: Vec<&str> = synthesis
        .document
        .api_resources
        .iter()
        .map(|r| r.ord_id.as_str())
        .collect();
    assert_eq!(ids, vec!["sap.sample:apiResource:DataService:v1"]);
    assert!(matches!(
        synthesis.warnings.as_slice(),
        [SynthesisWarning::DuplicateOrdId { kept, dropped, .. }]
            if kept == "my.bookshop.DataService" && dropped == "my.bookshop.DataService.v1"
    ));
    assert_eq!(synthesis.errors().count(), 0);
}

#[test]
fn test_private_service_keeps_public_entity_type() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("AdminService").annotate(annotations::VISIBILITY, "private"))
        .with(
            owned("AdminService", "Customers", DefinitionKind::Entity)
                .annotate(annotations::ENTITY_TYPE, "Customer"),
        )
        .with(owned("AdminService", "CustomerChanged", DefinitionKind::Event));

    let document = synthesize(graph).document;
    assert!(document.api_resources.is_empty());
    assert!(document.event_resources.is_empty());
    assert!(document.groups.is_empty());

    assert_eq!(document.entity_types.len(), 1);
    assert_eq!(
        document.entity_types[0].ord_id,
        "sap.sample:entityType:Customer:v1"
    );
    assert_eq!(document.entity_types[0].visibility, Visibility::Public);
}

#[test]
fn test_legacy_exclusion_flag() {
    let graph = DefinitionGraph::new(Some(APP))
        .with(service("AdminService").annotate(annotations::VISIBILITY, "private"))
        .with(
            owned("AdminService", "Customers", DefinitionKind::Entity)
                .annotate(annotations::ENTITY_TYPE, "Customer"),
        );
    let config = OrdConfig {
        exclude_entity_types_of_private_resources: true,
        ..config()
    };

    assert!(synthesize_with(graph, &config).document.entity_types.is_empty());
}

#[test]
fn test_bookshop_document_shape() {
    let synthesis = synthesize(bookshop());
    let document: &Document = &synthesis.document;

    assert_eq!(document.open_resource_discovery, "1.12");
    assert_eq!(document.products[0].ord_id, "customer:product:bookshop:");

    let api_ids: Vec<&str> = document
        .api_resources
        .iter()
        .map(|r| r.ord_id.as_str())
        .collect();
    assert_eq!(
        api_ids,
        vec![
            "sap.sample:apiResource:CatalogService:v1",
            "sap.sample:apiResource:AdminService:v1",
            "sap.sample:apiResource:AnalyticsService:v1",
            "sap.sample:apiResource:AnalyticsService-sap-ina-api-v1:v1",
            "sap.sample:apiResource:AnalyticsService-sap-sql-api-v1:v1",
            "sap.sample:apiResource:DataService:v2",
        ]
    );

    let ina = &document.api_resources[3];
    assert_eq!(ina.entry_points, vec!["/analytics".to_string()]);
    assert!(ina.resource_definitions.is_empty());

    let catalog = &document.api_resources[0];
    let targets: Vec<&str> = catalog.entity_type_mappings[0]
        .entity_type_targets
        .iter()
        .map(|t| t.ord_id.as_str())
        .collect();
    assert_eq!(
        targets,
        vec![
            "sap.odm:entityType:Book:v1",
            "sap.sample:entityType:Book:v2",
            "sap.sample:entityType:Author:v1b",
        ]
    );

    let entity_types: Vec<&str> = document
        .entity_types
        .iter()
        .map(|e| e.ord_id.as_str())
        .collect();
    assert_eq!(
        entity_types,
        vec![
            "sap.sample:entityType:Book:v2",
            "sap.sample:entityType:Author:v1b",
            "sap.sample:entityType:Order:v1",
        ]
    );

    let events: Vec<(&str, Visibility)> = document
        .event_resources
        .iter()
        .map(|e| (e.ord_id.as_str(), e.visibility))
        .collect();
    assert_eq!(
        events,
        vec![
            ("sap.sample:eventResource:CatalogService:v1", Visibility::Public),
            ("sap.sample:eventResource:AdminService:v1", Visibility::Internal),
        ]
    );

    // one lettered version warning, nothing else
    assert_eq!(synthesis.warnings.len(), 1);
    assert!(matches!(
        synthesis.warnings[0],
        SynthesisWarning::LetteredVersion { .. }
    ));
}

#[test]
fn test_core_policy_level_suppresses_entity_types() {
    let config = OrdConfig {
        policy_levels: vec!["sap:core:v1".to_string()],
        ..config()
    };
    let document = synthesize_with(bookshop(), &config).document;

    assert!(document.entity_types.is_empty());
    assert_eq!(document.policy_levels, vec!["sap:core:v1".to_string()]);
    assert!(!document.packages.iter().any(|p| p.ord_id.contains("entityType")));
}

#[test]
fn test_missing_descriptor_is_fatal() {
    let result = OrdGenerator::new(bookshop()).generate(None, &config());
    assert!(matches!(result, Err(OrdError::MissingProjectDescriptor(_))));
}

#[test]
fn test_invalid_namespace_is_fatal() {
    let config = OrdConfig {
        namespace: Some("sample".to_string()),
        ..config()
    };
    let result = OrdGenerator::new(bookshop())
        .generate(Some(&ProjectDescriptor::new("bookshop")), &config);
    assert!(matches!(result, Err(OrdError::InvalidNamespace { .. })));
}

#[test]
fn test_reserved_product_is_reported_as_error() {
    let config = OrdConfig {
        products: vec![ordgen_common::ProductConfig {
            ord_id: "sap:product:Bookshop:".to_string(),
            title: "Bookshop".to_string(),
            short_description: None,
            vendor: None,
        }],
        ..config()
    };
    let synthesis = synthesize_with(bookshop(), &config);

    assert!(synthesis.document.products.is_empty());
    assert_eq!(synthesis.errors().count(), 1);
}
