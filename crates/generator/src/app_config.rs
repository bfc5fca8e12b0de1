//! Per-run configuration snapshot
//!
//! Resolved once at the start of a run from the project descriptor, the
//! override configuration and the model, then passed by reference to every
//! builder.

use crate::diagnostics::{Diagnostics, SynthesisWarning};
use crate::identifier::{default_namespace, is_valid_namespace, sanitize_app_name};
use chrono::{SecondsFormat, Utc};
use ordgen_common::{
    AccessStrategy, DefinitionGraph, OrdConfig, OrdError, ProductConfig, ProjectDescriptor,
    Result, Visibility,
};
use std::path::PathBuf;

/// Vendor used when none is configured
pub const DEFAULT_VENDOR: &str = "customer:vendor:customer:";

/// Policy level prefix under which the entity type catalog is governed
/// elsewhere and must not be generated
pub const CORE_POLICY_PREFIX: &str = "sap:core";

/// MCP entry point used when none is configured
pub const DEFAULT_MCP_ENTRY_POINT: &str = "/mcp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpSettings {
    pub entry_point: String,
    pub visibility: Visibility,
}

/// Resolved configuration for one synthesis run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// ORD namespace used in every compound identifier
    pub namespace: String,
    /// Model namespace stripped from local names
    pub app_namespace: Option<String>,
    /// Sanitized application name
    pub app_name: String,
    pub description: String,
    pub last_update: String,
    pub policy_levels: Vec<String>,
    /// Configured default visibility, if any
    pub default_visibility: Option<Visibility>,
    pub vendor: String,
    pub products: Vec<ProductConfig>,
    pub existing_product_ord_id: Option<String>,
    pub access_strategies: Vec<AccessStrategy>,
    pub mcp: Option<McpSettings>,
    pub exclude_entity_types_of_private_resources: bool,
}

impl AppConfig {
    /// Resolve the run configuration.
    ///
    /// Fails only when the project has no identity (missing descriptor or
    /// empty name) or when no valid ORD namespace can be determined.
    pub fn resolve(
        descriptor: Option<&ProjectDescriptor>,
        config: &OrdConfig,
        graph: &DefinitionGraph,
        diagnostics: &Diagnostics,
    ) -> Result<Self> {
        let descriptor = descriptor
            .ok_or_else(|| OrdError::MissingProjectDescriptor(PathBuf::from("package.json")))?;

        let app_name = sanitize_app_name(&descriptor.name);
        if app_name.is_empty() {
            return Err(OrdError::Config(format!(
                "project name '{}' yields an empty application name",
                descriptor.name
            )));
        }

        let namespace = match &config.namespace {
            Some(namespace) => namespace.clone(),
            None => default_namespace(&app_name),
        };
        if !is_valid_namespace(&namespace) {
            return Err(OrdError::InvalidNamespace {
                namespace,
                reason: "expected at least two lowercase alphanumeric segments separated by dots"
                    .to_string(),
            });
        }

        let default_visibility = config.default_visibility.as_deref().map(|raw| {
            raw.parse::<Visibility>().unwrap_or_else(|_| {
                diagnostics.report(SynthesisWarning::InvalidDefaultVisibility {
                    value: raw.to_string(),
                });
                Visibility::Public
            })
        });

        let mcp = config
            .mcp
            .as_ref()
            .filter(|mcp| mcp.enabled)
            .map(|mcp| McpSettings {
                entry_point: mcp
                    .entry_point
                    .clone()
                    .filter(|path| !path.is_empty())
                    .unwrap_or_else(|| DEFAULT_MCP_ENTRY_POINT.to_string()),
                visibility: match mcp.visibility.as_deref() {
                    None => Visibility::Public,
                    Some(raw) => raw.parse().unwrap_or_else(|_| {
                        diagnostics.report(SynthesisWarning::InvalidVisibility {
                            definition: "mcp".to_string(),
                            value: raw.to_string(),
                        });
                        Visibility::Public
                    }),
                },
            });

        let description = config
            .description
            .clone()
            .or_else(|| descriptor.description.clone())
            .unwrap_or_else(|| format!("ORD document for {app_name}"));

        let last_update = config
            .last_update
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));

        Ok(Self {
            namespace,
            app_namespace: graph.namespace.clone().filter(|ns| !ns.is_empty()),
            app_name,
            description,
            last_update,
            policy_levels: config.policy_levels.clone(),
            default_visibility,
            vendor: config
                .vendor
                .clone()
                .unwrap_or_else(|| DEFAULT_VENDOR.to_string()),
            products: config.products.clone(),
            existing_product_ord_id: config.existing_product_ord_id.clone(),
            access_strategies: normalize_access_strategies(&config.access_strategies, diagnostics),
            mcp,
            exclude_entity_types_of_private_resources: config
                .exclude_entity_types_of_private_resources,
        })
    }

    /// Whether a configured policy level governs entity types elsewhere
    pub fn suppresses_entity_types(&self) -> bool {
        self.policy_levels
            .iter()
            .any(|level| level.starts_with(CORE_POLICY_PREFIX))
    }
}

/// Turn configured strategy types into descriptors, defaulting to `open`.
///
/// `open` never co-occurs with another strategy; a mixed list keeps the
/// non-open entries.
fn normalize_access_strategies(
    configured: &[String],
    diagnostics: &Diagnostics,
) -> Vec<AccessStrategy> {
    if configured.is_empty() {
        return vec![AccessStrategy::open()];
    }

    let mut strategies: Vec<AccessStrategy> = Vec::new();
    for kind in configured {
        let strategy = AccessStrategy::new(kind.as_str());
        if !strategies.contains(&strategy) {
            strategies.push(strategy);
        }
    }

    let others: Vec<String> = strategies
        .iter()
        .filter(|s| !s.is_open())
        .map(|s| s.kind.clone())
        .collect();
    if !others.is_empty() && strategies.iter().any(AccessStrategy::is_open) {
        diagnostics.report(SynthesisWarning::MixedAccessStrategies { others });
        strategies.retain(|s| !s.is_open());
    }

    strategies
}
