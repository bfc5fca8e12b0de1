//! Open Resource Discovery document synthesis
//!
//! This crate turns a linked definition graph into an ORD document:
//! packages, groups, API and event resources, entity types, data products
//! and products. Synthesis is a pure function of the graph, the project
//! descriptor and the override configuration; anomalies are reported as
//! warnings rather than failing the run.

pub mod app_config;
pub mod assembler;
pub mod context;
pub mod diagnostics;
pub mod entity_types;
pub mod identifier;
pub mod protocol;
pub mod templates;
pub mod visibility;

pub use app_config::AppConfig;
pub use context::{AnnotatedDataProducts, Context, DataProductStrategy};
pub use diagnostics::{Diagnostics, Severity, SynthesisWarning};

use ordgen_common::{DefinitionGraph, Document, OrdConfig, ProjectDescriptor, Result};
use std::fs;
use std::path::Path;

/// A generated document together with everything reported while building it
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub document: Document,
    pub warnings: Vec<SynthesisWarning>,
}

impl Synthesis {
    /// Warnings of error severity
    pub fn errors(&self) -> impl Iterator<Item = &SynthesisWarning> {
        self.warnings
            .iter()
            .filter(|w| w.severity() == Severity::Error)
    }
}

/// ORD document generator
///
/// Holds the definition graph of one application and synthesizes its
/// discovery document:
/// - resolves namespace and application metadata once per run
/// - classifies every definition
/// - builds groups, resources and the referenced packages
pub struct OrdGenerator {
    graph: DefinitionGraph,
    data_products: Box<dyn DataProductStrategy>,
}

impl OrdGenerator {
    /// Create a generator that recognizes primary data products by annotation
    pub fn new(graph: DefinitionGraph) -> Self {
        Self {
            graph,
            data_products: Box::new(AnnotatedDataProducts),
        }
    }

    /// Replace the primary data product detection
    pub fn with_data_product_strategy(
        mut self,
        strategy: impl DataProductStrategy + 'static,
    ) -> Self {
        self.data_products = Box::new(strategy);
        self
    }

    pub fn graph(&self) -> &DefinitionGraph {
        &self.graph
    }

    /// Synthesize the document.
    ///
    /// Fails only when the project has no identity or no valid namespace can
    /// be determined.
    pub fn generate(
        &self,
        descriptor: Option<&ProjectDescriptor>,
        config: &OrdConfig,
    ) -> Result<Synthesis> {
        let diagnostics = Diagnostics::new();
        let app_config = AppConfig::resolve(descriptor, config, &self.graph, &diagnostics)?;

        tracing::info!(
            namespace = %app_config.namespace,
            app = %app_config.app_name,
            definitions = self.graph.len(),
            "synthesizing ORD document"
        );

        let document = {
            let ctx = Context::new(
                &app_config,
                &self.graph,
                self.data_products.as_ref(),
                &diagnostics,
            );
            assembler::assemble(&ctx)
        };

        if let Some(path) = &config.custom_ord_content_file {
            tracing::debug!(
                path = %path.display(),
                "custom ORD content is merged by a separate step"
            );
        }

        Ok(Synthesis {
            document,
            warnings: diagnostics.into_warnings(),
        })
    }

    /// Synthesize the document and write it as pretty-printed JSON
    pub fn generate_to_file(
        &self,
        descriptor: Option<&ProjectDescriptor>,
        config: &OrdConfig,
        output_path: &Path,
    ) -> Result<Synthesis> {
        let synthesis = self.generate(descriptor, config)?;

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let rendered = serde_json::to_string_pretty(&synthesis.document)?;
        fs::write(output_path, rendered)?;

        tracing::info!(path = %output_path.display(), "wrote ORD document");
        Ok(synthesis)
    }
}

/// Synthesize a document (convenience function)
pub fn generate_document(
    graph: DefinitionGraph,
    descriptor: Option<&ProjectDescriptor>,
    config: &OrdConfig,
) -> Result<Synthesis> {
    OrdGenerator::new(graph).generate(descriptor, config)
}
