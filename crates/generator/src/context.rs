//! Shared state of one synthesis run

use crate::app_config::AppConfig;
use crate::diagnostics::Diagnostics;
use crate::identifier::{local_name, split_version, VersionedName};
use crate::visibility;
use ordgen_common::{annotations, Definition, DefinitionGraph, Visibility};

/// Detects services that are primary data products
#[cfg_attr(test, mockall::automock)]
pub trait DataProductStrategy {
    fn is_primary_data_product(&self, definition: &Definition) -> bool;
}

/// `@DataIntegration.dataProduct.type: 'primary'`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotatedDataProducts;

impl DataProductStrategy for AnnotatedDataProducts {
    fn is_primary_data_product(&self, definition: &Definition) -> bool {
        definition.is_service()
            && definition
                .annotations
                .get_str(annotations::DATA_PRODUCT_TYPE)
                == Some("primary")
    }
}

/// Everything a template builder may read
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a AppConfig,
    pub graph: &'a DefinitionGraph,
    pub data_products: &'a dyn DataProductStrategy,
    pub diagnostics: &'a Diagnostics,
}

impl<'a> Context<'a> {
    pub fn new(
        config: &'a AppConfig,
        graph: &'a DefinitionGraph,
        data_products: &'a dyn DataProductStrategy,
        diagnostics: &'a Diagnostics,
    ) -> Self {
        Self {
            config,
            graph,
            data_products,
            diagnostics,
        }
    }

    /// Name with the application namespace stripped
    pub fn local_name<'d>(&self, definition: &'d Definition) -> &'d str {
        local_name(&definition.name, self.config.app_namespace.as_deref())
    }

    /// Local name split into base and version
    pub fn versioned_name(&self, definition: &Definition) -> VersionedName {
        split_version(self.local_name(definition))
    }

    pub fn visibility(&self, definition: &Definition) -> Visibility {
        visibility::classify(definition, self)
    }

    pub fn is_primary_data_product(&self, definition: &Definition) -> bool {
        self.data_products.is_primary_data_product(definition)
    }
}
