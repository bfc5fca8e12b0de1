//! Packages
//!
//! One candidate package per {resource kind × exposed visibility}. Builders
//! resolve their `partOfPackage` against the candidates; the assembler then
//! emits only the candidates that were actually referenced.

use crate::context::Context;
use crate::identifier::{OrdId, ResourceKind};
use ordgen_common::{Package, Visibility};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageKind {
    Api,
    Event,
    EntityType,
    DataProduct,
}

impl PackageKind {
    pub const ALL: [PackageKind; 4] = [
        PackageKind::Api,
        PackageKind::Event,
        PackageKind::EntityType,
        PackageKind::DataProduct,
    ];

    /// Component used in the package local id
    pub fn slug(&self) -> &'static str {
        match self {
            PackageKind::Api => "api",
            PackageKind::Event => "event",
            PackageKind::EntityType => "entityType",
            PackageKind::DataProduct => "dataProduct",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PackageKind::Api => "APIs",
            PackageKind::Event => "Events",
            PackageKind::EntityType => "Entity Types",
            PackageKind::DataProduct => "Data Products",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCandidate {
    pub ord_id: String,
    pub kind: PackageKind,
    pub visibility: Visibility,
}

/// Candidate package identifiers of one run, in output order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIds {
    candidates: Vec<PackageCandidate>,
}

impl PackageIds {
    /// Every {kind × public/internal} candidate for the configured app
    pub fn for_app(ctx: &Context<'_>) -> Self {
        let mut candidates = Vec::with_capacity(PackageKind::ALL.len() * 2);
        for kind in PackageKind::ALL {
            for visibility in [Visibility::Public, Visibility::Internal] {
                let local_id = format!("{}-{}-{}", ctx.config.app_name, kind.slug(), visibility);
                candidates.push(PackageCandidate {
                    ord_id: OrdId::new(
                        ctx.config.namespace.as_str(),
                        ResourceKind::Package,
                        local_id,
                        "v1",
                    )
                    .to_string(),
                    kind,
                    visibility,
                });
            }
        }
        Self { candidates }
    }

    pub fn from_candidates(candidates: Vec<PackageCandidate>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PackageCandidate] {
        &self.candidates
    }

    /// Package for a resource: the candidate whose id ends in
    /// `-<kind>-<visibility>`, else the first candidate in the namespace,
    /// else `None`
    pub fn resolve(
        &self,
        namespace: &str,
        kind: PackageKind,
        visibility: Visibility,
    ) -> Option<String> {
        let suffix = format!("-{}-{}", kind.slug(), visibility);
        let prefix = format!("{namespace}:");

        let in_namespace = |c: &&PackageCandidate| c.ord_id.starts_with(&prefix);

        self.candidates
            .iter()
            .filter(in_namespace)
            .find(|c| package_local_id(&c.ord_id).ends_with(&suffix))
            .or_else(|| self.candidates.iter().find(in_namespace))
            .map(|c| c.ord_id.clone())
    }
}

/// `<ns>:package:<localId>:<version>` → `<localId>`
fn package_local_id(ord_id: &str) -> &str {
    ord_id.split(':').nth(2).unwrap_or_default()
}

/// Build the package entry of a referenced candidate
pub fn package(candidate: &PackageCandidate, ctx: &Context<'_>, product_ids: &[String]) -> Package {
    let title = format!(
        "{} {} ({})",
        ctx.config.app_name,
        candidate.kind.title(),
        candidate.visibility
    );
    Package {
        ord_id: candidate.ord_id.clone(),
        short_description: format!("{title} of {}", ctx.config.app_name),
        description: ctx.config.description.clone(),
        title,
        version: "1.0.0".to_string(),
        part_of_products: product_ids.to_vec(),
        vendor: ctx.config.vendor.clone(),
    }
}
