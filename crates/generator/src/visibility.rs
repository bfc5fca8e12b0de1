//! Visibility classification
//!
//! First match wins:
//! 1. primary data products are always `internal`
//! 2. explicit `@ORD.Extensions.visibility`
//! 3. events inherit a private/internal visibility of their owning service
//! 4. the ORD document API implementation standard forces `public`
//!
//! An inherited visibility stands in for the event's missing annotation, so
//! it ranks directly after the explicit one and ahead of the implementation
//! standard.
//! 5. the configured default
//! 6. `public`

use crate::context::Context;
use crate::diagnostics::SynthesisWarning;
use ordgen_common::{annotations, Definition, DefinitionKind, Visibility};

/// Implementation standard of the ORD document API itself
pub const ORD_DOCUMENT_API_STANDARD: &str = "sap:ord-document-api:v1";

/// Classify a definition
pub fn classify(definition: &Definition, ctx: &Context<'_>) -> Visibility {
    if ctx.is_primary_data_product(definition) {
        return Visibility::Internal;
    }

    if let Some(visibility) = explicit_visibility(definition, ctx) {
        return visibility;
    }

    if let Some(visibility) = inherited_visibility(definition, ctx) {
        return visibility;
    }

    if definition
        .annotations
        .get_str(annotations::IMPLEMENTATION_STANDARD)
        == Some(ORD_DOCUMENT_API_STANDARD)
    {
        return Visibility::Public;
    }

    ctx.config.default_visibility.unwrap_or(Visibility::Public)
}

/// The definition's own annotation; invalid values are reported and ignored
fn explicit_visibility(definition: &Definition, ctx: &Context<'_>) -> Option<Visibility> {
    let value = definition.annotations.get(annotations::VISIBILITY)?;
    let parsed = value.as_str().and_then(|raw| raw.parse().ok());
    if parsed.is_none() {
        ctx.diagnostics.report(SynthesisWarning::InvalidVisibility {
            definition: definition.name.clone(),
            value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
        });
    }
    parsed
}

/// Private or internal visibility propagated from the owning service onto
/// its events. Entities and operations never inherit.
fn inherited_visibility(definition: &Definition, ctx: &Context<'_>) -> Option<Visibility> {
    if definition.kind != DefinitionKind::Event {
        return None;
    }

    let owner = ctx.graph.get(definition.service.as_deref()?)?;
    match classify(owner, ctx) {
        Visibility::Public => None,
        restricted => Some(restricted),
    }
}
