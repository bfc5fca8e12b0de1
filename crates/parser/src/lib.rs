//! Model loading for ordgen
//!
//! This crate turns the artifacts produced outside the generator into the
//! types of `ordgen-common`:
//!
//! - the compiled service model (CSN-style JSON) becomes a linked
//!   `DefinitionGraph`
//! - `package.json` becomes a `ProjectDescriptor`
//! - the optional override file (YAML or JSON) becomes an `OrdConfig`
//!
//! ## Linking Strategy
//!
//! The compiler output is flat: every definition is keyed by its
//! fully-qualified name. Owning services are resolved by name prefix
//! (`my.app.CatalogService.Books` belongs to `my.app.CatalogService`), and
//! association/composition elements become relationships between entities.

mod csn;
mod loader;

pub use csn::{CsnDefinition, CsnDocument, CsnElement};
pub use loader::{load_config, load_project_descriptor, ModelParser};
