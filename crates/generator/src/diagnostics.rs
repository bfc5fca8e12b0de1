//! Recoverable anomalies found while synthesizing a document
//!
//! Nothing recorded here aborts a run. Every entry is logged through
//! `tracing` when reported and kept so callers can audit which rules fired.

use std::cell::RefCell;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A rule application that had to skip or normalize input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisWarning {
    #[error("protocol '{protocol}' of service '{service}' is not supported and was skipped")]
    UnsupportedProtocol { service: String, protocol: String },

    #[error("unknown protocol '{protocol}' on service '{service}' was skipped")]
    UnknownProtocol { service: String, protocol: String },

    #[error("service '{service}' declares no usable protocol and gets no API resource")]
    NoProtocols { service: String },

    #[error("invalid visibility '{value}' on '{definition}' was ignored")]
    InvalidVisibility { definition: String, value: String },

    #[error("invalid default visibility '{value}', falling back to public")]
    InvalidDefaultVisibility { value: String },

    #[error("version '{version}' of '{definition}' carries a letter suffix, using {normalized}")]
    LetteredVersion {
        definition: String,
        version: String,
        normalized: String,
    },

    #[error("entity type annotation '{value}' on '{definition}' is malformed and was skipped")]
    MalformedEntityType { definition: String, value: String },

    #[error("product '{ord_id}' uses the reserved vendor prefix '{prefix}' and was skipped")]
    ReservedProductVendor { ord_id: String, prefix: String },

    #[error("access strategy 'open' cannot be combined with {others:?}, dropping 'open'")]
    MixedAccessStrategies { others: Vec<String> },

    #[error("'{ord_id}' is produced by both '{kept}' and '{dropped}', keeping the first")]
    DuplicateOrdId {
        ord_id: String,
        kept: String,
        dropped: String,
    },
}

impl SynthesisWarning {
    pub fn severity(&self) -> Severity {
        match self {
            SynthesisWarning::ReservedProductVendor { .. } => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Short stable code for structured log fields
    pub fn code(&self) -> &'static str {
        match self {
            SynthesisWarning::UnsupportedProtocol { .. } => "unsupported_protocol",
            SynthesisWarning::UnknownProtocol { .. } => "unknown_protocol",
            SynthesisWarning::NoProtocols { .. } => "no_protocols",
            SynthesisWarning::InvalidVisibility { .. } => "invalid_visibility",
            SynthesisWarning::InvalidDefaultVisibility { .. } => "invalid_default_visibility",
            SynthesisWarning::LetteredVersion { .. } => "lettered_version",
            SynthesisWarning::MalformedEntityType { .. } => "malformed_entity_type",
            SynthesisWarning::ReservedProductVendor { .. } => "reserved_product_vendor",
            SynthesisWarning::MixedAccessStrategies { .. } => "mixed_access_strategies",
            SynthesisWarning::DuplicateOrdId { .. } => "duplicate_ord_id",
        }
    }
}

/// Per-run collector
///
/// Builders only hold a shared reference to the run context, so the list
/// sits behind a `RefCell`. A collector belongs to exactly one run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: RefCell<Vec<SynthesisWarning>>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a warning; a warning identical to one already
    /// recorded is dropped
    pub fn report(&self, warning: SynthesisWarning) {
        if self.warnings.borrow().contains(&warning) {
            return;
        }
        match warning.severity() {
            Severity::Error => tracing::error!(code = warning.code(), "{warning}"),
            Severity::Warning => tracing::warn!(code = warning.code(), "{warning}"),
        }
        self.warnings.borrow_mut().push(warning);
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Snapshot of everything reported so far
    pub fn warnings(&self) -> Vec<SynthesisWarning> {
        self.warnings.borrow().clone()
    }

    pub fn into_warnings(self) -> Vec<SynthesisWarning> {
        self.warnings.into_inner()
    }
}
