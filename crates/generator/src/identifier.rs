//! Compound identifiers and namespace handling
//!
//! ORD identifiers have the shape `<namespace>:<kind>:<localId>:<version>`.
//! Local ids are derived from fully-qualified model names: the application
//! namespace is stripped when the definition lives in it (or below it), a
//! trailing `.v<N>` becomes the version, and characters outside the local id
//! alphabet are replaced.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Namespace of the shared cross-domain entity model
pub const CROSS_DOMAIN_NAMESPACE: &str = "sap.odm";

/// Group type for service groups
pub const SERVICE_GROUP_TYPE: &str = "sap.cds:service";

/// Kind component of a compound identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Package,
    ApiResource,
    EventResource,
    EntityType,
    DataProduct,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Package => "package",
            ResourceKind::ApiResource => "apiResource",
            ResourceKind::EventResource => "eventResource",
            ResourceKind::EntityType => "entityType",
            ResourceKind::DataProduct => "dataProduct",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured compound identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrdId {
    pub namespace: String,
    pub kind: ResourceKind,
    pub local_id: String,
    pub version: String,
}

impl OrdId {
    pub fn new(
        namespace: impl Into<String>,
        kind: ResourceKind,
        local_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
            local_id: local_id.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for OrdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.namespace, self.kind, self.local_id, self.version
        )
    }
}

/// A local name split into its base and major version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedName {
    /// Normalized local name without the version suffix
    pub base: String,
    pub major: u32,
}

impl VersionedName {
    /// Identifier version component (`v2`)
    pub fn tag(&self) -> String {
        format!("v{}", self.major)
    }

    /// Semantic version for the `version` field (`2.0.0`)
    pub fn semver(&self) -> String {
        format!("{}.0.0", self.major)
    }
}

/// Version of an entity type reference, possibly lettered (`v3b`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeVersion {
    /// Raw suffix as written, kept in the identifier
    pub tag: String,
    pub major: u32,
    pub lettered: bool,
}

impl EntityTypeVersion {
    pub fn semver(&self) -> String {
        format!("{}.0.0", self.major)
    }
}

impl Default for EntityTypeVersion {
    fn default() -> Self {
        Self {
            tag: "v1".to_string(),
            major: 1,
            lettered: false,
        }
    }
}

fn service_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+)\.v(0|[1-9][0-9]*)$").expect("valid regex"))
}

fn entity_type_version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^v(0|[1-9][0-9]*)([a-z])?$").expect("valid regex"))
}

fn namespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:\.[a-z0-9]+)+$").expect("valid regex"))
}

/// Strip the application namespace from a fully-qualified name.
///
/// Only names whose declared namespace equals the application namespace or
/// is a dotted sub-namespace of it are shortened; everything else is kept as
/// is.
///
/// # Examples
/// ```
/// use ordgen_generator::identifier::local_name;
///
/// assert_eq!(local_name("my.app.CatalogService", Some("my.app")), "CatalogService");
/// assert_eq!(local_name("my.app.sub.Service", Some("my.app")), "sub.Service");
/// assert_eq!(local_name("my.application.Service", Some("my.app")), "my.application.Service");
/// assert_eq!(local_name("other.Service", None), "other.Service");
/// ```
pub fn local_name<'a>(fqn: &'a str, app_namespace: Option<&str>) -> &'a str {
    app_namespace
        .filter(|ns| !ns.is_empty())
        .and_then(|ns| fqn.strip_prefix(ns))
        .and_then(|rest| rest.strip_prefix('.'))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(fqn)
}

/// Split a trailing `.v<N>` version off a local name.
///
/// Only the exact form is recognized; `.v1.1`, `.v1a`, `.version1` and a
/// bare `.v` stay part of the name and the version defaults to 1.
///
/// # Examples
/// ```
/// use ordgen_generator::identifier::split_version;
///
/// let name = split_version("DataService.v2");
/// assert_eq!(name.base, "DataService");
/// assert_eq!(name.tag(), "v2");
///
/// let name = split_version("DataService.v1.1");
/// assert_eq!(name.base, "DataService.v1.1");
/// assert_eq!(name.tag(), "v1");
/// ```
pub fn split_version(local: &str) -> VersionedName {
    if let Some(caps) = service_version_regex().captures(local) {
        if let Ok(major) = caps[2].parse::<u32>() {
            return VersionedName {
                base: normalize_local_id(&caps[1]),
                major,
            };
        }
    }

    VersionedName {
        base: normalize_local_id(local),
        major: 1,
    }
}

/// Parse an entity type version suffix (`v2`, `v3b`); `None` if malformed
pub fn parse_entity_type_version(raw: &str) -> Option<EntityTypeVersion> {
    let caps = entity_type_version_regex().captures(raw)?;
    let major = caps[1].parse::<u32>().ok()?;
    Some(EntityTypeVersion {
        tag: raw.to_string(),
        major,
        lettered: caps.get(2).is_some(),
    })
}

/// Replace characters outside `[A-Za-z0-9._/-]` with `_`
pub fn normalize_local_id(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '/' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Group identifier of a service
pub fn group_id(namespace: &str, local_service_name: &str) -> String {
    format!("{SERVICE_GROUP_TYPE}:{namespace}:{local_service_name}")
}

/// Whether a string satisfies the ORD namespace format (at least two
/// lowercase alphanumeric segments)
pub fn is_valid_namespace(namespace: &str) -> bool {
    namespace_regex().is_match(namespace)
}

/// Application name usable inside local ids (`@acme/bookshop` → `acme-bookshop`)
pub fn sanitize_app_name(name: &str) -> String {
    name.trim_start_matches('@')
        .replace('/', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Default ORD namespace for an application (`customer.acmebookshop`)
pub fn default_namespace(app_name: &str) -> String {
    let segment: String = app_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("customer.{segment}")
}
