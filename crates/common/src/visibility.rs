//! Resource visibility tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Access tier of a discovery document entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

/// Returned when a string is not one of `public`, `internal` or `private`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid visibility '{0}', expected one of public, internal, private")]
pub struct InvalidVisibility(pub String);

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Internal, Visibility::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
        }
    }

    /// Whether resources with this visibility appear in the document at all
    pub fn is_exposed(&self) -> bool {
        !matches!(self, Visibility::Private)
    }

    /// Pick the more open of two visibilities (public > internal > private)
    pub fn most_open(self, other: Visibility) -> Visibility {
        self.min(other)
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = InvalidVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "internal" => Ok(Visibility::Internal),
            "private" => Ok(Visibility::Private),
            other => Err(InvalidVisibility(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_visibility() {
        assert_eq!("public".parse(), Ok(Visibility::Public));
        assert_eq!("internal".parse(), Ok(Visibility::Internal));
        assert_eq!("private".parse(), Ok(Visibility::Private));
        assert_eq!(
            "Public".parse::<Visibility>(),
            Err(InvalidVisibility("Public".to_string()))
        );
    }

    #[test]
    fn test_most_open() {
        assert_eq!(
            Visibility::Internal.most_open(Visibility::Public),
            Visibility::Public
        );
        assert_eq!(
            Visibility::Private.most_open(Visibility::Internal),
            Visibility::Internal
        );
        assert_eq!(
            Visibility::Private.most_open(Visibility::Private),
            Visibility::Private
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Visibility::Internal).unwrap();
        assert_eq!(json, "\"internal\"");
    }
}
