//! Catalog entity kinds and classification enums.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The closed set of catalog entity kinds.
///
/// This enum is the namespace component of every cache key and the
/// discriminator on reviews, so the variants here are the only entity types
/// that participate in cache invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Pipe,
    Tobacco,
    Accessory,
}

impl CatalogKind {
    /// Returns the singular form used for single-entity cache keys.
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Pipe => "pipe",
            Self::Tobacco => "tobacco",
            Self::Accessory => "accessory",
        }
    }

    /// Returns the plural form used for list cache keys and URL paths.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Pipe => "pipes",
            Self::Tobacco => "tobaccos",
            Self::Accessory => "accessories",
        }
    }

    /// All kinds, in catalog display order.
    pub const ALL: [Self; 3] = [Self::Pipe, Self::Tobacco, Self::Accessory];
}

impl Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    /// Accepts both singular and plural (URL path segment) spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipe" | "pipes" => Ok(Self::Pipe),
            "tobacco" | "tobaccos" => Ok(Self::Tobacco),
            "accessory" | "accessories" => Ok(Self::Accessory),
            other => Err(format!("unknown catalog kind: {other}")),
        }
    }
}

/// Pipe bowl shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipeShape {
    Billiard,
    Bent,
    Dublin,
    Bulldog,
    Apple,
    Churchwarden,
    Freehand,
    Other,
}

impl PipeShape {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "billiard" => Self::Billiard,
            "bent" => Self::Bent,
            "dublin" => Self::Dublin,
            "bulldog" => Self::Bulldog,
            "apple" => Self::Apple,
            "churchwarden" => Self::Churchwarden,
            "freehand" => Self::Freehand,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Billiard => "billiard",
            Self::Bent => "bent",
            Self::Dublin => "dublin",
            Self::Bulldog => "bulldog",
            Self::Apple => "apple",
            Self::Churchwarden => "churchwarden",
            Self::Freehand => "freehand",
            Self::Other => "other",
        }
    }
}

/// Tobacco blend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendType {
    Virginia,
    VirginiaPerique,
    English,
    Balkan,
    Aromatic,
    Burley,
    Other,
}

impl BlendType {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "virginia" => Self::Virginia,
            "virginia_perique" => Self::VirginiaPerique,
            "english" => Self::English,
            "balkan" => Self::Balkan,
            "aromatic" => Self::Aromatic,
            "burley" => Self::Burley,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Virginia => "virginia",
            Self::VirginiaPerique => "virginia_perique",
            Self::English => "english",
            Self::Balkan => "balkan",
            Self::Aromatic => "aromatic",
            Self::Burley => "burley",
            Self::Other => "other",
        }
    }
}

/// Tobacco cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TobaccoCut {
    Ribbon,
    Flake,
    Plug,
    Shag,
    BrokenFlake,
    Other,
}

impl TobaccoCut {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "ribbon" => Self::Ribbon,
            "flake" => Self::Flake,
            "plug" => Self::Plug,
            "shag" => Self::Shag,
            "broken_flake" => Self::BrokenFlake,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Ribbon => "ribbon",
            Self::Flake => "flake",
            Self::Plug => "plug",
            Self::Shag => "shag",
            Self::BrokenFlake => "broken_flake",
            Self::Other => "other",
        }
    }
}

/// Accessory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    Lighter,
    Tamper,
    Tool,
    Stand,
    Pouch,
    Filter,
    Other,
}

impl AccessoryKind {
    #[must_use]
    pub fn from_db(s: &str) -> Self {
        match s {
            "lighter" => Self::Lighter,
            "tamper" => Self::Tamper,
            "tool" => Self::Tool,
            "stand" => Self::Stand,
            "pouch" => Self::Pouch,
            "filter" => Self::Filter,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn as_db(self) -> &'static str {
        match self {
            Self::Lighter => "lighter",
            Self::Tamper => "tamper",
            Self::Tool => "tool",
            Self::Stand => "stand",
            Self::Pouch => "pouch",
            Self::Filter => "filter",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_singular_plural() {
        assert_eq!(CatalogKind::Pipe.singular(), "pipe");
        assert_eq!(CatalogKind::Pipe.plural(), "pipes");
        assert_eq!(CatalogKind::Accessory.plural(), "accessories");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("pipes".parse::<CatalogKind>().unwrap(), CatalogKind::Pipe);
        assert_eq!("tobacco".parse::<CatalogKind>().unwrap(), CatalogKind::Tobacco);
        assert!("cigars".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&CatalogKind::Tobacco).unwrap();
        assert_eq!(json, "\"tobacco\"");
    }
}
