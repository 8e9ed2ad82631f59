//! Typed list filters.
//!
//! Filters are a closed set of predicate structs rather than free-form
//! maps. Their serde_json serialization doubles as the list cache-key
//! fingerprint, so field order and representation must stay stable; fields
//! are serialized unconditionally (a `None` brand and an absent brand must
//! produce the same fingerprint).

use crate::{AccessoryKind, BlendType, ItemStatus, PageRequest, PipeShape, TobaccoCut};
use serde::{Deserialize, Serialize};

/// Sort order for catalog lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSort {
    #[default]
    Newest,
    NameAsc,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl CatalogSort {
    /// Returns the ORDER BY clause fragment for this sort.
    #[must_use]
    pub const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => "created_at DESC",
            Self::NameAsc => "name ASC",
            Self::PriceAsc => "price_cents ASC",
            Self::PriceDesc => "price_cents DESC",
            Self::RatingDesc => "rating_avg DESC NULLS LAST",
        }
    }
}

/// Predicates for pipe list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeFilter {
    pub brand: Option<String>,
    pub shape: Option<PipeShape>,
    pub material: Option<String>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    #[serde(default)]
    pub page: PageRequest,
}

/// Predicates for tobacco list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TobaccoFilter {
    pub brand: Option<String>,
    pub blend_type: Option<BlendType>,
    pub cut: Option<TobaccoCut>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    #[serde(default)]
    pub page: PageRequest,
}

/// Predicates for accessory list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessoryFilter {
    pub brand: Option<String>,
    pub kind: Option<AccessoryKind>,
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub sort: CatalogSort,
    #[serde(default)]
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_fingerprint_is_stable() {
        let filter = PipeFilter {
            brand: Some("Peterson".to_string()),
            page: PageRequest::new(1, 20),
            ..Default::default()
        };
        let a = serde_json::to_string(&filter).unwrap();
        let b = serde_json::to_string(&filter.clone()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_distinct_filters_have_distinct_fingerprints() {
        let base = TobaccoFilter::default();
        let filtered = TobaccoFilter {
            blend_type: Some(BlendType::Virginia),
            ..Default::default()
        };
        assert_ne!(
            serde_json::to_string(&base).unwrap(),
            serde_json::to_string(&filtered).unwrap()
        );
    }

    #[test]
    fn test_sort_order_by() {
        assert_eq!(CatalogSort::Newest.order_by(), "created_at DESC");
        assert_eq!(CatalogSort::PriceAsc.order_by(), "price_cents ASC");
    }
}
