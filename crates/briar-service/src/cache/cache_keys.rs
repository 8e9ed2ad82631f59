//! Cache key generators for consistent key naming.
//!
//! One scheme for the whole keyspace: entities live under the kind's
//! singular form, lists under the plural form with the serialized filter as
//! the fingerprint. Everything a mutation must clear is reachable from
//! these generators plus the matching `*` patterns.

use briar_core::CatalogKind;
use serde::Serialize;
use uuid::Uuid;

/// Key for the aggregate catalog stats entry.
pub const STATS_KEY: &str = "stats:catalog";

/// Pattern matching every cached search result.
pub const SEARCH_PATTERN: &str = "search:*";

/// Key for a single catalog entity, e.g. `pipe:<uuid>`.
#[must_use]
pub fn entity_key(kind: CatalogKind, id: Uuid) -> String {
    format!("{}:{}", kind.singular(), id)
}

/// Key for a filtered list, e.g. `pipes:{"brand":null,...}`.
///
/// The filter structs serialize every field unconditionally, so equal
/// filters always produce byte-identical fingerprints.
#[must_use]
pub fn list_key<F: Serialize>(kind: CatalogKind, filter: &F) -> String {
    // Serialization of the closed filter structs cannot fail.
    let fingerprint = serde_json::to_string(filter).unwrap_or_else(|_| "{}".to_string());
    format!("{}:{}", kind.plural(), fingerprint)
}

/// Pattern matching every cached list of a kind, e.g. `pipes:*`.
#[must_use]
pub fn list_pattern(kind: CatalogKind) -> String {
    format!("{}:*", kind.plural())
}

/// Key for a cached search result.
#[must_use]
pub fn search_key<Q: Serialize>(query: &Q) -> String {
    let fingerprint = serde_json::to_string(query).unwrap_or_else(|_| "{}".to_string());
    format!("search:{fingerprint}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use briar_core::domain::PipeFilter;

    #[test]
    fn test_entity_key() {
        let id = Uuid::now_v7();
        assert_eq!(
            entity_key(CatalogKind::Pipe, id),
            format!("pipe:{id}")
        );
        assert_eq!(
            entity_key(CatalogKind::Accessory, id),
            format!("accessory:{id}")
        );
    }

    #[test]
    fn test_list_key_carries_fingerprint() {
        let filter = PipeFilter::default();
        let key = list_key(CatalogKind::Pipe, &filter);
        assert!(key.starts_with("pipes:{"));
    }

    #[test]
    fn test_equal_filters_share_a_key() {
        let a = PipeFilter {
            brand: Some("Savinelli".to_string()),
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(
            list_key(CatalogKind::Pipe, &a),
            list_key(CatalogKind::Pipe, &b)
        );
    }

    #[test]
    fn test_list_pattern_covers_list_keys() {
        let pattern = list_pattern(CatalogKind::Tobacco);
        assert_eq!(pattern, "tobaccos:*");
        let key = list_key(CatalogKind::Tobacco, &briar_core::domain::TobaccoFilter::default());
        assert!(key.starts_with(&pattern[..pattern.len() - 1]));
    }
}
