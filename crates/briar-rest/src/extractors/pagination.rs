//! Pagination extractor.

use briar_core::PageRequest;
use serde::Deserialize;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request: PageRequest = PaginationQuery::default().into();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_size_is_clamped() {
        let request: PageRequest = PaginationQuery {
            page: Some(2),
            size: Some(9999),
        }
        .into();
        assert_eq!(request.size, PageRequest::MAX_SIZE);
    }
}
