//! Remote catalog client
//!
//! One source plugin (Open Library) behind the `CatalogSource` seam the
//! controller is generic over.

pub mod openlibrary;
pub mod traits;

pub use openlibrary::OpenLibrarySource;
pub use traits::{CatalogError, CatalogSource};

use crate::domain::Record;
use serde::{Deserialize, Serialize};

/// Fixed page size for every catalog request.
pub const PAGE_SIZE: usize = 20;

/// Which request parameter the query text is sent as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryType {
    Title,
    Author,
    Subject,
    Isbn,
    #[default]
    General,
}

impl QueryType {
    /// Name of the query parameter used by the search endpoint.
    pub fn param(&self) -> &'static str {
        match self {
            QueryType::Title => "title",
            QueryType::Author => "author",
            QueryType::Subject => "subject",
            QueryType::Isbn => "isbn",
            QueryType::General => "q",
        }
    }
}

/// Optional narrowing filters, applied verbatim as request parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub language: Option<String>,
    pub publish_year: Option<i32>,
}

/// A fully specified search. Value equality defines query equivalence:
/// it decides both session resets and stale-response discard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub query_type: QueryType,
    pub text: String,
    pub filters: SearchFilters,
}

impl Query {
    pub fn new(query_type: QueryType, text: impl Into<String>) -> Self {
        Self {
            query_type,
            text: text.into(),
            filters: SearchFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// One fixed-size batch of results at a page offset.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultPage {
    pub records: Vec<Record>,
    pub total_matches: u64,
    pub page_index: u32,
}

impl ResultPage {
    /// A full page means further pages may exist.
    pub fn is_full(&self) -> bool {
        self.records.len() == PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(QueryType::Title, "title")]
    #[case(QueryType::Author, "author")]
    #[case(QueryType::Subject, "subject")]
    #[case(QueryType::Isbn, "isbn")]
    #[case(QueryType::General, "q")]
    fn test_query_type_param(#[case] query_type: QueryType, #[case] expected: &str) {
        assert_eq!(query_type.param(), expected);
    }

    #[test]
    fn test_query_equivalence_is_by_value() {
        let a = Query::new(QueryType::Title, "dune");
        let b = Query::new(QueryType::Title, "dune");
        let c = Query::new(QueryType::Author, "dune");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(
            a.clone().with_filters(SearchFilters {
                language: Some("eng".to_string()),
                publish_year: None,
            }),
            b
        );
    }

    #[test]
    fn test_page_fullness() {
        let full = ResultPage {
            records: (0..PAGE_SIZE).map(|i| Record::new(format!("/works/{i}"))).collect(),
            total_matches: 100,
            page_index: 0,
        };
        assert!(full.is_full());

        let short = ResultPage {
            records: vec![Record::new("/works/OL1W")],
            total_matches: 1,
            page_index: 0,
        };
        assert!(!short.is_full());
    }
}
