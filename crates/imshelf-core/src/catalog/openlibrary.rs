//! Open Library search source
//!
//! API docs: https://openlibrary.org/dev/docs/api/search
//! No authentication; one GET per page against `search.json`.

use super::traits::{CatalogError, CatalogSource};
use super::{Query, ResultPage, PAGE_SIZE};
use crate::domain::Record;
use crate::http::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;

const SEARCH_URL: &str = "https://openlibrary.org/search.json";

/// Search response envelope. `docs` is deliberately defaulted: an
/// envelope without it counts as zero results, not a failure.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<Record>,
    #[serde(rename = "numFound", default)]
    num_found: u64,
}

pub struct OpenLibrarySource {
    client: HttpClient,
    base_url: String,
}

impl OpenLibrarySource {
    pub fn new() -> Self {
        Self {
            client: HttpClient::default(),
            base_url: SEARCH_URL.to_string(),
        }
    }

    /// Point the source at a different endpoint (mock servers in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request parameters for one page of `query`: exactly one
    /// type-specific text parameter, the present filters, and the fixed
    /// limit/offset pagination window.
    pub fn build_params(query: &Query, page_index: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![(query.query_type.param(), query.text.clone())];

        if let Some(language) = &query.filters.language {
            params.push(("language", language.clone()));
        }
        if let Some(year) = query.filters.publish_year {
            params.push(("first_publish_year", year.to_string()));
        }

        params.push(("limit", PAGE_SIZE.to_string()));
        params.push(("offset", (page_index as usize * PAGE_SIZE).to_string()));
        params
    }

    /// Parse an Open Library search response body into a page.
    pub fn parse_search_response(json: &str, page_index: u32) -> Result<ResultPage, CatalogError> {
        let envelope: SearchResponse =
            serde_json::from_str(json).map_err(|e| CatalogError::Service {
                message: format!("invalid search envelope: {}", e),
            })?;

        Ok(ResultPage {
            records: envelope.docs,
            total_matches: envelope.num_found,
            page_index,
        })
    }
}

impl Default for OpenLibrarySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for OpenLibrarySource {
    async fn fetch_page(
        &self,
        query: &Query,
        page_index: u32,
    ) -> Result<ResultPage, CatalogError> {
        let params = Self::build_params(query, page_index);
        tracing::debug!(text = %query.text, page_index, "fetching catalog page");

        let response = self.client.get_with_params(&self.base_url, &params).await?;
        Self::parse_search_response(&response.body, page_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{QueryType, SearchFilters};

    const SAMPLE_RESPONSE: &str = r#"{
        "numFound": 45,
        "start": 0,
        "docs": [
            {
                "key": "/works/OL45883W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "language": ["eng", "fre"],
                "cover_i": 8231856,
                "has_fulltext": true,
                "ebook_access": "borrowable",
                "edition_count": 120
            },
            {
                "key": "/works/OL893415W",
                "title": "Dune Messiah",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1969
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_response() {
        let page = OpenLibrarySource::parse_search_response(SAMPLE_RESPONSE, 0).unwrap();
        assert_eq!(page.total_matches, 45);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].key, "/works/OL45883W");
        assert_eq!(page.records[0].title.as_deref(), Some("Dune"));
        assert_eq!(page.records[0].first_publish_year, Some(1965));
        assert!(page.records[0].has_fulltext);
        assert_eq!(page.records[1].author_name, vec!["Frank Herbert"]);
    }

    #[test]
    fn test_missing_docs_is_zero_results() {
        let page = OpenLibrarySource::parse_search_response(r#"{"numFound": 0}"#, 0).unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_matches, 0);
    }

    #[test]
    fn test_non_json_body_is_service_error() {
        let err = OpenLibrarySource::parse_search_response("<html>gateway</html>", 0).unwrap_err();
        assert!(matches!(err, CatalogError::Service { .. }));
    }

    #[test]
    fn test_build_params_title_query() {
        let query = Query::new(QueryType::Title, "dune");
        let params = OpenLibrarySource::build_params(&query, 0);
        assert_eq!(
            params,
            vec![
                ("title", "dune".to_string()),
                ("limit", "20".to_string()),
                ("offset", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_build_params_filters_and_offset() {
        let query = Query::new(QueryType::General, "desert planet").with_filters(SearchFilters {
            language: Some("eng".to_string()),
            publish_year: Some(1965),
        });
        let params = OpenLibrarySource::build_params(&query, 2);
        assert_eq!(
            params,
            vec![
                ("q", "desert planet".to_string()),
                ("language", "eng".to_string()),
                ("first_publish_year", "1965".to_string()),
                ("limit", "20".to_string()),
                ("offset", "40".to_string()),
            ]
        );
    }
}
