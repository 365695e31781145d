//! Seam between the controller and a concrete catalog backend

use super::{Query, ResultPage};
use crate::http::HttpError;
use async_trait::async_trait;
use thiserror::Error;

/// Failure modes of a single page fetch. `Clone` so the session can
/// retain the cause for display.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Transport failure or non-success HTTP status.
    #[error("could not reach the catalog: {message}")]
    Network { message: String },

    /// Response body was not the expected result envelope.
    #[error("unexpected catalog response: {message}")]
    Service { message: String },
}

impl From<HttpError> for CatalogError {
    fn from(e: HttpError) -> Self {
        CatalogError::Network {
            message: e.to_string(),
        }
    }
}

/// A paged search backend. Each call is a single attempt; retry and
/// rate-limit policies are deliberately absent.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, query: &Query, page_index: u32)
        -> Result<ResultPage, CatalogError>;
}
