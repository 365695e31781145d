//! Error taxonomy for search operations

use crate::catalog::CatalogError;
use thiserror::Error;

/// Errors surfaced by the search controller.
///
/// None of these are fatal: the controller remains usable and accepts a
/// subsequent search after any of them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Query text was empty; no request was sent.
    #[error("enter a search term")]
    EmptyQuery,

    /// The catalog request failed (transport or malformed response).
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SearchError {
    /// True for locally recoverable input errors (nothing was sent).
    pub fn is_validation(&self) -> bool {
        matches!(self, SearchError::EmptyQuery)
    }
}
