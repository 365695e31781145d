//! imshelf-core: Cross-platform core library for the imshelf book client
//!
//! This library provides the stateful core of an Open Library search
//! front-end:
//! - Catalog client for the Open Library search API (one GET per page)
//! - Debounced search/pagination controller with stale-response discard
//! - In-memory favorites keyed by record key
//!
//! Rendering is the host's concern; everything here runs headless on a
//! Tokio runtime.

pub mod catalog;
pub mod controller;
pub mod domain;
pub mod error;
pub mod favorites;
pub mod http;
pub mod session;

// Re-export main types for convenience
pub use catalog::{
    CatalogError, CatalogSource, OpenLibrarySource, Query, QueryType, ResultPage, SearchFilters,
    PAGE_SIZE,
};
pub use controller::{ControllerConfig, SearchController, DEBOUNCE_WINDOW};
pub use domain::{CoverSize, Record};
pub use error::SearchError;
pub use favorites::FavoritesSet;
pub use session::{PageRequest, SearchSession, SessionStatus};
