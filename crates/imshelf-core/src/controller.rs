//! Search/pagination controller
//!
//! Owns the query state, the session, the debounce timer, and the
//! favorites set, and drives a [`CatalogSource`] from a Tokio runtime.
//! All observable state changes go through the pure [`SearchSession`]
//! transitions; this module only schedules them, so the supersession
//! rule holds even though in-flight transport calls are never aborted —
//! their late results simply fail the session's currency check.

use crate::catalog::{
    CatalogError, CatalogSource, OpenLibrarySource, Query, QueryType, ResultPage, SearchFilters,
};
use crate::domain::Record;
use crate::error::SearchError;
use crate::favorites::FavoritesSet;
use crate::session::SearchSession;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Inactivity window between the last keystroke and the search it triggers.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Controller tunables.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    pub debounce_window: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            debounce_window: DEBOUNCE_WINDOW,
        }
    }
}

struct ControllerState {
    pending_text: String,
    query_type: QueryType,
    filters: SearchFilters,
    session: SearchSession,
    favorites: FavoritesSet,
    /// Handle of the one scheduled debounce evaluation, if any. Aborting
    /// it is how a newer keystroke cancels the older evaluation.
    debounce: Option<JoinHandle<()>>,
}

pub struct SearchController<C: CatalogSource> {
    state: Arc<Mutex<ControllerState>>,
    source: Arc<C>,
    config: ControllerConfig,
}

impl SearchController<OpenLibrarySource> {
    /// Controller over the real Open Library endpoint.
    pub fn new() -> Self {
        Self::with_source(OpenLibrarySource::new(), ControllerConfig::default())
    }
}

impl Default for SearchController<OpenLibrarySource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CatalogSource + 'static> SearchController<C> {
    pub fn with_source(source: C, config: ControllerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControllerState {
                pending_text: String::new(),
                query_type: QueryType::default(),
                filters: SearchFilters::default(),
                session: SearchSession::new(),
                favorites: FavoritesSet::new(),
                debounce: None,
            })),
            source: Arc::new(source),
            config,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().expect("controller state lock poisoned")
    }

    /// Record a keystroke. Empty text resets the session immediately and
    /// issues no request; anything else (re)schedules the debounced
    /// new-session search. Must be called from within a Tokio runtime.
    pub fn set_query_text(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.lock();

        if let Some(handle) = state.debounce.take() {
            handle.abort();
        }
        state.pending_text = text.clone();

        if text.trim().is_empty() {
            state.session.reset();
            return;
        }

        let shared = Arc::clone(&self.state);
        let source = Arc::clone(&self.source);
        let window = self.config.debounce_window;
        state.debounce = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let still_current = {
                let state = shared.lock().expect("controller state lock poisoned");
                state.pending_text == text
            };
            if still_current {
                if let Err(error) = run_search(&shared, source.as_ref(), true).await {
                    tracing::debug!(%error, "debounced search failed");
                }
            }
        }));
    }

    /// Takes effect on the next search; does not itself trigger one.
    pub fn set_query_type(&self, query_type: QueryType) {
        self.lock().query_type = query_type;
    }

    /// Takes effect on the next search; does not itself trigger one.
    pub fn set_filters(&self, filters: SearchFilters) {
        self.lock().filters = filters;
    }

    pub fn query_text(&self) -> String {
        self.lock().pending_text.clone()
    }

    /// Explicit new-session search of the current text (form submit).
    /// Cancels any pending debounced evaluation first.
    pub async fn search_now(&self) -> Result<(), SearchError> {
        if let Some(handle) = self.lock().debounce.take() {
            handle.abort();
        }
        run_search(&self.state, self.source.as_ref(), true).await
    }

    /// Continuation entry point, safe to call repeatedly from a
    /// near-end-of-list trigger; the session's status guard drops
    /// duplicate triggers while a fetch is in flight.
    pub async fn request_more(&self) -> Result<(), SearchError> {
        run_search(&self.state, self.source.as_ref(), false).await
    }

    /// Clone of the current session for rendering.
    pub fn snapshot(&self) -> SearchSession {
        self.lock().session.clone()
    }

    pub fn toggle_favorite(&self, record: &Record) -> bool {
        self.lock().favorites.toggle(record.clone())
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.lock().favorites.contains(key)
    }

    pub fn favorites(&self) -> Vec<Record> {
        self.lock().favorites.records().to_vec()
    }
}

/// Dispatch one page fetch and apply its outcome to the session.
///
/// The lock is held only to build the request and to apply the result,
/// never across the await: a query change while the fetch is in flight
/// makes the apply step discard the response.
async fn run_search<C: CatalogSource>(
    state: &Arc<Mutex<ControllerState>>,
    source: &C,
    new_session: bool,
) -> Result<(), SearchError> {
    let request = {
        let mut state = state.lock().expect("controller state lock poisoned");
        if new_session {
            let text = state.pending_text.trim().to_string();
            if text.is_empty() {
                state.session.fail_validation(SearchError::EmptyQuery);
                return Err(SearchError::EmptyQuery);
            }
            let query = Query {
                query_type: state.query_type,
                text,
                filters: state.filters.clone(),
            };
            state.session.begin(query)
        } else {
            match state.session.begin_continuation() {
                Some(request) => request,
                // Nothing to continue: exhausted, errored, or already
                // fetching. Repeated scroll triggers land here.
                None => return Ok(()),
            }
        }
    };

    let outcome = source.fetch_page(&request.query, request.page_index).await;

    let mut state = state.lock().expect("controller state lock poisoned");
    match outcome {
        Ok(page) => {
            if !state.session.complete(&request, page) {
                tracing::debug!(text = %request.query.text, "discarding superseded response");
            }
            Ok(())
        }
        // A broken envelope on a fresh search reads as "no matches";
        // mid-session it is a real failure.
        Err(CatalogError::Service { .. }) if request.page_index == 0 => {
            let empty = ResultPage {
                records: Vec::new(),
                total_matches: 0,
                page_index: 0,
            };
            state.session.complete(&request, empty);
            Ok(())
        }
        Err(error) => {
            let error = SearchError::from(error);
            if state.session.fail(&request, error.clone()) {
                tracing::warn!(%error, page_index = request.page_index, "catalog fetch failed");
                Err(error)
            } else {
                tracing::debug!(text = %request.query.text, "discarding superseded failure");
                Ok(())
            }
        }
    }
}
