//! Search session state machine
//!
//! Pure transitions over an owned state value: the controller feeds
//! fetch results in here, and tests drive the same transitions without
//! any runtime. Every page fetch travels as a [`PageRequest`] so the
//! apply step can tell whether the session has moved on in the meantime
//! and discard the stale result.

use crate::catalog::{Query, ResultPage, PAGE_SIZE};
use crate::domain::Record;
use crate::error::SearchError;
use std::collections::HashSet;

/// Lifecycle of the current search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Error,
}

/// A dispatched page fetch, identified by the query value it was built
/// from. Supersession compares queries by value, not by dispatch order.
#[derive(Clone, Debug, PartialEq)]
pub struct PageRequest {
    pub query: Query,
    pub page_index: u32,
}

/// Accumulated state of one logical search: the query, every page
/// fetched so far in arrival order, and the pagination bookkeeping.
#[derive(Clone, Debug)]
pub struct SearchSession {
    query: Option<Query>,
    records: Vec<Record>,
    seen_keys: HashSet<String>,
    last_page_index: i64,
    has_more: bool,
    total_matches: u64,
    status: SessionStatus,
    error: Option<SearchError>,
    searched: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            query: None,
            records: Vec::new(),
            seen_keys: HashSet::new(),
            last_page_index: -1,
            has_more: false,
            total_matches: 0,
            status: SessionStatus::Idle,
            error: None,
            searched: false,
        }
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// All records accumulated so far, in page order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn last_page_index(&self) -> i64 {
        self.last_page_index
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn total_matches(&self) -> u64 {
        self.total_matches
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn error(&self) -> Option<&SearchError> {
        self.error.as_ref()
    }

    /// A completed search that found nothing: the "no matches" state,
    /// distinct from [`SessionStatus::Error`].
    pub fn is_empty_result(&self) -> bool {
        self.searched && self.status == SessionStatus::Idle && self.records.is_empty()
    }

    /// Back to the pristine state (empty query, nothing loaded).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Start a new session for `query`: drops everything accumulated and
    /// requests page 0.
    pub fn begin(&mut self, query: Query) -> PageRequest {
        *self = Self::default();
        self.query = Some(query.clone());
        self.status = SessionStatus::Loading;
        PageRequest {
            query,
            page_index: 0,
        }
    }

    /// Request the next page of the current session. `None` unless the
    /// session is idle with more pages known to exist.
    pub fn begin_continuation(&mut self) -> Option<PageRequest> {
        if self.status != SessionStatus::Idle || !self.has_more {
            return None;
        }
        let query = self.query.clone()?;
        self.status = SessionStatus::LoadingMore;
        Some(PageRequest {
            query,
            page_index: (self.last_page_index + 1) as u32,
        })
    }

    /// Apply a fetched page. Returns false, mutating nothing, when the
    /// request has been superseded by a newer query.
    ///
    /// Records whose key was already seen in this session are skipped,
    /// so one session never shows duplicates across pages.
    pub fn complete(&mut self, request: &PageRequest, page: ResultPage) -> bool {
        if !self.is_current(request) {
            return false;
        }

        let full = page.is_full();
        for record in page.records {
            if self.seen_keys.insert(record.key.clone()) {
                self.records.push(record);
            }
        }

        self.total_matches = page.total_matches;
        self.last_page_index = page.page_index as i64;
        self.has_more =
            full && (page.page_index as u64 + 1) * (PAGE_SIZE as u64) < page.total_matches;
        self.status = SessionStatus::Idle;
        self.error = None;
        self.searched = true;
        true
    }

    /// Apply a fetch failure. A failed first page clears the session's
    /// records; a failed continuation keeps what was already shown.
    pub fn fail(&mut self, request: &PageRequest, error: SearchError) -> bool {
        if !self.is_current(request) {
            return false;
        }

        if request.page_index == 0 {
            self.records.clear();
            self.seen_keys.clear();
            self.last_page_index = -1;
            self.has_more = false;
            self.total_matches = 0;
        }
        self.status = SessionStatus::Error;
        self.error = Some(error);
        true
    }

    /// Record a validation failure. Nothing was dispatched, so the
    /// accumulated records stay untouched.
    pub fn fail_validation(&mut self, error: SearchError) {
        self.status = SessionStatus::Error;
        self.error = Some(error);
    }

    fn is_current(&self, request: &PageRequest) -> bool {
        match (&self.query, self.status) {
            (Some(query), SessionStatus::Loading) => {
                *query == request.query && request.page_index == 0
            }
            (Some(query), SessionStatus::LoadingMore) => {
                *query == request.query
                    && request.page_index as i64 == self.last_page_index + 1
            }
            _ => false,
        }
    }
}
