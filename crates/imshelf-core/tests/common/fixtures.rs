//! Shared fixtures: record builders and a scripted catalog source.

use async_trait::async_trait;
use imshelf_core::{CatalogError, CatalogSource, Query, Record, ResultPage};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn records(prefix: &str, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::new(format!("/works/{prefix}{i}")))
        .collect()
}

#[derive(Clone)]
struct Scripted {
    delay: Duration,
    reply: Result<ResultPage, CatalogError>,
}

/// Catalog source that replays scripted responses keyed by query text
/// and page index, and records every request it serves. Clones share
/// their script and call log, so a test can keep one clone for
/// assertions and hand the other to the controller.
#[derive(Clone, Default)]
pub struct ScriptedCatalog {
    replies: Arc<Mutex<HashMap<(String, u32), Scripted>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, text: &str, page_index: u32, records: Vec<Record>, total: u64) -> Self {
        self.page_after(text, page_index, records, total, Duration::ZERO)
    }

    /// Script a page that resolves only after `delay` of (test) time.
    pub fn page_after(
        self,
        text: &str,
        page_index: u32,
        records: Vec<Record>,
        total: u64,
        delay: Duration,
    ) -> Self {
        self.replies.lock().unwrap().insert(
            (text.to_string(), page_index),
            Scripted {
                delay,
                reply: Ok(ResultPage {
                    records,
                    total_matches: total,
                    page_index,
                }),
            },
        );
        self
    }

    pub fn failure(self, text: &str, page_index: u32, error: CatalogError) -> Self {
        self.replies.lock().unwrap().insert(
            (text.to_string(), page_index),
            Scripted {
                delay: Duration::ZERO,
                reply: Err(error),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn fetch_page(
        &self,
        query: &Query,
        page_index: u32,
    ) -> Result<ResultPage, CatalogError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.text.clone(), page_index));

        let scripted = {
            let replies = self.replies.lock().unwrap();
            replies
                .get(&(query.text.clone(), page_index))
                .unwrap_or_else(|| {
                    panic!("unscripted request: {:?} page {}", query.text, page_index)
                })
                .clone()
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.reply
    }
}
