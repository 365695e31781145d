//! Bibliographic record as returned by the Open Library search API

use serde::{Deserialize, Serialize};

/// Cover image size selector for the covers service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(&self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// One search document.
///
/// Only `key` is interpreted (it identifies the work and keys the
/// favorites set); the descriptive fields are carried through unmodified
/// for display.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Unique work identifier, e.g. `/works/OL45883W`.
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub has_fulltext: bool,
    #[serde(default)]
    pub ebook_access: Option<String>,
    #[serde(default)]
    pub edition_count: Option<u32>,
}

impl Record {
    /// Minimal record with the given key and empty display fields.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// URL of the cover image, if the record has one. Callers render a
    /// placeholder when this is `None`.
    pub fn cover_url(&self, size: CoverSize) -> Option<String> {
        self.cover_i.map(|id| {
            format!(
                "https://covers.openlibrary.org/b/id/{}-{}.jpg",
                id,
                size.suffix()
            )
        })
    }

    /// URL of the record's detail page. Opened by the host in a new
    /// browsing context, never fetched here.
    pub fn detail_url(&self) -> String {
        format!("https://openlibrary.org{}", self.key)
    }
}
