//! Extracted records
//!
//! A [`Record`] is the flat result of scraping one target: a handful of
//! well-known fields plus any extra named text fields the target's selectors
//! asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name that collects every match instead of the first
pub const LINKS_FIELD: &str = "links";

/// Field name stored in [`Record::title`]
pub const TITLE_FIELD: &str = "title";

/// Field name stored in [`Record::content`]
pub const CONTENT_FIELD: &str = "content";

/// The structured result of extracting one target's page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Name of the target this record came from
    pub target_name: String,

    /// URL that was fetched
    pub url: String,

    /// Text of the first `title` match
    pub title: Option<String>,

    /// Every `links` match, in document order
    #[serde(default)]
    pub links: Vec<String>,

    /// Text of the first `content` match
    pub content: Option<String>,

    /// Extra singular fields, keyed by field name
    ///
    /// Serialized as top-level keys next to the fixed ones, matching the
    /// extra CSV columns.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Option<String>>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl Record {
    /// Creates an empty record for the given target
    pub fn new(
        target_name: impl Into<String>,
        url: impl Into<String>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            target_name: target_name.into(),
            url: url.into(),
            title: None,
            links: Vec::new(),
            content: None,
            fields: BTreeMap::new(),
            fetched_at,
        }
    }

    /// Looks up a singular field by name, including `title` and `content`
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            TITLE_FIELD => self.title.as_deref(),
            CONTENT_FIELD => self.content.as_deref(),
            _ => self.fields.get(name).and_then(|v| v.as_deref()),
        }
    }
}
