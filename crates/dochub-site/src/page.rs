//! Rendered page records.

use serde::Serialize;

use crate::PathKey;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// A content record keyed by its qualified key.
///
/// Built once by the content store and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Qualified key (section prefix + relative key).
    pub key: PathKey,
    /// Page title (front matter > first H1 > title-cased slug).
    pub title: String,
    /// Page description (empty if none).
    pub description: String,
    /// Rendered HTML body.
    pub body: String,
    /// Table of contents, excluding the title heading.
    pub toc: Vec<TocEntry>,
    /// Full-width display flag.
    pub full: bool,
}

impl Page {
    /// Create a page with an empty body.
    #[must_use]
    pub fn new(key: PathKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
            description: String::new(),
            body: String::new(),
            toc: Vec::new(),
            full: false,
        }
    }

    /// Set the rendered body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
