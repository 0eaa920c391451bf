//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::storage::{Document, Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores documents and content in memory. Use the builder methods
/// to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use dochub_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("python/day-1", "# Variables\n\nContent.");
///
/// let docs = storage.scan().unwrap();
/// let content = storage.read("python/day-1").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: Vec<Document>,
    contents: HashMap<String, String>,
    scan_error: Option<StorageErrorKind>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document record as-is.
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Add a content document with its markdown body.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.documents.push(Document::page(path.clone()));
        self.contents.insert(path, content.into());
        self
    }

    /// Add a folder index document (`index.md`) with its markdown body.
    #[must_use]
    pub fn with_index_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.documents.push(Document {
            index: true,
            ..Document::page(path.clone())
        });
        self.contents.insert(path, content.into());
        self
    }

    /// Add a content document with an explicit front matter title.
    #[must_use]
    pub fn with_titled_file(
        mut self,
        path: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        self.documents.push(Document {
            title: Some(title.into()),
            ..Document::page(path.clone())
        });
        self.contents.insert(path, content.into());
        self
    }

    /// Add a metadata-only folder document.
    #[must_use]
    pub fn with_folder(mut self, path: impl Into<String>, title: impl Into<String>) -> Self {
        self.documents.push(Document {
            title: Some(title.into()),
            ..Document::folder(path)
        });
        self
    }

    /// Make `scan()` fail with the given error kind.
    #[must_use]
    pub fn with_scan_error(mut self, kind: StorageErrorKind) -> Self {
        self.scan_error = Some(kind);
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        if let Some(kind) = self.scan_error {
            return Err(StorageError::new(kind).with_backend("Mock"));
        }
        Ok(self.documents.clone())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        self.contents.get(path).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::NotFound)
                .with_path(path)
                .with_backend("Mock")
        })
    }
}
