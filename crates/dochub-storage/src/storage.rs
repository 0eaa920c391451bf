//! Storage trait and error types.
//!
//! # URL Path Convention
//!
//! All path parameters in Storage methods are **URL paths**, not file paths:
//! - `""` - content root
//! - `"python"` - section folder (or `python.md`)
//! - `"python/day-1"` - page inside a section
//!
//! Storage implementations handle the mapping from URL paths to their internal
//! storage format.

use std::path::PathBuf;

/// Document record returned by storage scan.
///
/// Documents are either real pages (with content) or folders that only carry
/// metadata (title, ordering) and no content file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// URL path (e.g., "", "python", "python/day-1").
    pub path: String,
    /// Explicit title from front matter or folder metadata.
    pub title: Option<String>,
    /// Description from front matter or folder metadata.
    pub description: Option<String>,
    /// Full-width layout flag from front matter.
    pub full: bool,
    /// True if a content file exists for this path.
    pub has_content: bool,
    /// True if the content comes from a folder's `index.md`.
    ///
    /// Relative links inside an index document resolve against the folder
    /// itself rather than its parent.
    pub index: bool,
    /// Explicit child order (child names) from folder metadata.
    pub pages: Vec<String>,
}

impl Document {
    /// Create a content document at the given URL path.
    #[must_use]
    pub fn page(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            has_content: true,
            ..Self::default()
        }
    }

    /// Create a metadata-only folder document at the given URL path.
    #[must_use]
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Content exists but could not be parsed.
    InvalidContent,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidContent,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidContent => "Invalid content",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for document scanning and retrieval.
///
/// Implementations handle backend details such as front matter parsing and
/// mapping URL paths to files.
pub trait Storage: Send + Sync {
    /// Scan and return all documents.
    ///
    /// Returns documents with URL paths. Hierarchy is derived by the consumer
    /// from path structure.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., the content root is
    /// missing or unreadable).
    fn scan(&self) -> Result<Vec<Document>, StorageError>;

    /// Read the markdown body of a document, without front matter.
    ///
    /// # Arguments
    ///
    /// * `path` - URL path (e.g., "python/day-1", "" for root)
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the document doesn't exist or can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;
}
