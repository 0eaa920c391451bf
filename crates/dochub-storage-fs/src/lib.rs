//! Filesystem storage implementation for DocHub content.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](dochub_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning for markdown files
//! - YAML front matter (`title`, `description`, `full`)
//! - Folder metadata files (`meta.yaml`: `title`, `description`, `pages`)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use dochub_storage::Storage;
//! use dochub_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! for doc in storage.scan()? {
//!     println!("{}", doc.path);
//! }
//! ```

mod scanner;
mod yaml;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use dochub_storage::{Document, Storage, StorageError, StorageErrorKind};
use scanner::{DocumentRef, Scanner};
use yaml::{FolderMeta, FrontMatter, parse_folder_meta, parse_front_matter, split_front_matter};

/// Backend identifier for error messages.
pub(crate) const BACKEND: &str = "Fs";

/// Folder index filename, matched exactly.
pub(crate) const INDEX_FILENAME: &str = "index.md";

/// Default metadata filename.
const DEFAULT_META_FILENAME: &str = "meta.yaml";

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for markdown files. URL paths map to
/// files as follows:
///
/// - `python/day-1` → `python/day-1.md`
/// - `devops` → `devops/index.md` (preferred) or `devops.md`
/// - `""` → `index.md`
pub struct FsStorage {
    source_dir: PathBuf,
    scanner: Scanner,
}

impl FsStorage {
    /// Create a new filesystem storage using `meta.yaml` folder metadata.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_meta_filename(source_dir, DEFAULT_META_FILENAME)
    }

    /// Create a new filesystem storage with a custom metadata filename.
    #[must_use]
    pub fn with_meta_filename(source_dir: PathBuf, meta_filename: &str) -> Self {
        let scanner = Scanner::new(&source_dir, meta_filename);
        Self {
            source_dir,
            scanner,
        }
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Reject URL paths containing `..` segments.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve URL path to content file path.
    ///
    /// Prefers `{path}/index.md`, then falls back to `{path}.md`.
    fn resolve_content(&self, url_path: &str) -> Option<PathBuf> {
        let index_path = self.source_dir.join(url_path).join(INDEX_FILENAME);
        if index_path.is_file() {
            return Some(index_path);
        }
        if url_path.is_empty() {
            return None;
        }

        let file_path = self.source_dir.join(format!("{url_path}.md"));
        file_path.is_file().then_some(file_path)
    }

    /// Build a `Document` from a `DocumentRef`.
    ///
    /// A folder's metadata title only names folders without an index page;
    /// an index page is titled by its own front matter (or later its H1).
    /// Unreadable or malformed YAML is logged and ignored.
    fn build_document(doc_ref: &DocumentRef) -> Document {
        let front_matter = doc_ref
            .content_path
            .as_deref()
            .map(|p| read_front_matter(p, &doc_ref.url_path))
            .unwrap_or_default();
        let folder_meta = doc_ref
            .meta_path
            .as_deref()
            .map(|p| read_folder_meta(p, &doc_ref.url_path))
            .unwrap_or_default();

        Document {
            path: doc_ref.url_path.clone(),
            title: if doc_ref.content_path.is_some() {
                front_matter.title
            } else {
                folder_meta.title
            },
            description: front_matter.description.or(folder_meta.description),
            full: front_matter.full,
            has_content: doc_ref.content_path.is_some(),
            index: doc_ref.index,
            pages: folder_meta.pages,
        }
    }
}

/// Read and parse a content file's front matter.
fn read_front_matter(path: &Path, url_path: &str) -> FrontMatter {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %url_path, error = %e, "Failed to read content file");
            return FrontMatter::default();
        }
    };
    let (Some(yaml), _) = split_front_matter(&content) else {
        return FrontMatter::default();
    };
    parse_front_matter(yaml)
        .inspect_err(|e| {
            tracing::warn!(path = %url_path, error = %e, "Failed to parse front matter, ignoring");
        })
        .unwrap_or_default()
}

/// Read and parse a folder metadata file.
fn read_folder_meta(path: &Path, url_path: &str) -> FolderMeta {
    fs::read_to_string(path)
        .inspect_err(|e| {
            tracing::warn!(path = %url_path, error = %e, "Failed to read metadata file, skipping");
        })
        .ok()
        .and_then(|content| {
            parse_folder_meta(&content)
                .inspect_err(|e| {
                    tracing::warn!(path = %url_path, error = %e, "Failed to parse metadata, skipping");
                })
                .ok()
        })
        .unwrap_or_default()
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let refs = self.scanner.scan()?;
        let documents: Vec<Document> = refs.par_iter().map(Self::build_document).collect();
        tracing::debug!(documents = documents.len(), source_dir = %self.source_dir.display(), "Scanned content");
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self
            .resolve_content(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        let content = fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))?;
        let (_, body) = split_front_matter(&content);
        Ok(body.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn find<'a>(docs: &'a [Document], path: &str) -> &'a Document {
        docs.iter()
            .find(|d| d.path == path)
            .unwrap_or_else(|| panic!("no document for {path:?}"))
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = tempfile::tempdir().unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/docs"));

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_scan_sections() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "python/day-0.md", "# Intro");
        write(temp_dir.path(), "python/day-1.md", "# Variables");
        write(temp_dir.path(), "devops/day-0.md", "# Overview");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let mut paths: Vec<_> = docs.iter().map(|d| d.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, vec!["devops/day-0", "python/day-0", "python/day-1"]);
        assert!(docs.iter().all(|d| d.has_content));
    }

    #[test]
    fn test_scan_reads_front_matter() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "python/day-1.md",
            "---\ntitle: Variables\ndescription: Names and values\nfull: true\n---\n# Ignored H1\n",
        );

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let doc = find(&docs, "python/day-1");
        assert_eq!(doc.title.as_deref(), Some("Variables"));
        assert_eq!(doc.description.as_deref(), Some("Names and values"));
        assert!(doc.full);
    }

    #[test]
    fn test_scan_without_front_matter_has_no_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "python/day-1.md", "# Variables\n");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        assert!(find(&docs, "python/day-1").title.is_none());
    }

    #[test]
    fn test_scan_invalid_front_matter_is_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "python/day-1.md", "---\ntitle: [oops\n---\nBody");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let doc = find(&docs, "python/day-1");
        assert!(doc.has_content);
        assert!(doc.title.is_none());
    }

    #[test]
    fn test_scan_folder_meta() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "python/meta.yaml",
            "title: Python Track\ndescription: Thirty days\npages: [day-1, day-0]",
        );
        write(temp_dir.path(), "python/day-0.md", "# Intro");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let folder = find(&docs, "python");
        assert!(!folder.has_content);
        assert_eq!(folder.title.as_deref(), Some("Python Track"));
        assert_eq!(folder.description.as_deref(), Some("Thirty days"));
        assert_eq!(folder.pages, vec!["day-1", "day-0"]);
    }

    #[test]
    fn test_scan_front_matter_overrides_folder_meta() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "devops/meta.yaml", "title: From Meta\npages: [day-0]");
        write(temp_dir.path(), "devops/index.md", "---\ntitle: From Index\n---\nBody");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let folder = find(&docs, "devops");
        assert!(folder.has_content);
        assert!(folder.index);
        assert_eq!(folder.title.as_deref(), Some("From Index"));
        assert_eq!(folder.pages, vec!["day-0"]);
    }

    #[test]
    fn test_scan_index_page_ignores_folder_meta_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "devops/meta.yaml", "title: Folder Title\ndescription: Pipelines");
        write(temp_dir.path(), "devops/index.md", "# DevOps Home");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let folder = find(&docs, "devops");
        assert!(folder.index);
        assert!(folder.title.is_none());
        assert_eq!(folder.description.as_deref(), Some("Pipelines"));
    }

    #[test]
    fn test_read_capitalized_index_as_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "devops/Index.md", "# Capitalized");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].path, "devops/Index");
        assert_eq!(storage.read(&docs[0].path).unwrap(), "# Capitalized");
    }

    #[test]
    fn test_scan_with_custom_meta_filename() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "python/_folder.yaml", "title: Custom");
        write(temp_dir.path(), "mysql/meta.yaml", "title: Ignored");

        let storage = FsStorage::with_meta_filename(temp_dir.path().to_path_buf(), "_folder.yaml");
        let docs = storage.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(find(&docs, "python").title.as_deref(), Some("Custom"));
    }

    #[test]
    fn test_read_strips_front_matter() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "python/day-1.md",
            "---\ntitle: Variables\n---\n# Variables\n\nContent.",
        );

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(
            storage.read("python/day-1").unwrap(),
            "# Variables\n\nContent."
        );
    }

    #[test]
    fn test_read_folder_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "devops/index.md", "# DevOps");
        write(temp_dir.path(), "index.md", "# Home");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("devops").unwrap(), "# DevOps");
        assert_eq!(storage.read("").unwrap(), "# Home");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("python/day-99").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = tempfile::tempdir().unwrap();

        let storage = FsStorage::new(temp_dir.path().join("docs"));
        let err = storage.read("python/../../secret").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_resolve_content_prefers_directory_index() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "python.md", "# File");
        write(temp_dir.path(), "python/index.md", "# Index");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let resolved = storage.resolve_content("python").unwrap();
        assert!(resolved.ends_with("python/index.md"));
    }

    #[test]
    fn test_resolve_content_keeps_dotted_names() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "javascript/es2015.features.md", "# ES2015");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.resolve_content("javascript/es2015.features").is_some());
    }
}
