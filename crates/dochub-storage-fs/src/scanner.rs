//! Document discovery by filesystem walking.
//!
//! The scanner only identifies files that form documents and returns
//! lightweight references. `FsStorage` reads them to build `Document`s.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use dochub_storage::StorageError;

use crate::{BACKEND, INDEX_FILENAME};

/// Reference to a document's source files.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentRef {
    /// URL path (e.g., "", "python", "python/day-1").
    pub url_path: String,
    /// Path to content file (.md), if present.
    pub content_path: Option<PathBuf>,
    /// Path to folder metadata file, if present.
    pub meta_path: Option<PathBuf>,
    /// True if `content_path` is a folder's `index.md`.
    pub index: bool,
}

/// Discovers document references by walking the filesystem.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    meta_filename: String,
}

impl Scanner {
    pub fn new(source_dir: &Path, meta_filename: &str) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            meta_filename: meta_filename.to_owned(),
        }
    }

    /// Scan the source directory and return document references.
    ///
    /// References sharing a URL path (`python.md` next to `python/meta.yaml`)
    /// are merged into one; a folder's `index.md` wins over a sibling file.
    ///
    /// # Errors
    ///
    /// Fails if the source directory is missing or cannot be listed.
    /// Unreadable subdirectories are skipped with a warning.
    pub fn scan(&self) -> Result<Vec<DocumentRef>, StorageError> {
        if !self.source_dir.is_dir() {
            return Err(StorageError::not_found(&self.source_dir).with_backend(BACKEND));
        }
        fs::read_dir(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let mut refs = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut refs);
        Ok(merge_refs(refs))
    }

    fn scan_directory(&self, dir_path: &Path, url_prefix: &str, refs: &mut Vec<DocumentRef>) {
        let entries = match fs::read_dir(dir_path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Failed to read directory, skipping");
                return;
            }
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .filter(|(_, _, name)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        let mut index_md_path: Option<PathBuf> = None;
        let mut meta_path: Option<PathBuf> = None;

        for (path, is_dir, name) in entries {
            if is_dir {
                let child_url = join_url(url_prefix, &name);
                self.scan_directory(&path, &child_url, refs);
            } else if name == INDEX_FILENAME {
                index_md_path = Some(path);
            } else if let Some(stem) = name.strip_suffix(".md") {
                refs.push(DocumentRef {
                    url_path: join_url(url_prefix, stem),
                    content_path: Some(path),
                    meta_path: None,
                    index: false,
                });
            } else if name == self.meta_filename {
                meta_path = Some(path);
            }
        }

        if index_md_path.is_some() || meta_path.is_some() {
            refs.push(DocumentRef {
                url_path: url_prefix.to_owned(),
                index: index_md_path.is_some(),
                content_path: index_md_path,
                meta_path,
            });
        }
    }
}

/// Join a URL prefix and a child name.
fn join_url(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Merge references that share a URL path, keeping first-seen order.
fn merge_refs(refs: Vec<DocumentRef>) -> Vec<DocumentRef> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<DocumentRef> = Vec::with_capacity(refs.len());

    for doc_ref in refs {
        let Some(&pos) = positions.get(&doc_ref.url_path) else {
            positions.insert(doc_ref.url_path.clone(), merged.len());
            merged.push(doc_ref);
            continue;
        };

        let existing = &mut merged[pos];
        if doc_ref.meta_path.is_some() {
            existing.meta_path = doc_ref.meta_path;
        }
        match (&existing.content_path, doc_ref.content_path) {
            (None, Some(content)) => {
                existing.content_path = Some(content);
                existing.index = doc_ref.index;
            }
            (Some(_), Some(content)) if doc_ref.index => {
                tracing::warn!(
                    path = %doc_ref.url_path,
                    "Both a file and a folder index exist, using the folder index"
                );
                existing.content_path = Some(content);
                existing.index = true;
            }
            (Some(_), Some(_)) => {
                tracing::warn!(
                    path = %doc_ref.url_path,
                    "Both a file and a folder index exist, using the folder index"
                );
            }
            _ => {}
        }
    }

    merged
}
