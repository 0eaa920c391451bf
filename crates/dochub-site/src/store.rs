//! Content store: immutable snapshot of pages and the navigation tree.
//!
//! A [`ContentSnapshot`] is built once, either from a [`Storage`] backend
//! with [`ContentSnapshot::load`] or in memory with
//! [`ContentSnapshot::builder`], and is read-only afterwards.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use rayon::prelude::*;

use dochub_storage::{Document, Storage, StorageError};

use crate::markdown::render_markdown;
use crate::nav::NavNode;
use crate::page::Page;
use crate::path_key::PathKey;
use crate::section::SectionTable;
use crate::util::{natural_cmp, titlecase_from_slug};

/// Title of the navigation root when the content tree gives none.
const ROOT_TITLE: &str = "Documentation";

/// Read-only lookup interface over loaded content.
pub trait ContentStore: Send + Sync {
    /// Look up a page by its qualified key.
    fn get_page(&self, key: &PathKey) -> Option<Arc<Page>>;

    /// Root of the full, unfiltered navigation tree.
    fn page_tree(&self) -> &NavNode;

    /// Every page key, in navigation tree order.
    fn generate_params(&self) -> Vec<PathKey>;
}

/// Content snapshot loading error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The storage backend could not list documents.
    #[error("failed to scan content: {0}")]
    Scan(#[from] StorageError),
}

/// Immutable set of pages with the navigation tree derived from their keys.
#[derive(Debug)]
pub struct ContentSnapshot {
    pages: HashMap<PathKey, Arc<Page>>,
    tree: NavNode,
    order: Vec<PathKey>,
}

impl ContentSnapshot {
    /// Start an in-memory snapshot.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Build a snapshot from a storage backend with no sections configured.
    ///
    /// Rewritten links point at `/{key}`; see [`ContentSnapshot::load_with_sections`].
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Scan`] if the backend cannot list documents.
    pub fn load(storage: &dyn Storage) -> Result<Self, LoadError> {
        Self::load_with_sections(storage, &SectionTable::default())
    }

    /// Build a snapshot from a storage backend.
    ///
    /// Content documents are read and rendered in parallel. Relative links
    /// are rewritten to the page URLs of the sections that own their
    /// targets. Documents that fail to read are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Scan`] if the backend cannot list documents.
    pub fn load_with_sections(
        storage: &dyn Storage,
        sections: &SectionTable,
    ) -> Result<Self, LoadError> {
        let documents = storage.scan()?;

        let pages: Vec<Page> = documents
            .par_iter()
            .filter(|doc| doc.has_content)
            .filter_map(|doc| render_document(storage, doc, sections))
            .collect();

        let mut builder = Self::builder();
        for doc in &documents {
            let key = PathKey::from_url_path(&doc.path);
            if !doc.has_content
                && let Some(title) = &doc.title
            {
                builder = builder.with_folder(key.clone(), title.clone());
            }
            if !doc.pages.is_empty() {
                builder = builder.with_order(key, doc.pages.clone());
            }
        }
        for page in pages {
            builder = builder.with_page(page);
        }

        let snapshot = builder.build();
        tracing::info!(
            documents = documents.len(),
            pages = snapshot.pages.len(),
            "Content snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the snapshot has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ContentStore for ContentSnapshot {
    fn get_page(&self, key: &PathKey) -> Option<Arc<Page>> {
        self.pages.get(key).cloned()
    }

    fn page_tree(&self) -> &NavNode {
        &self.tree
    }

    fn generate_params(&self) -> Vec<PathKey> {
        self.order.clone()
    }
}

/// Read and render one content document.
fn render_document(storage: &dyn Storage, doc: &Document, links: &SectionTable) -> Option<Page> {
    let body = match storage.read(&doc.path) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(path = %doc.path, error = %e, "Failed to read document, skipping");
            return None;
        }
    };

    let key = PathKey::from_url_path(&doc.path);
    let base_path = if doc.index {
        key.to_string()
    } else {
        key.parent().map(|p| p.to_string()).unwrap_or_default()
    };
    let rendered = render_markdown(&body, &base_path, links);

    let title = doc
        .title
        .clone()
        .or(rendered.title)
        .unwrap_or_else(|| default_title(&key));

    Some(Page {
        key,
        title,
        description: doc.description.clone().unwrap_or_default(),
        body: rendered.html,
        toc: rendered.toc,
        full: doc.full,
    })
}

/// Title derived from the last key segment.
fn default_title(key: &PathKey) -> String {
    key.last()
        .map_or_else(|| ROOT_TITLE.to_owned(), titlecase_from_slug)
}

#[derive(Debug, Default)]
struct Entry {
    page: Option<Arc<Page>>,
    title: Option<String>,
    order: Vec<String>,
}

/// Builder for [`ContentSnapshot`].
///
/// Keys of pages and folders, plus all their ancestors, become navigation
/// nodes. Children are ordered by the parent's explicit order first, then
/// naturally (`day-2` before `day-10`).
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    entries: HashMap<PathKey, Entry>,
}

impl SnapshotBuilder {
    /// Add a page. A later page with the same key replaces the earlier one.
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        let entry = self.entries.entry(page.key.clone()).or_default();
        if entry.page.is_some() {
            tracing::warn!(key = %page.key, "Duplicate page key, keeping the last one");
        }
        entry.page = Some(Arc::new(page));
        self
    }

    /// Add a titled folder without a page of its own.
    #[must_use]
    pub fn with_folder(mut self, key: PathKey, title: impl Into<String>) -> Self {
        self.entries.entry(key).or_default().title = Some(title.into());
        self
    }

    /// Set the explicit child order for a folder. Unlisted children follow.
    #[must_use]
    pub fn with_order(mut self, key: PathKey, order: Vec<String>) -> Self {
        self.entries.entry(key).or_default().order = order;
        self
    }

    /// Build the snapshot.
    #[must_use]
    pub fn build(self) -> ContentSnapshot {
        let mut children: HashMap<PathKey, BTreeSet<String>> = HashMap::new();
        for key in self.entries.keys() {
            let mut current = key.clone();
            while let Some(parent) = current.parent() {
                if let Some(name) = current.last() {
                    children.entry(parent.clone()).or_default().insert(name.to_owned());
                }
                current = parent;
            }
        }

        let mut order = Vec::new();
        let tree = self.build_node(&PathKey::empty(), &children, &mut order);
        let pages = self
            .entries
            .into_iter()
            .filter_map(|(key, entry)| entry.page.map(|page| (key, page)))
            .collect();

        ContentSnapshot { pages, tree, order }
    }

    fn build_node(
        &self,
        key: &PathKey,
        children: &HashMap<PathKey, BTreeSet<String>>,
        order: &mut Vec<PathKey>,
    ) -> NavNode {
        let entry = self.entries.get(key);
        let page = entry.and_then(|e| e.page.as_ref());
        if page.is_some() {
            order.push(key.clone());
        }

        let title = page
            .map(|p| p.title.clone())
            .or_else(|| entry.and_then(|e| e.title.clone()))
            .unwrap_or_else(|| default_title(key));

        let child_nodes = children.get(key).map(|names| {
            let explicit = entry.map_or(&[][..], |e| e.order.as_slice());
            sorted_children(names, explicit)
                .into_iter()
                .map(|name| self.build_node(&key.child(name), children, order))
                .collect()
        });

        NavNode {
            name: key.last().unwrap_or_default().to_owned(),
            title,
            path: key.to_string(),
            has_page: page.is_some(),
            children: child_nodes,
        }
    }
}

/// Order child names: explicitly listed ones first, the rest naturally.
fn sorted_children<'a>(names: &'a BTreeSet<String>, explicit: &[String]) -> Vec<&'a str> {
    let mut result: Vec<&str> = Vec::with_capacity(names.len());
    for name in explicit {
        if let Some(name) = names.get(name)
            && !result.contains(&name.as_str())
        {
            result.push(name);
        }
    }

    let mut rest: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|name| !result.contains(name))
        .collect();
    rest.sort_by(|a, b| natural_cmp(a, b));

    result.extend(rest);
    result
}
