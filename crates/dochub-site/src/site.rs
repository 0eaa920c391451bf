//! Multi-section site facade.
//!
//! [`Site`] ties the section table, the navigation depth and a content store
//! together. All methods are read-only and safe to call concurrently.

use std::sync::Arc;

use dochub_storage::Storage;

use crate::nav::{FilterDepth, NavNode, filter_tree};
use crate::page::Page;
use crate::path_key::PathKey;
use crate::resolver::{ResolveError, resolve};
use crate::section::{SectionSpec, SectionTable};
use crate::store::{ContentSnapshot, ContentStore, LoadError};

/// Site-level settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Configured sections.
    pub sections: SectionTable,
    /// Navigation filter depth applied to every section.
    pub depth: FilterDepth,
}

/// Site query error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// No section with this identifier.
    #[error("unknown section: {0}")]
    UnknownSection(String),
    /// No page at the qualified key.
    #[error("page not found: {key}")]
    NotFound {
        /// Qualified key that was looked up.
        key: PathKey,
    },
}

impl From<ResolveError> for SiteError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { key } => Self::NotFound { key },
        }
    }
}

/// Multi-section documentation site.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use dochub_site::{Site, SiteConfig};
/// use dochub_storage_fs::FsStorage;
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let site = Site::load(&storage, config)?;
///
/// let page = site.resolve("python", &PathKey::empty())?;
/// let nav = site.navigation("python")?;
/// ```
pub struct Site {
    sections: SectionTable,
    depth: FilterDepth,
    store: Arc<dyn ContentStore>,
}

impl Site {
    /// Create a site over an existing content store.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: SiteConfig) -> Self {
        Self {
            sections: config.sections,
            depth: config.depth,
            store,
        }
    }

    /// Load a content snapshot from storage and create a site over it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the storage backend cannot be scanned.
    pub fn load(storage: &dyn Storage, config: SiteConfig) -> Result<Self, LoadError> {
        let snapshot = ContentSnapshot::load_with_sections(storage, &config.sections)?;
        Ok(Self::new(Arc::new(snapshot), config))
    }

    /// Sections in configured order.
    #[must_use]
    pub fn sections(&self) -> &[SectionSpec] {
        self.sections.as_slice()
    }

    /// Navigation filter depth.
    #[must_use]
    pub fn depth(&self) -> FilterDepth {
        self.depth
    }

    /// Underlying content store.
    #[must_use]
    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    /// Look up a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownSection`] if no section has this id.
    pub fn section(&self, id: &str) -> Result<&SectionSpec, SiteError> {
        self.sections
            .get(id)
            .ok_or_else(|| SiteError::UnknownSection(id.to_owned()))
    }

    /// Resolve a page within a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownSection`] or [`SiteError::NotFound`].
    pub fn resolve(&self, id: &str, segments: &PathKey) -> Result<Arc<Page>, SiteError> {
        let section = self.section(id)?;
        Ok(resolve(self.store.as_ref(), section, segments)?)
    }

    /// Navigation tree filtered for a section.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownSection`] if no section has this id.
    pub fn navigation(&self, id: &str) -> Result<NavNode, SiteError> {
        let section = self.section(id)?;
        Ok(filter_tree(self.store.page_tree(), section, self.depth))
    }

    /// Static-generation parameters for a section.
    ///
    /// Every page key under the section prefix, relative to the prefix, in
    /// tree order. The empty key comes first when the default page exists,
    /// since the bare section URL then resolves too.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownSection`] if no section has this id.
    pub fn params(&self, id: &str) -> Result<Vec<PathKey>, SiteError> {
        let section = self.section(id)?;
        let mut params: Vec<PathKey> = self
            .store
            .generate_params()
            .iter()
            .filter_map(|key| key.strip_prefix(&section.prefix))
            .filter(|key| !key.is_empty())
            .collect();

        if params.contains(&section.default_key) {
            params.insert(0, PathKey::empty());
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use dochub_storage::MockStorage;

    use super::*;
    use crate::Section;

    assert_impl_all!(Site: Send, Sync);
    assert_impl_all!(ContentSnapshot: Send, Sync);
    assert_impl_all!(Page: Send, Sync);
    assert_impl_all!(NavNode: Send, Sync);

    fn spec(id: &str) -> SectionSpec {
        SectionSpec::new(Section::new(id).unwrap(), id)
    }

    fn config(depth: FilterDepth) -> SiteConfig {
        SiteConfig {
            sections: SectionTable::new(vec![spec("devops"), spec("javascript"), spec("python")])
                .unwrap(),
            depth,
        }
    }

    fn site(depth: FilterDepth) -> Site {
        let store = ContentSnapshot::builder()
            .with_page(Page::new(PathKey::from(["python", "day-0"]), "Intro"))
            .with_page(Page::new(PathKey::from(["python", "day-1"]), "Variables"))
            .with_page(Page::new(PathKey::from(["python", "notes"]), "Notes"))
            .with_page(Page::new(PathKey::from(["javascript", "day-1"]), "Let"))
            .with_page(Page::new(PathKey::from(["day-1"]), "Shared Day 1"))
            .build();
        Site::new(Arc::new(store), config(depth))
    }

    #[test]
    fn test_sections_in_order() {
        let site = site(FilterDepth::Shallow);

        let ids: Vec<&str> = site.sections().iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["devops", "javascript", "python"]);
    }

    #[test]
    fn test_unknown_section() {
        let site = site(FilterDepth::Shallow);

        assert_eq!(
            site.resolve("rust", &PathKey::empty()).unwrap_err(),
            SiteError::UnknownSection("rust".to_owned())
        );
        assert!(site.navigation("rust").is_err());
        assert!(site.params("rust").is_err());
    }

    #[test]
    fn test_resolve_default_and_missing() {
        let site = site(FilterDepth::Shallow);

        let page = site.resolve("python", &PathKey::empty()).unwrap();
        assert_eq!(page.title, "Intro");

        let err = site.resolve("python", &PathKey::from(["day-99"])).unwrap_err();
        assert_eq!(
            err,
            SiteError::NotFound {
                key: PathKey::from(["python", "day-99"])
            }
        );
    }

    #[test]
    fn test_navigation_shallow() {
        let site = site(FilterDepth::Shallow);

        let nav = site.navigation("python").unwrap();

        assert_eq!(nav.child_names(), vec!["day-1", "python"]);
        assert_eq!(
            nav.children()[1].child_names(),
            vec!["day-0", "day-1", "notes"]
        );
    }

    #[test]
    fn test_navigation_one_level() {
        let site = site(FilterDepth::OneLevel);

        let nav = site.navigation("python").unwrap();

        assert_eq!(nav.children()[1].child_names(), vec!["day-0", "day-1"]);
    }

    #[test]
    fn test_navigation_leaves_store_tree_untouched() {
        let site = site(FilterDepth::OneLevel);
        let before = site.store().page_tree().clone();

        let _ = site.navigation("python").unwrap();
        let _ = site.navigation("javascript").unwrap();

        assert_eq!(site.store().page_tree(), &before);
    }

    #[test]
    fn test_params_strip_prefix_and_include_index() {
        let site = site(FilterDepth::Shallow);

        let params = site.params("python").unwrap();

        assert_eq!(
            params,
            vec![
                PathKey::empty(),
                PathKey::from(["day-0"]),
                PathKey::from(["day-1"]),
                PathKey::from(["notes"]),
            ]
        );
    }

    #[test]
    fn test_params_without_default_page() {
        let site = site(FilterDepth::Shallow);

        assert_eq!(
            site.params("javascript").unwrap(),
            vec![PathKey::from(["day-1"])]
        );
        assert!(site.params("devops").unwrap().is_empty());
    }

    #[test]
    fn test_load_from_storage() {
        let storage = MockStorage::new()
            .with_file("python/day-0", "# Intro")
            .with_file("devops/day-0", "# Pipelines");

        let site = Site::load(&storage, config(FilterDepth::Shallow)).unwrap();

        assert_eq!(
            site.resolve("devops", &PathKey::empty()).unwrap().title,
            "Pipelines"
        );
    }

    #[test]
    fn test_load_from_filesystem() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        let python = docs.join("python");
        std::fs::create_dir_all(&python).unwrap();
        std::fs::write(
            python.join("day-0.md"),
            "---\ntitle: Welcome\ndescription: Thirty days of Python\nfull: true\n---\n# Ignored\n\n## Setup\n",
        )
        .unwrap();
        std::fs::write(python.join("day-1.md"), "# Variables\n\n[Back](./day-0.md)").unwrap();
        std::fs::write(python.join("day-10.md"), "# Modules").unwrap();
        std::fs::write(python.join("meta.yaml"), "title: Python").unwrap();
        std::fs::create_dir_all(docs.join("devops")).unwrap();
        std::fs::write(docs.join("devops").join("day-0.md"), "# CI").unwrap();

        let storage = dochub_storage_fs::FsStorage::new(docs);
        let site = Site::load(&storage, config(FilterDepth::OneLevel)).unwrap();

        let index = site.resolve("python", &PathKey::empty()).unwrap();
        assert_eq!(index.title, "Welcome");
        assert_eq!(index.description, "Thirty days of Python");
        assert!(index.full);
        assert_eq!(index.toc[0].id, "setup");

        let day1 = site.resolve("python", &PathKey::from(["day-1"])).unwrap();
        let python = site.section("python").unwrap();
        let href = format!(r#"href="{}""#, python.page_url(&PathKey::from(["day-0"])));
        assert_eq!(href, r#"href="/python/docs/day-0""#);
        assert!(day1.body.contains(&href), "{}", day1.body);

        assert!(matches!(
            site.resolve("python", &PathKey::from(["day-99"])),
            Err(SiteError::NotFound { .. })
        ));

        let nav = site.navigation("python").unwrap();
        assert_eq!(nav.child_names(), vec!["python"]);
        assert_eq!(nav.children()[0].title, "Python");
        assert_eq!(
            nav.children()[0].child_names(),
            vec!["day-0", "day-1", "day-10"]
        );

        assert_eq!(site.params("python").unwrap().len(), 4);
    }

    #[test]
    fn test_index_page_title_comes_from_its_heading() {
        let temp_dir = tempfile::tempdir().unwrap();
        let devops = temp_dir.path().join("devops");
        std::fs::create_dir_all(&devops).unwrap();
        std::fs::write(devops.join("index.md"), "# DevOps Home").unwrap();
        std::fs::write(devops.join("meta.yaml"), "title: Folder Title").unwrap();
        std::fs::write(devops.join("day-0.md"), "# Pipelines").unwrap();

        let storage = dochub_storage_fs::FsStorage::new(temp_dir.path().to_path_buf());
        let site = Site::load(&storage, config(FilterDepth::Shallow)).unwrap();

        let index = site.store().get_page(&PathKey::from(["devops"])).unwrap();
        assert_eq!(index.title, "DevOps Home");
        let nav = site.navigation("devops").unwrap();
        assert_eq!(nav.children()[0].title, "DevOps Home");
    }
}
