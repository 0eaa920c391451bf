//! Section-scoped content resolution and navigation for DocHub.
//!
//! This crate provides:
//! - [`Site`]: multi-section facade over an immutable content snapshot
//! - [`resolve`]: page lookup by section and relative key
//! - [`filter_tree`]: navigation tree filtered down to one section
//! - [`ContentSnapshot`]: pages and navigation tree loaded from a
//!   [`Storage`](dochub_storage::Storage) backend
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use dochub_site::{FilterDepth, PathKey, Section, SectionSpec, SectionTable, Site, SiteConfig};
//! use dochub_storage_fs::FsStorage;
//!
//! let sections = SectionTable::new(vec![
//!     SectionSpec::new(Section::new("python")?, "Python"),
//! ])?;
//! let config = SiteConfig { sections, depth: FilterDepth::Shallow };
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let site = Site::load(&storage, config)?;
//!
//! // Bare section URL resolves the default page (python/day-0)
//! let page = site.resolve("python", &PathKey::empty())?;
//! let nav = site.navigation("python")?;
//! # Ok(())
//! # }
//! ```

mod markdown;
mod nav;
mod page;
mod path_key;
mod resolver;
mod section;
mod site;
mod store;
mod util;

pub use markdown::{RenderedMarkdown, render_markdown, slugify};
pub use nav::{FilterDepth, NavNode, filter_tree};
pub use page::{Page, TocEntry};
pub use path_key::PathKey;
pub use resolver::{ResolveError, qualified_key, resolve};
pub use section::{
    DEFAULT_KEY, DEFAULT_PAGE_PREFIX, Section, SectionError, SectionSpec, SectionTable,
};
pub use site::{Site, SiteConfig, SiteError};
pub use store::{ContentSnapshot, ContentStore, LoadError, SnapshotBuilder};
