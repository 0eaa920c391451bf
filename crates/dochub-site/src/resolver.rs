//! Section-scoped page resolution.
//!
//! Resolution builds the qualified key and delegates the lookup to the
//! content store. Segments are not sanitized: the store matches keys
//! exactly, so traversal-looking segments such as `..` simply miss.

use std::sync::Arc;

use crate::PathKey;
use crate::page::Page;
use crate::section::SectionSpec;
use crate::store::ContentStore;

/// Resolution error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No page exists at the qualified key.
    #[error("page not found: {key}")]
    NotFound {
        /// Qualified key that was looked up.
        key: PathKey,
    },
}

/// Qualified key for a request: the section prefix followed by `segments`,
/// or by the section's default key when `segments` is empty.
#[must_use]
pub fn qualified_key(section: &SectionSpec, segments: &PathKey) -> PathKey {
    if segments.is_empty() {
        section.prefix.concat(&section.default_key)
    } else {
        section.prefix.concat(segments)
    }
}

/// Resolve a page for a section.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] if the store has no page at the
/// qualified key, or returns one whose key lies outside the section prefix.
pub fn resolve(
    store: &dyn ContentStore,
    section: &SectionSpec,
    segments: &PathKey,
) -> Result<Arc<Page>, ResolveError> {
    let key = qualified_key(section, segments);
    match store.get_page(&key) {
        Some(page) if page.key.starts_with(&section.prefix) => Ok(page),
        Some(page) => {
            tracing::warn!(
                section = %section.id,
                requested = %key,
                returned = %page.key,
                "Store returned a page outside the section prefix"
            );
            Err(ResolveError::NotFound { key })
        }
        None => Err(ResolveError::NotFound { key }),
    }
}
