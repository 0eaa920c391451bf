//! Documentation sections and the per-section resolution table.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::PathKey;

/// Default index page key for a bare section URL.
pub const DEFAULT_KEY: &str = "day-0";

/// Default page naming convention token.
pub const DEFAULT_PAGE_PREFIX: &str = "day-";

/// Path segment under which a section's pages are served to the frontend.
const DOCS_SEGMENT: &str = "docs";

/// Section table errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SectionError {
    /// Identifier is not `[a-z0-9][a-z0-9-]*`.
    #[error("invalid section id \"{0}\": expected lowercase letters, digits and dashes")]
    InvalidId(String),
    /// Two sections share an identifier.
    #[error("duplicate section id \"{0}\"")]
    DuplicateId(String),
    /// Two sections share a canonical prefix.
    #[error("section prefix \"{0}\" is shared by more than one section")]
    DuplicatePrefix(PathKey),
    /// A section has an empty prefix or default key.
    #[error("section \"{section}\" has an empty {field}")]
    Empty {
        /// Section identifier.
        section: String,
        /// Offending field name.
        field: &'static str,
    },
}

/// Identifier of one documentation vertical (e.g., `python`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    /// Validate and wrap a section identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, SectionError> {
        let id = id.into();
        let valid = id
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            && id
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
        if valid {
            Ok(Self(id))
        } else {
            Err(SectionError::InvalidId(id))
        }
    }

    /// Identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the section table: how a section maps onto the content tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpec {
    /// Section identifier.
    pub id: Section,
    /// Display title.
    pub title: String,
    /// Short description for the landing listing.
    pub description: String,
    /// Topic labels for the landing listing.
    pub topics: Vec<String>,
    /// Feature highlights for the landing listing.
    pub features: Vec<String>,
    /// Canonical key prefix.
    pub prefix: PathKey,
    /// Relative key substituted for an empty request.
    pub default_key: PathKey,
    /// Page naming convention token kept by the navigation filter.
    pub page_prefix: String,
}

impl SectionSpec {
    /// Create a section with conventional defaults.
    ///
    /// Prefix is `[id]`, default key is `["day-0"]`, page prefix is `"day-"`.
    #[must_use]
    pub fn new(id: Section, title: impl Into<String>) -> Self {
        let prefix = PathKey::from([id.as_str()]);
        Self {
            id,
            title: title.into(),
            description: String::new(),
            topics: Vec::new(),
            features: Vec::new(),
            prefix,
            default_key: PathKey::from([DEFAULT_KEY]),
            page_prefix: DEFAULT_PAGE_PREFIX.to_owned(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set topic labels.
    #[must_use]
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Set feature highlights.
    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Set the canonical key prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: PathKey) -> Self {
        self.prefix = prefix;
        self
    }

    /// Set the default relative key.
    #[must_use]
    pub fn with_default_key(mut self, default_key: PathKey) -> Self {
        self.default_key = default_key;
        self
    }

    /// Set the page naming convention token.
    #[must_use]
    pub fn with_page_prefix(mut self, page_prefix: impl Into<String>) -> Self {
        self.page_prefix = page_prefix.into();
        self
    }

    /// True if a navigation entry named `name` is a page of this section.
    #[must_use]
    pub fn is_page_name(&self, name: &str) -> bool {
        name.starts_with(&self.page_prefix)
    }

    /// Frontend URL of the section's documentation root (`/python/docs`).
    #[must_use]
    pub fn url(&self) -> String {
        format!("/{}/{DOCS_SEGMENT}", self.id)
    }

    /// Frontend URL of a page, given its key relative to the prefix.
    ///
    /// `["day-2"]` in `python` becomes `/python/docs/day-2`; the empty key
    /// maps to [`SectionSpec::url`].
    #[must_use]
    pub fn page_url(&self, relative: &PathKey) -> String {
        if relative.is_empty() {
            self.url()
        } else {
            format!("{}/{relative}", self.url())
        }
    }
}

/// Ordered registry of sections, fixed at start-up.
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    sections: Vec<SectionSpec>,
}

impl SectionTable {
    /// Build a table, rejecting duplicate ids, shared prefixes and empty keys.
    pub fn new(sections: Vec<SectionSpec>) -> Result<Self, SectionError> {
        let mut ids = HashSet::new();
        let mut prefixes = HashSet::new();
        for spec in &sections {
            if spec.prefix.is_empty() {
                return Err(SectionError::Empty {
                    section: spec.id.to_string(),
                    field: "prefix",
                });
            }
            if spec.default_key.is_empty() {
                return Err(SectionError::Empty {
                    section: spec.id.to_string(),
                    field: "default key",
                });
            }
            if !ids.insert(&spec.id) {
                return Err(SectionError::DuplicateId(spec.id.to_string()));
            }
            if !prefixes.insert(&spec.prefix) {
                return Err(SectionError::DuplicatePrefix(spec.prefix.clone()));
            }
        }
        Ok(Self { sections })
    }

    /// Look up a section by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id.as_str() == id)
    }

    /// Sections in configured order.
    #[must_use]
    pub fn as_slice(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Iterate sections in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, SectionSpec> {
        self.sections.iter()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the table has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section whose prefix is the longest segment-wise prefix of `key`.
    #[must_use]
    pub fn owner_of(&self, key: &PathKey) -> Option<&SectionSpec> {
        self.sections
            .iter()
            .filter(|s| key.starts_with(&s.prefix))
            .max_by_key(|s| s.prefix.len())
    }

    /// Frontend URL for a qualified key.
    ///
    /// Keys under a section prefix map to that section's page URL. Keys
    /// outside every section fall back to `/{key}`.
    #[must_use]
    pub fn href(&self, key: &PathKey) -> String {
        self.owner_of(key)
            .and_then(|section| {
                key.strip_prefix(&section.prefix)
                    .map(|relative| section.page_url(&relative))
            })
            .unwrap_or_else(|| format!("/{key}"))
    }
}

impl<'a> IntoIterator for &'a SectionTable {
    type Item = &'a SectionSpec;
    type IntoIter = std::slice::Iter<'a, SectionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn spec(id: &str) -> SectionSpec {
        SectionSpec::new(Section::new(id).unwrap(), id)
    }

    #[test]
    fn test_section_id_validation() {
        assert!(Section::new("python").is_ok());
        assert!(Section::new("c-sharp").is_ok());
        assert!(Section::new("3d").is_ok());

        assert_eq!(
            Section::new("Python"),
            Err(SectionError::InvalidId("Python".to_owned()))
        );
        assert!(Section::new("").is_err());
        assert!(Section::new("-python").is_err());
        assert!(Section::new("py/thon").is_err());
        assert!(Section::new("..").is_err());
    }

    #[test]
    fn test_spec_defaults() {
        let python = spec("python");

        assert_eq!(python.prefix, PathKey::from(["python"]));
        assert_eq!(python.default_key, PathKey::from(["day-0"]));
        assert_eq!(python.page_prefix, "day-");
        assert!(python.description.is_empty());
    }

    #[test]
    fn test_spec_builders() {
        let go = spec("go")
            .with_description("Concurrency made simple")
            .with_topics(["Goroutines", "Channels"])
            .with_prefix(PathKey::from(["languages", "go"]))
            .with_default_key(PathKey::from(["intro"]))
            .with_page_prefix("lesson-");

        assert_eq!(go.description, "Concurrency made simple");
        assert_eq!(go.topics, vec!["Goroutines", "Channels"]);
        assert_eq!(go.prefix, PathKey::from(["languages", "go"]));
        assert_eq!(go.default_key, PathKey::from(["intro"]));
        assert!(go.is_page_name("lesson-4"));
        assert!(!go.is_page_name("day-4"));
    }

    #[test]
    fn test_table_lookup_preserves_order() {
        let table = SectionTable::new(vec![spec("devops"), spec("python"), spec("mysql")]).unwrap();

        let ids: Vec<&str> = table.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["devops", "python", "mysql"]);
        assert_eq!(table.get("python").unwrap().id.as_str(), "python");
        assert!(table.get("rust").is_none());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_table_rejects_duplicate_id() {
        let err = SectionTable::new(vec![
            spec("python"),
            spec("python").with_prefix(PathKey::from(["py"])),
        ])
        .unwrap_err();

        assert_eq!(err, SectionError::DuplicateId("python".to_owned()));
    }

    #[test]
    fn test_table_rejects_shared_prefix() {
        let err = SectionTable::new(vec![
            spec("python"),
            spec("py").with_prefix(PathKey::from(["python"])),
        ])
        .unwrap_err();

        assert_eq!(err, SectionError::DuplicatePrefix(PathKey::from(["python"])));
    }

    #[test]
    fn test_table_rejects_empty_keys() {
        let err = SectionTable::new(vec![spec("python").with_prefix(PathKey::empty())]).unwrap_err();
        assert!(matches!(err, SectionError::Empty { field: "prefix", .. }));

        let err =
            SectionTable::new(vec![spec("python").with_default_key(PathKey::empty())]).unwrap_err();
        assert!(matches!(err, SectionError::Empty { field: "default key", .. }));
    }

    #[test]
    fn test_section_urls() {
        let python = spec("python").with_features(["Automation"]);

        assert_eq!(python.url(), "/python/docs");
        assert_eq!(python.page_url(&PathKey::empty()), "/python/docs");
        assert_eq!(
            python.page_url(&PathKey::from(["day-2", "setup"])),
            "/python/docs/day-2/setup"
        );
        assert_eq!(python.features, vec!["Automation"]);
    }

    #[test]
    fn test_href_maps_keys_onto_owning_section() {
        let table = SectionTable::new(vec![
            spec("python"),
            spec("go").with_prefix(PathKey::from(["languages", "go"])),
            spec("lang").with_prefix(PathKey::from(["languages"])),
        ])
        .unwrap();

        assert_eq!(
            table.href(&PathKey::from(["python", "day-2"])),
            "/python/docs/day-2"
        );
        assert_eq!(table.href(&PathKey::from(["python"])), "/python/docs");
        assert_eq!(
            table.href(&PathKey::from(["languages", "go", "day-1"])),
            "/go/docs/day-1"
        );
        assert_eq!(
            table.href(&PathKey::from(["languages", "rust"])),
            "/lang/docs/rust"
        );
        assert_eq!(table.href(&PathKey::from(["about"])), "/about");
        assert_eq!(table.href(&PathKey::empty()), "/");
    }
}
