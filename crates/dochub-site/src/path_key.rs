//! Ordered path segments identifying a page.

use std::fmt;

use serde::Serialize;

/// Ordered sequence of path segments (e.g., `["python", "day-3"]`).
///
/// A key is either relative to a section (what a route receives) or
/// qualified (section prefix followed by the relative key, what the content
/// store is indexed by). The empty key is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PathKey(Vec<String>);

impl PathKey {
    /// Create a key from segments.
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Create an empty key.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse a `/`-separated URL path, dropping empty segments.
    ///
    /// `"/python/day-1/"` becomes `["python", "day-1"]` and `""` the empty key.
    #[must_use]
    pub fn from_url_path(path: &str) -> Self {
        path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Segments of this key.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// True if the key has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Key without its last segment. `None` for the empty key.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.0.split_last()?;
        Some(Self(init.to_vec()))
    }

    /// Concatenate `self` and `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + other.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&other.0);
        Self(segments)
    }

    /// Append one segment, returning a new key.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_owned());
        Self(segments)
    }

    /// True if `prefix` is a segment-wise prefix of this key.
    ///
    /// `["python", "day-1"]` starts with `["python"]` but `["pythonic"]` does not.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Remove a segment-wise prefix, returning the remainder.
    #[must_use]
    pub fn strip_prefix(&self, prefix: &Self) -> Option<Self> {
        self.starts_with(prefix)
            .then(|| Self(self.0[prefix.0.len()..].to_vec()))
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl From<Vec<String>> for PathKey {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl<const N: usize> From<[&str; N]> for PathKey {
    fn from(segments: [&str; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PathKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_url_path() {
        assert_eq!(
            PathKey::from_url_path("python/day-1"),
            PathKey::from(["python", "day-1"])
        );
        assert_eq!(
            PathKey::from_url_path("/python//day-1/"),
            PathKey::from(["python", "day-1"])
        );
        assert!(PathKey::from_url_path("").is_empty());
        assert!(PathKey::from_url_path("/").is_empty());
    }

    #[test]
    fn test_display_joins_with_slash() {
        assert_eq!(PathKey::from(["python", "day-1"]).to_string(), "python/day-1");
        assert_eq!(PathKey::empty().to_string(), "");
    }

    #[test]
    fn test_concat() {
        let prefix = PathKey::from(["python"]);
        let rel = PathKey::from(["day-3", "variables"]);

        assert_eq!(
            prefix.concat(&rel),
            PathKey::from(["python", "day-3", "variables"])
        );
        assert_eq!(prefix.concat(&PathKey::empty()), prefix);
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let key = PathKey::from(["python", "day-1"]);

        assert!(key.starts_with(&PathKey::from(["python"])));
        assert!(key.starts_with(&PathKey::empty()));
        assert!(!key.starts_with(&PathKey::from(["py"])));
        assert!(!PathKey::from(["pythonic"]).starts_with(&PathKey::from(["python"])));
    }

    #[test]
    fn test_strip_prefix() {
        let key = PathKey::from(["python", "day-1"]);

        assert_eq!(
            key.strip_prefix(&PathKey::from(["python"])),
            Some(PathKey::from(["day-1"]))
        );
        assert_eq!(key.strip_prefix(&key), Some(PathKey::empty()));
        assert_eq!(key.strip_prefix(&PathKey::from(["devops"])), None);
    }

    #[test]
    fn test_parent_and_last() {
        let key = PathKey::from(["python", "day-1"]);

        assert_eq!(key.parent(), Some(PathKey::from(["python"])));
        assert_eq!(key.last(), Some("day-1"));
        assert_eq!(PathKey::empty().parent(), None);
        assert_eq!(PathKey::empty().last(), None);
    }

    #[test]
    fn test_child() {
        assert_eq!(
            PathKey::from(["python"]).child("day-2"),
            PathKey::from(["python", "day-2"])
        );
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&PathKey::from(["python", "day-1"])).unwrap();

        assert_eq!(json, r#"["python","day-1"]"#);
    }
}
