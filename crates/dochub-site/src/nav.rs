//! Navigation tree and section-scoped filtering.
//!
//! The full tree is shared by every section. Filtering never touches the
//! source: it clones the kept nodes into a new root, so concurrent callers
//! filtering for different sections cannot observe each other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::section::SectionSpec;

/// Node of the hierarchical navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavNode {
    /// Last key segment (empty for the root).
    pub name: String,
    /// Display title.
    pub title: String,
    /// Qualified key joined with `/`.
    pub path: String,
    /// True if a page exists at this key.
    pub has_page: bool,
    /// Ordered children, `None` for leaves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavNode>>,
}

impl NavNode {
    /// Create a leaf node.
    #[must_use]
    pub fn leaf(name: impl Into<String>, title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            path: path.into(),
            has_page: true,
            children: None,
        }
    }

    /// Attach children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Children as a slice (empty for leaves).
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Child names in order.
    #[must_use]
    pub fn child_names(&self) -> Vec<&str> {
        self.children().iter().map(|c| c.name.as_str()).collect()
    }
}

/// How far the navigation filter descends below the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterDepth {
    /// Filter direct children of the root only.
    #[default]
    Shallow,
    /// Also filter the children of the section's own folder to pages.
    OneLevel,
}

impl FilterDepth {
    /// Configuration spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shallow => "shallow",
            Self::OneLevel => "one-level",
        }
    }
}

impl fmt::Display for FilterDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDepth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shallow" => Ok(Self::Shallow),
            "one-level" => Ok(Self::OneLevel),
            other => Err(format!("unknown filter depth \"{other}\"")),
        }
    }
}

/// Filter a navigation tree down to one section.
///
/// Returns a new root carrying the source root's metadata. Its children are
/// the direct children named after the section or matching the section's
/// page prefix, in source order. With [`FilterDepth::OneLevel`], the
/// children of the section-named child are further reduced to page-prefixed
/// entries.
#[must_use]
pub fn filter_tree(tree: &NavNode, section: &SectionSpec, depth: FilterDepth) -> NavNode {
    let id = section.id.as_str();
    let children = tree
        .children()
        .iter()
        .filter(|child| child.name == id || section.is_page_name(&child.name))
        .map(|child| match depth {
            FilterDepth::OneLevel if child.name == id => descend(child, section),
            _ => child.clone(),
        })
        .collect();

    NavNode {
        name: tree.name.clone(),
        title: tree.title.clone(),
        path: tree.path.clone(),
        has_page: tree.has_page,
        children: Some(children),
    }
}

/// Copy a node keeping only page-prefixed children.
fn descend(node: &NavNode, section: &SectionSpec) -> NavNode {
    NavNode {
        name: node.name.clone(),
        title: node.title.clone(),
        path: node.path.clone(),
        has_page: node.has_page,
        children: node.children.as_ref().map(|children| {
            children
                .iter()
                .filter(|c| section.is_page_name(&c.name))
                .cloned()
                .collect()
        }),
    }
}
