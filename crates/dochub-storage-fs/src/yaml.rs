//! YAML front matter and folder metadata parsing.

use serde::Deserialize;

/// Fields read from a markdown file's front matter block.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub full: bool,
}

/// Fields read from a folder's metadata file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct FolderMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Child names in display order.
    pub pages: Vec<String>,
}

/// Split a markdown document into its front matter block and body.
///
/// Front matter is a leading `---` line, YAML, and a closing `---` line.
/// Content without a complete block is returned unchanged as the body.
pub(crate) fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse front matter YAML. Empty input yields the default.
pub(crate) fn parse_front_matter(yaml: &str) -> Result<FrontMatter, serde_yaml::Error> {
    parse_or_default(yaml)
}

/// Parse folder metadata YAML. Empty input yields the default.
pub(crate) fn parse_folder_meta(yaml: &str) -> Result<FolderMeta, serde_yaml::Error> {
    parse_or_default(yaml)
}

fn parse_or_default<T>(yaml: &str) -> Result<T, serde_yaml::Error>
where
    T: Default + for<'de> Deserialize<'de>,
{
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(trimmed)
}
