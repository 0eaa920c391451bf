//! Markdown to HTML conversion with heading anchors and link rewriting.
//!
//! Parsing and HTML output are delegated to `pulldown-cmark`. This module
//! only adjusts the event stream:
//!
//! - headings get unique slug ids and feed the table of contents
//! - the first H1 becomes the page title candidate
//! - relative `.md` links become frontend URLs of the pages they target

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::PathKey;
use crate::page::TocEntry;
use crate::section::SectionTable;

/// Output of [`render_markdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// Rendered HTML.
    pub html: String,
    /// Text of the first H1, if any.
    pub title: Option<String>,
    /// Headings other than the title, in document order.
    pub toc: Vec<TocEntry>,
}

/// Convert markdown to HTML.
///
/// `base_path` is the URL directory the document lives in (e.g., `"python"`
/// for `python/day-1.md`) and is used to resolve relative `.md` links. The
/// resolved key is turned into an href by [`SectionTable::href`], so
/// `./day-2.md` from `python/day-1.md` becomes `/python/docs/day-2`.
#[must_use]
pub fn render_markdown(text: &str, base_path: &str, links: &SectionTable) -> RenderedMarkdown {
    let mut events: Vec<Event<'_>> = Parser::new_ext(text, parser_options()).collect();
    let mut headings = HeadingState::default();

    for i in 0..events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let level = heading_level_to_num(*level);
                let explicit_id = id.as_ref().map(ToString::to_string);
                let text = heading_text(&events[i + 1..]);
                let id = headings.complete_heading(level, &text, explicit_id);
                if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[i] {
                    *slot = Some(CowStr::from(id));
                }
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                if let Some(href) = rewrite_link(dest_url, base_path, links)
                    && let Event::Start(Tag::Link { dest_url, .. }) = &mut events[i]
                {
                    *dest_url = CowStr::from(href);
                }
            }
            _ => {}
        }
    }

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());

    RenderedMarkdown {
        html: out,
        title: headings.title,
        toc: headings.toc,
    }
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Collect the plain text of a heading from the events following its start.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Tracks heading ids, the title and the table of contents.
#[derive(Default)]
struct HeadingState {
    title: Option<String>,
    toc: Vec<TocEntry>,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    /// Record a heading and return its anchor id.
    ///
    /// The first H1 becomes the title and is left out of the TOC.
    fn complete_heading(&mut self, level: u8, text: &str, explicit_id: Option<String>) -> String {
        let text = text.trim();
        let id = explicit_id.unwrap_or_else(|| self.generate_id(text));

        if level == 1 && self.title.is_none() {
            self.title = Some(text.to_owned());
        } else {
            self.toc.push(TocEntry {
                level,
                title: text.to_owned(),
                id: id.clone(),
            });
        }

        id
    }

    /// Generate a unique id: `setup`, `setup-1`, `setup-2`.
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id.push_str("heading");
        }
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }
}

/// Convert text to URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Rewrite a markdown link to the frontend URL of its target page.
///
/// Returns `None` for links that stay unchanged.
fn rewrite_link(url: &str, base_path: &str, links: &SectionTable) -> Option<String> {
    let (key, fragment) = resolve_link(url, base_path)?;
    Some(format!("{}{fragment}", links.href(&key)))
}

/// Resolve a markdown link URL relative to a base path.
///
/// - `./day-2.md` from `python` → `python/day-2`
/// - `../devops/day-1.md#setup` from `python` → `devops/day-1` + `#setup`
/// - `/mysql/day-0.md` → `mysql/day-0`
/// - `basics/index.md` from `python` → `python/basics`
///
/// External links, fragment-only links and non-markdown links yield `None`.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn resolve_link<'a>(url: &'a str, base_path: &str) -> Option<(PathKey, &'a str)> {
    if url.starts_with("http://")
        || url.starts_with("https://")
        || url.starts_with("//")
        || url.starts_with("mailto:")
        || url.starts_with("tel:")
        || url.starts_with('#')
    {
        return None;
    }

    let (path_part, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    let path_part = path_part.strip_suffix(".md")?;

    let resolved = if let Some(absolute) = path_part.strip_prefix('/') {
        resolve_relative_path(absolute, "")
    } else {
        resolve_relative_path(path_part, base_path)
    };

    let mut key = PathKey::from_url_path(&resolved);
    if key.last() == Some("index") {
        key = key.parent().unwrap_or_default();
    }

    Some((key, fragment))
}

/// Resolve a relative path against a base directory.
///
/// `..` at the root is ignored, so links cannot climb out of the content tree.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
