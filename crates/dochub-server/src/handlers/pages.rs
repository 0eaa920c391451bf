//! Pages API endpoint.
//!
//! Resolves a page within a section and returns JSON with metadata,
//! table of contents, and HTML content.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use dochub_site::{Page, PathKey, TocEntry};
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/sections/{section}/pages/{slug}.
#[derive(Serialize)]
struct PageResponse<'a> {
    /// Page metadata.
    meta: PageMeta<'a>,
    /// Table of contents entries.
    toc: &'a [TocEntry],
    /// Rendered HTML content.
    content: &'a str,
}

/// Page metadata.
#[derive(Serialize)]
struct PageMeta<'a> {
    title: &'a str,
    description: &'a str,
    /// Qualified key, `/`-joined.
    key: String,
    /// Full-width display flag.
    full: bool,
}

impl<'a> From<&'a Page> for PageResponse<'a> {
    fn from(page: &'a Page) -> Self {
        Self {
            meta: PageMeta {
                title: &page.title,
                description: &page.description,
                key: page.key.to_string(),
                full: page.full,
            },
            toc: &page.toc,
            content: &page.body,
        }
    }
}

/// Handle GET /api/sections/{section}/pages (section default page).
pub(crate) async fn get_default_page(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(&state, &section, &PathKey::empty(), &headers)
}

/// Handle GET /api/sections/{section}/pages/{*slug}.
pub(crate) async fn get_page(
    Path((section, slug)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    get_page_impl(&state, &section, &PathKey::from_url_path(&slug), &headers)
}

/// Shared implementation for page resolution.
fn get_page_impl(
    state: &AppState,
    section: &str,
    segments: &PathKey,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let page = state.site.resolve(section, segments)?;
    let body = serde_json::to_string(&PageResponse::from(page.as_ref()))?;

    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Compute `ETag` from version and the encoded response body.
///
/// MD5 truncated to 64 bits (16 hex chars), quoted.
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_compute_etag_includes_version() {
        let etag1 = compute_etag("1.0.0", "content");
        let etag2 = compute_etag("1.0.1", "content");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_compute_etag_includes_content() {
        let etag1 = compute_etag("1.0.0", "content1");
        let etag2 = compute_etag("1.0.0", "content2");

        assert_ne!(etag1, etag2);
    }

    #[test]
    fn test_etag_covers_page_metadata() {
        let page = Page::new(PathKey::from(["python", "day-1"]), "Variables").with_body("<p>x</p>");
        let retitled = Page::new(page.key.clone(), "Names").with_body("<p>x</p>");

        let etag = |page: &Page| {
            let body = serde_json::to_string(&PageResponse::from(page)).unwrap();
            compute_etag("1.0.0", &body)
        };

        assert_ne!(etag(&page), etag(&retitled));
        assert_ne!(etag(&page), etag(&page.clone().with_description("Names and values")));
    }

    #[test]
    fn test_compute_etag_format() {
        let etag = compute_etag("1.0.0", "content");

        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        // 16 hex chars + 2 quotes
        assert_eq!(etag.len(), 18);
    }

    #[test]
    fn test_page_response_serialization() {
        let mut page = Page::new(PathKey::from(["python", "day-1"]), "Variables")
            .with_description("Names and values")
            .with_body("<h2 id=\"setup\">Setup</h2>");
        page.toc.push(TocEntry {
            level: 2,
            title: "Setup".to_owned(),
            id: "setup".to_owned(),
        });

        let json = serde_json::to_value(PageResponse::from(&page)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "meta": {
                    "title": "Variables",
                    "description": "Names and values",
                    "key": "python/day-1",
                    "full": false,
                },
                "toc": [{"level": 2, "title": "Setup", "id": "setup"}],
                "content": "<h2 id=\"setup\">Setup</h2>",
            })
        );
    }
}
