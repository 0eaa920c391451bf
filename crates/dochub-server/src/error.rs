//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dochub_site::{PathKey, SiteError};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No section with this identifier.
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    /// No page at the qualified key.
    #[error("Page not found: {0}")]
    PageNotFound(PathKey),

    /// Response body could not be encoded.
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<SiteError> for ServerError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::UnknownSection(id) => Self::SectionNotFound(id),
            SiteError::NotFound { key } => Self::PageNotFound(key),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::SectionNotFound(section) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Section not found", "section": section}),
            ),
            Self::PageNotFound(key) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "key": key.to_string()}),
            ),
            Self::Encode(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Internal server error"}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
