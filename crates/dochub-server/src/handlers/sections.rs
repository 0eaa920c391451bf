//! Sections API endpoint.
//!
//! Returns the configured sections in display order.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use dochub_site::SectionSpec;
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/sections.
#[derive(Serialize)]
pub(crate) struct SectionsResponse {
    /// List of sections.
    sections: Vec<SectionResponse>,
}

/// Section item for JSON response.
#[derive(Serialize)]
struct SectionResponse {
    id: String,
    title: String,
    description: String,
    topics: Vec<String>,
    features: Vec<String>,
    /// Frontend path of the section's documentation.
    path: String,
}

impl From<&SectionSpec> for SectionResponse {
    fn from(spec: &SectionSpec) -> Self {
        Self {
            id: spec.id.as_str().to_owned(),
            title: spec.title.clone(),
            description: spec.description.clone(),
            topics: spec.topics.clone(),
            features: spec.features.clone(),
            path: spec.url(),
        }
    }
}

/// Handle GET /api/sections.
pub(crate) async fn get_sections(State(state): State<Arc<AppState>>) -> Json<SectionsResponse> {
    let sections = state
        .site
        .sections()
        .iter()
        .map(SectionResponse::from)
        .collect();

    Json(SectionsResponse { sections })
}
