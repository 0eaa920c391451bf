//! Navigation API endpoint.
//!
//! Returns the navigation tree filtered for one section.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use dochub_site::{FilterDepth, NavNode};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/sections/{section}/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Section identifier.
    section: String,
    /// Filter depth applied to the tree.
    depth: FilterDepth,
    /// Filtered tree rooted at the site root.
    tree: NavNode,
}

/// Handle GET /api/sections/{section}/navigation.
pub(crate) async fn get_navigation(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<NavigationResponse>, ServerError> {
    let tree = state.site.navigation(&section)?;

    Ok(Json(NavigationResponse {
        section,
        depth: state.site.depth(),
        tree,
    }))
}
