//! Static-generation parameters endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use dochub_site::PathKey;
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /api/sections/{section}/params.
#[derive(Serialize)]
pub(crate) struct ParamsResponse {
    section: String,
    /// Relative keys, each serialized as a segment array.
    params: Vec<PathKey>,
}

/// Handle GET /api/sections/{section}/params.
pub(crate) async fn get_params(
    Path(section): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ParamsResponse>, ServerError> {
    let params = state.site.params(&section)?;

    Ok(Json(ParamsResponse { section, params }))
}
