//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/sections", get(handlers::sections::get_sections))
        .route(
            "/api/sections/{section}/navigation",
            get(handlers::navigation::get_navigation),
        )
        .route(
            "/api/sections/{section}/pages",
            get(handlers::pages::get_default_page),
        )
        .route(
            "/api/sections/{section}/pages/{*slug}",
            get(handlers::pages::get_page),
        )
        .route(
            "/api/sections/{section}/params",
            get(handlers::params::get_params),
        );

    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
