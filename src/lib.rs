use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;

use crate::registry::ProductRegistry;

/// Shared application state, cheap to clone.
#[derive(Clone, Default)]
pub struct AppState {
    pub registry: Arc<ProductRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Health ──────────────────────────────────────────────────────────
        .route("/health", get(handlers::health))

        // ── Products ────────────────────────────────────────────────────────
        .route("/products/:id", get(handlers::products::get_product))
        .route(
            "/products/:id/details",
            post(handlers::products::add_product_details),
        )

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(DefaultBodyLimit::max(handlers::products::MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
