use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    models::Product,
    registry::{invalid_id, parse_product_id, INVALID_ID, INVALID_PATH_ID},
    AppState,
};

/// Largest request body accepted before decoding. Oversized bodies are
/// `InvalidInput`, never a bare 413.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

fn path_id(path: Result<Path<String>, PathRejection>, message: &'static str) -> AppResult<i64> {
    let Path(raw_id) = path.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Path segment rejected");
        invalid_id(message)
    })?;
    parse_product_id(&raw_id, message)
}

// ── GET /products/:id ─────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<Json<Product>> {
    let id = path_id(path, INVALID_ID)?;
    let product = state.registry.get(id).await?;

    debug!(product_id = id, "Fetched product");

    Ok(Json(product))
}

// ── POST /products/:id/details ────────────────────────────────────────────────

/// The body is taken as raw bytes so decode failures come back as typed
/// `InvalidInput` errors rather than extractor rejections.
pub async fn add_product_details(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<StatusCode> {
    let id = path_id(path, INVALID_PATH_ID)?;
    let body = body.map_err(|rejection| {
        AppError::invalid_input("Invalid request body", rejection.body_text())
    })?;
    let product = Product::from_json(&body)?;

    state.registry.put(id, product).await?;

    info!(product_id = id, "Stored product details");

    Ok(StatusCode::NO_CONTENT)
}
