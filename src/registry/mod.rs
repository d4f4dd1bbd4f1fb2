use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{validate, Product};

const INVALID_ID_DETAILS: &str = "Product ID must be a positive integer";

/// Summary used when the id of a lookup is rejected.
pub const INVALID_ID: &str = "Invalid product ID";
/// Summary used when the path id of a write is rejected.
pub const INVALID_PATH_ID: &str = "Invalid product ID in path";

/// In-memory product store keyed by `product_id`.
///
/// A single read/write guard covers the whole map: lookups share it, writes take
/// it exclusively. Validation always runs before the guard is acquired, so the
/// write lock is held only for the map mutation itself. Callers get clones,
/// never references into the map.
#[derive(Debug, Default)]
pub struct ProductRegistry {
    products: RwLock<HashMap<i64, Product>>,
}

pub fn invalid_id(message: &'static str) -> AppError {
    AppError::invalid_input(message, INVALID_ID_DETAILS)
}

/// Parses a path segment into a product identifier.
///
/// Non-numeric, out-of-range and non-positive values are all `InvalidInput`
/// carrying `message` as the summary.
pub fn parse_product_id(raw: &str, message: &'static str) -> AppResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(invalid_id(message)),
    }
}

fn check_id(id: i64, message: &'static str) -> AppResult<()> {
    if id < 1 {
        return Err(invalid_id(message));
    }
    Ok(())
}

impl ProductRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: i64) -> AppResult<Product> {
        check_id(id, INVALID_ID)?;

        let product = self.products.read().await.get(&id).cloned();

        product.ok_or_else(|| {
            AppError::not_found("Product not found", format!("No product found with ID {id}"))
        })
    }

    /// Stores `product` at `id`, replacing any previous record wholesale.
    ///
    /// Checks run in a fixed order: path id, field rules (first failure wins),
    /// then path/body id agreement. Create and overwrite are not distinguished.
    pub async fn put(&self, id: i64, product: Product) -> AppResult<()> {
        check_id(id, INVALID_PATH_ID)?;

        validate(&product)
            .map_err(|violation| AppError::invalid_input("Validation failed", violation.message))?;

        if product.product_id != id {
            return Err(AppError::invalid_input(
                "Product ID mismatch",
                "path identifier does not match body identifier",
            ));
        }

        let replaced = self.products.write().await.insert(id, product).is_some();
        debug!(product_id = id, replaced, "Registry write committed");

        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}
