use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Catalog entry. Every value held by the registry has passed [`super::validate`].
///
/// Absent body fields decode to their zero value and are left to the field
/// rules, so `{"product_id":5}` fails on `sku` rather than at decode time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub product_id: i64,
    pub sku: String,
    pub manufacturer: String,
    pub category_id: i64,
    pub weight: i64,
    pub some_other_id: i64,
}

impl Product {
    /// Decodes a request body. Syntax errors and wrong types surface as
    /// `InvalidInput` with the decoder's reason in `details`.
    pub fn from_json(body: &[u8]) -> AppResult<Self> {
        serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input("Invalid request body", e.to_string()))
    }
}
