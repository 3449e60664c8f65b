//! Cart models

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// A raw row of the `carts` table.
///
/// `contents` is kept as stored text; it is expected to be a JSON array of
/// product ids but nothing guarantees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartRow {
    pub id: i64,
    pub username: String,
    pub contents: Option<String>,
    pub cost: f64,
}

impl CartRow {
    /// Decodes `contents` into product ids, in stored order.
    ///
    /// A missing column decodes as an error just like malformed text.
    pub fn product_ids(&self) -> serde_json::Result<Vec<i64>> {
        let contents = self.contents.as_deref().unwrap_or("");
        serde_json::from_str(contents)
    }
}

/// A cart row with every product id resolved against the catalog.
///
/// A `None` slot marks an id that no longer names a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub id: i64,
    pub username: String,
    pub contents: Vec<Option<Product>>,
    pub cost: f64,
}
