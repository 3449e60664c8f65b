//! Services Module
//!
//! Catalog and cart operations on top of the stores.

mod carts;
mod products;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::store::{CartStore, ProductStore};

pub use carts::CartService;
pub use products::{ProductService, Products};

/// Both services wired together.
///
/// The product service, and with it the product cache, is shared with the
/// cart service through an `Arc`.
#[derive(Debug, Clone)]
pub struct Shop {
    pub products: Arc<ProductService>,
    pub carts: Arc<CartService>,
}

impl Shop {
    /// Creates the services over existing stores.
    pub fn new(products: ProductStore, carts: CartStore, cache_capacity: usize) -> Self {
        let products = Arc::new(ProductService::with_capacity(products, cache_capacity));
        let carts = Arc::new(CartService::new(carts, Arc::clone(&products)));
        Self { products, carts }
    }

    /// Opens both databases from configuration, seeding the catalog on first use.
    pub fn from_config(config: &Config) -> Result<Self> {
        let products = ProductStore::open(&config.products_db_path)?;
        let carts = CartStore::open(&config.carts_db_path)?;
        Ok(Self::new(products, carts, config.product_cache_capacity))
    }
}
