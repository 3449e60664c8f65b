//! Configuration Module
//!
//! Handles loading storage paths and cache sizing from environment variables.

use std::env;
use std::path::PathBuf;

/// Default product database file
pub const DEFAULT_PRODUCTS_DB: &str = "products.db";
/// Default cart database file
pub const DEFAULT_CARTS_DB: &str = "carts.db";
/// Default bound of the product lookup cache
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// Backend configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the product database file
    pub products_db_path: PathBuf,
    /// Path of the cart database file
    pub carts_db_path: PathBuf,
    /// Maximum number of products held by the lookup cache
    pub product_cache_capacity: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PRODUCTS_DB_PATH` - Product database file (default: products.db)
    /// - `CARTS_DB_PATH` - Cart database file (default: carts.db)
    /// - `PRODUCT_CACHE_CAPACITY` - Product cache bound (default: 100)
    pub fn from_env() -> Self {
        Self {
            products_db_path: env::var("PRODUCTS_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PRODUCTS_DB)),
            carts_db_path: env::var("CARTS_DB_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CARTS_DB)),
            product_cache_capacity: env::var("PRODUCT_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_CAPACITY),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            products_db_path: PathBuf::from(DEFAULT_PRODUCTS_DB),
            carts_db_path: PathBuf::from(DEFAULT_CARTS_DB),
            product_cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
