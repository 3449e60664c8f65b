//! Mini Shop - A small product catalog and shopping cart backend
//!
//! Products live in a SQLite table fronted by a bounded LRU cache; carts are
//! per-user rows holding JSON arrays of product ids.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{Result, ShopError};
pub use services::{CartService, ProductService, Shop};
