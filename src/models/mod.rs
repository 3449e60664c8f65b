//! Domain models for the catalog and carts
//!
//! This module defines the stored row mappings and the entities built from them.

pub mod cart;
pub mod product;

// Re-export commonly used types
pub use cart::{Cart, CartRow};
pub use product::{NewProduct, Product, ProductRecord};
