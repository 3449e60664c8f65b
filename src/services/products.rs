//! Product Service
//!
//! Wraps the product store with a bounded LRU cache for single-product
//! lookups.
//!
//! The cache is filled on lookup and never invalidated by writes, so after
//! `update_qty` a cached product keeps its old quantity until it is evicted.
//! Read the store directly for a fresh value.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::{CacheStats, ProductCache};
use crate::error::{Result, ShopError};
use crate::models::{NewProduct, Product, ProductRecord};
use crate::store::ProductStore;

// == Product Service ==
#[derive(Debug)]
pub struct ProductService {
    store: ProductStore,
    /// Shared by every caller of this service
    cache: Mutex<ProductCache>,
}

impl ProductService {
    // == Constructor ==
    /// Creates a service over `store` using `cache` for lookups.
    pub fn new(store: ProductStore, cache: ProductCache) -> Self {
        Self {
            store,
            cache: Mutex::new(cache),
        }
    }

    /// Creates a service with an empty cache of the given capacity.
    pub fn with_capacity(store: ProductStore, capacity: usize) -> Self {
        Self::new(store, ProductCache::new(capacity))
    }

    pub fn store(&self) -> &ProductStore {
        &self.store
    }

    // == List ==
    /// Snapshots the catalog and yields its products lazily.
    ///
    /// Call again for a fresh snapshot.
    pub fn list_products(&self) -> Result<Products> {
        let records = self.store.list_products()?;
        Ok(Products {
            records: records.into_iter(),
        })
    }

    // == Get ==
    /// Looks a product up by id, consulting the cache first.
    ///
    /// Returns None if the store has no such id. Absent ids are not cached.
    pub fn get_product(&self, id: i64) -> Result<Option<Product>> {
        if let Some(product) = self.cache().get(id) {
            return Ok(Some(product));
        }

        // Lock is not held across store access
        let Some(record) = self.store.get_product(id)? else {
            debug!(product_id = id, "product not found");
            return Ok(None);
        };

        let product = Product::load(record);
        self.cache().insert(product.clone());
        Ok(Some(product))
    }

    // == Add ==
    /// Adds a product to the catalog.
    pub fn add_product(&self, product: &NewProduct) -> Result<()> {
        self.store.add_product(product)
    }

    // == Update Quantity ==
    /// Sets a product's stock quantity.
    ///
    /// Fails with `Validation` for a negative quantity and `NotFound` when
    /// no product has this id. Does not touch the cache.
    pub fn update_qty(&self, id: i64, qty: i64) -> Result<()> {
        if qty < 0 {
            return Err(ShopError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }

        let rows = self.store.update_qty(id, qty)?;
        if rows == 0 {
            return Err(ShopError::NotFound(format!("Product {} does not exist", id)));
        }
        Ok(())
    }

    // == Stats ==
    /// Returns current product cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache().stats()
    }

    fn cache(&self) -> MutexGuard<'_, ProductCache> {
        // Cache state stays consistent even if a holder panicked
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Products Iterator ==
/// Lazy sequence of products over one catalog snapshot.
///
/// Each record is converted to a [`Product`] only when it is yielded.
#[derive(Debug)]
pub struct Products {
    records: std::vec::IntoIter<ProductRecord>,
}

impl Iterator for Products {
    type Item = Product;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(Product::load)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl ExactSizeIterator for Products {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SEED_PRODUCTS;
    use tempfile::TempDir;

    fn temp_service(capacity: usize) -> (TempDir, ProductService) {
        let dir = TempDir::new().unwrap();
        let store = ProductStore::open(dir.path().join("products.db")).unwrap();
        (dir, ProductService::with_capacity(store, capacity))
    }

    #[test]
    fn test_list_products_is_lazy_snapshot() {
        let (_dir, service) = temp_service(100);

        let products = service.list_products().unwrap();
        assert_eq!(products.len(), SEED_PRODUCTS.len());

        // Added after the snapshot: only a new call sees it
        service
            .add_product(&NewProduct::new("Pen", "Blue ink", 2.0, 100))
            .unwrap();
        assert_eq!(products.count(), SEED_PRODUCTS.len());
        assert_eq!(
            service.list_products().unwrap().count(),
            SEED_PRODUCTS.len() + 1
        );
    }

    #[test]
    fn test_get_product_served_from_cache() {
        let (_dir, service) = temp_service(100);

        let first = service.get_product(1).unwrap().unwrap();
        for _ in 0..10 {
            assert_eq!(service.get_product(1).unwrap().unwrap(), first);
        }

        // Only the first lookup reached the store
        let stats = service.cache_stats();
        assert_eq!(stats.store_loads, 1);
        assert_eq!(stats.hits, 10);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_get_product_absent_not_cached() {
        let (_dir, service) = temp_service(100);

        assert!(service.get_product(9999).unwrap().is_none());
        assert!(service.get_product(9999).unwrap().is_none());

        let stats = service.cache_stats();
        assert_eq!(stats.store_loads, 2);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn test_update_qty_leaves_cached_entry_stale() {
        let (_dir, service) = temp_service(100);
        let cached = service.get_product(1).unwrap().unwrap();

        service.update_qty(1, cached.qty + 5).unwrap();

        assert_eq!(service.get_product(1).unwrap().unwrap().qty, cached.qty);
        let fresh = service.store().get_product(1).unwrap().unwrap();
        assert_eq!(fresh.qty, cached.qty + 5);
    }

    #[test]
    fn test_update_qty_negative() {
        let (_dir, service) = temp_service(100);

        let result = service.update_qty(1, -3);

        assert!(matches!(result, Err(ShopError::Validation(_))));
        assert_eq!(service.store().get_product(1).unwrap().unwrap().qty, 10);
    }

    #[test]
    fn test_update_qty_missing_product() {
        let (_dir, service) = temp_service(100);

        let result = service.update_qty(9999, 1);

        assert!(matches!(result, Err(ShopError::NotFound(_))));
    }

    #[test]
    fn test_eviction_forces_store_reload() {
        let (_dir, service) = temp_service(2);

        service.get_product(1).unwrap();
        service.get_product(2).unwrap();
        service.get_product(3).unwrap(); // evicts 1
        service.get_product(1).unwrap(); // miss again

        let stats = service.cache_stats();
        assert_eq!(stats.store_loads, 4);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.evictions, 2);
    }
}
