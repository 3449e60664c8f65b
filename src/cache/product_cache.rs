//! Product Cache Module
//!
//! Bounded memoizing table from product id to the last loaded Product.
//! Entries never expire on time and are never invalidated on writes; they
//! only leave the cache through LRU eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheStats, LruTracker};
use crate::models::Product;

// == Product Cache ==
/// LRU-bounded product lookup cache.
#[derive(Debug)]
pub struct ProductCache {
    /// Cached entities by product id
    entries: HashMap<i64, Product>,
    /// LRU access tracker
    lru: LruTracker<i64>,
    /// Maximum number of distinct ids held
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl ProductCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` products.
    ///
    /// A capacity of 0 disables caching: every lookup is a miss.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    // == Get ==
    /// Returns a copy of the cached product and marks it recently used.
    ///
    /// A miss is counted as a store load; callers go to the store next.
    pub fn get(&mut self, id: i64) -> Option<Product> {
        match self.entries.get(&id) {
            Some(product) => {
                let product = product.clone();
                self.hits += 1;
                self.lru.touch(id);
                debug!(product_id = id, "product cache hit");
                Some(product)
            }
            None => {
                self.misses += 1;
                debug!(product_id = id, "product cache miss");
                None
            }
        }
    }

    // == Insert ==
    /// Stores a product under its id.
    ///
    /// If the cache is at capacity, the least recently used entry is evicted.
    pub fn insert(&mut self, product: Product) {
        if self.capacity == 0 {
            return;
        }

        let id = product.id;
        if !self.entries.contains_key(&id) && self.entries.len() >= self.capacity {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.evictions += 1;
                debug!(product_id = evicted, "evicted product from cache");
            }
        }

        self.entries.insert(id, product);
        self.lru.touch(id);
        debug_assert_eq!(self.lru.len(), self.entries.len());
    }

    // == Contains ==
    /// Checks for an entry without touching LRU order or stats.
    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    // == Stats ==
    /// Snapshots the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            store_loads: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
            capacity: self.capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: "test".to_string(),
            cost: 1.0,
            qty: 1,
        }
    }

    #[test]
    fn test_cache_new() {
        let cache = ProductCache::new(100);
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 100);
    }

    #[test]
    fn test_cache_insert_and_get() {
        let mut cache = ProductCache::new(100);

        cache.insert(product(1));

        assert_eq!(cache.get(1), Some(product(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_get_missing_records_miss() {
        let mut cache = ProductCache::new(100);

        assert_eq!(cache.get(42), None);

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.store_loads, 1);
    }

    #[test]
    fn test_cache_overwrite_keeps_single_entry() {
        let mut cache = ProductCache::new(100);

        cache.insert(product(1));
        let mut updated = product(1);
        updated.qty = 50;
        cache.insert(updated.clone());

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(1), Some(updated));
    }

    #[test]
    fn test_cache_lru_eviction() {
        let mut cache = ProductCache::new(3);

        cache.insert(product(1));
        cache.insert(product(2));
        cache.insert(product(3));

        // Full, inserting 4 should evict 1 (oldest)
        cache.insert(product(4));

        assert_eq!(cache.len(), 3);
        assert!(!cache.contains(1));
        assert!(cache.contains(2));
        assert!(cache.contains(3));
        assert!(cache.contains(4));
        assert_eq!(cache.stats().evictions, 1);
        assert!(cache.stats().is_full());
    }

    #[test]
    fn test_cache_lru_touch_on_get() {
        let mut cache = ProductCache::new(3);

        cache.insert(product(1));
        cache.insert(product(2));
        cache.insert(product(3));

        // Access 1 to make it most recently used
        cache.get(1);

        // Inserting 4 should evict 2 (now oldest)
        cache.insert(product(4));

        assert!(cache.contains(1));
        assert!(!cache.contains(2));
    }

    #[test]
    fn test_cache_zero_capacity_never_stores() {
        let mut cache = ProductCache::new(0);

        cache.insert(product(1));

        assert!(cache.is_empty());
        assert_eq!(cache.get(1), None);
        assert_eq!(cache.stats().evictions, 0);
    }
}
