//! Product cache counters, snapshotted on request.

use std::fmt;

use serde::Serialize;

/// Point-in-time view of the product cache.
///
/// Every miss in the product service is followed by exactly one read of the
/// product store, so `store_loads` is the number of store round trips the
/// cache did not save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub store_loads: u64,
    pub evictions: u64,
    /// Distinct product ids currently cached
    pub entries: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Total lookups seen by the cache.
    pub fn lookups(&self) -> u64 {
        self.hits + self.store_loads
    }

    /// Share of lookups answered without the store, None before any lookup.
    pub fn hit_ratio(&self) -> Option<f64> {
        match self.lookups() {
            0 => None,
            total => Some(self.hits as f64 / total as f64),
        }
    }

    /// True once another new id would evict the least recently used product.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.entries >= self.capacity
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} products cached, {} hits, {} store loads, {} evictions",
            self.entries, self.capacity, self.hits, self.store_loads, self.evictions
        )?;
        if let Some(ratio) = self.hit_ratio() {
            write!(f, ", {:.0}% served from cache", ratio * 100.0)?;
        }
        Ok(())
    }
}
