//! Cache Module
//!
//! Provides the bounded LRU memoizing cache in front of single-product lookups.

mod lru;
mod product_cache;
mod stats;


// Re-export public types
pub use lru::LruTracker;
pub use product_cache::ProductCache;
pub use stats::CacheStats;
