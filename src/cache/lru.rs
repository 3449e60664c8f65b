//! Recency order for the product cache.

use std::collections::VecDeque;

/// Keys ordered from most recently used (front) to least (back).
///
/// Linear scans on touch; the product cache holds about a hundred ids.
#[derive(Debug)]
pub struct LruTracker<K> {
    order: VecDeque<K>,
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }
}

impl<K: PartialEq> LruTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `key` to the front, adding it if untracked.
    pub fn touch(&mut self, key: K) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        self.order.push_front(key);
    }

    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
