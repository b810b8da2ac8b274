//! Result cache for coordinate transformations
//!
//! Keys are `(coordinate, direction)` pairs and values are transformed
//! coordinates. The cache is unbounded by default: the key space of one
//! alignment is bounded by its sequence lengths. A capacity turns it into an
//! LRU cache without changing any lookup result.
//!
//! The cache itself is not synchronized; [`crate::mapping::CoordinateMapper`]
//! keeps it behind the same lock as its prefix index.
//!
//! # Example
//!
//! ```
//! use cigarco::cache::TransformCache;
//! use cigarco::mapping::Direction;
//!
//! let mut cache = TransformCache::unbounded();
//! cache.insert((4, Direction::QueryToTarget), 7);
//! assert_eq!(cache.get(&(4, Direction::QueryToTarget)), Some(7));
//! assert_eq!(cache.stats().hits, 1);
//! ```

use std::collections::HashMap;

use crate::mapping::Direction;

/// Cache key: source coordinate and direction.
pub type CacheKey = (u64, Direction);

/// Statistics for cache usage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of items currently in cache
    pub size: usize,
    /// Maximum cache capacity, `None` when unbounded
    pub capacity: Option<usize>,
    /// Number of evictions
    pub evictions: u64,
}

impl CacheStats {
    /// Calculate hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }

    /// Calculate miss rate as a percentage
    pub fn miss_rate(&self) -> f64 {
        100.0 - self.hit_rate()
    }
}

/// Memo of transformed coordinates with optional LRU eviction
#[derive(Debug, Clone, Default)]
pub struct TransformCache {
    /// Cache entries with their last access tick
    entries: HashMap<CacheKey, (u64, u64)>,
    capacity: Option<usize>,
    access_counter: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl TransformCache {
    /// Create a cache that never evicts
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create an LRU cache holding at most `capacity` entries
    ///
    /// A capacity of zero disables caching entirely.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    /// Get a value from the cache, refreshing its recency
    pub fn get(&mut self, key: &CacheKey) -> Option<u64> {
        self.access_counter += 1;
        let tick = self.access_counter;
        match self.entries.get_mut(key) {
            Some((value, access)) => {
                *access = tick;
                self.hits += 1;
                Some(*value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert a value into the cache
    pub fn insert(&mut self, key: CacheKey, value: u64) {
        if self.capacity == Some(0) {
            return;
        }
        self.access_counter += 1;

        if let Some(capacity) = self.capacity {
            if self.entries.len() >= capacity && !self.entries.contains_key(&key) {
                self.evict_lru();
            }
        }

        self.entries.insert(key, (value, self.access_counter));
    }

    /// Evict the least recently used entry
    fn evict_lru(&mut self) {
        if let Some(lru_key) = self
            .entries
            .iter()
            .min_by_key(|(_, (_, access))| *access)
            .map(|(k, _)| *k)
        {
            self.entries.remove(&lru_key);
            self.evictions += 1;
        }
    }

    /// Clear all entries, keeping the counters
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            capacity: self.capacity,
            evictions: self.evictions,
        }
    }

    /// Get the number of items in the cache
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
