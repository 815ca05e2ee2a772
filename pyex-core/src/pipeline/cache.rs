//! Memoized generation results

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;

/// Hit/miss counters for a [`ResultCache`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

/// LRU cache of generation results keyed by a digest of the request.
///
/// Entries never expire on their own; callers drop them with
/// [`ResultCache::invalidate_all`].
pub struct ResultCache<V> {
    entries: LruCache<String, V>,
    stats: CacheStats,
}

impl<V: Clone> ResultCache<V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// SHA-256 hex digest over the key parts, separated so that
    /// `("ab", "c")` and `("a", "bc")` differ
    pub fn digest(parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update((part.len() as u64).to_le_bytes());
            hasher.update(part.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.stats.hits += 1;
                Some(value.clone())
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, key: String, value: V) {
        self.entries.put(key, value);
    }

    pub fn invalidate_all(&mut self) {
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
