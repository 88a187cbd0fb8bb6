//! Tree cache trait and statistics.

use super::CacheKey;
use menus_core::MenusResult;
use serde::Serialize;
use std::sync::Arc;

/// Keyed cache holding one value type per instance.
///
/// A disabled cache is a valid configuration: `get` always misses and `put`
/// is a no-op. Callers never need to know which one they hold.
pub trait TreeCache<V>: Send + Sync
where
    V: Send + Sync,
{
    /// Look up a published value.
    fn get(&self, key: &CacheKey) -> Option<Arc<V>>;

    /// Publish a fully built value. It must not be mutated afterwards.
    fn put(&self, key: CacheKey, value: Arc<V>);

    /// Publish a value built while `generation` was current.
    ///
    /// Nothing is stored when `invalidate_all` ran since that generation was
    /// read. Returns whether the value was stored.
    fn put_if_current(&self, key: CacheKey, value: Arc<V>, generation: u64) -> bool;

    /// Current generation. Every `invalidate_all` moves it forward.
    fn generation(&self) -> u64;

    /// Drop every entry.
    fn invalidate_all(&self);

    /// Whether lookups can hit.
    fn is_enabled(&self) -> bool;

    /// Get cache statistics.
    fn stats(&self) -> CacheStats;

    /// Return the cached value, or build it, publish it and return it.
    ///
    /// Build errors are returned as is and nothing is published. A value
    /// whose build overlapped an `invalidate_all` is returned to the caller
    /// but not published.
    fn get_or_build(
        &self,
        key: CacheKey,
        build: &mut dyn FnMut() -> MenusResult<V>,
    ) -> MenusResult<Arc<V>> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let generation = self.generation();
        let value = Arc::new(build()?);
        self.put_if_current(key, Arc::clone(&value), generation);
        Ok(value)
    }
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries currently in cache.
    pub entry_count: u64,
    /// Number of `invalidate_all` calls.
    pub resets: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
