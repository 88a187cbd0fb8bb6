//! Process-wide in-memory tree cache.

use super::{CacheKey, CacheStats, TreeCache};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Configuration for an in-memory tree cache.
#[derive(Debug, Clone)]
pub struct TreeCacheConfig {
    /// Name used in log events.
    pub name: String,
    /// When false the cache is bypassed.
    pub enabled: bool,
}

impl TreeCacheConfig {
    /// Create an enabled cache config.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }

    /// Enable or disable the cache.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// `RwLock`ed map of published values.
///
/// Many readers share the lock; a `put` holds it only to swap the `Arc` in.
/// A poisoned lock still holds a consistent map (entries are replaced whole),
/// so it is recovered instead of propagated.
///
/// The generation is only moved and compared while the map's write lock is
/// held, so a reset can never slip between the check and the insert.
#[derive(Debug)]
pub struct InMemoryTreeCache<V> {
    config: TreeCacheConfig,
    enabled: AtomicBool,
    entries: RwLock<HashMap<CacheKey, Arc<V>>>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    resets: AtomicU64,
}

impl<V> InMemoryTreeCache<V> {
    pub fn new(config: TreeCacheConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            config,
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            resets: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Turn the cache on or off at runtime. Turning it off drops the entries.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        if !enabled {
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
        }
        tracing::info!(cache = %self.config.name, enabled, "Tree cache toggled");
    }
}

impl<V> TreeCache<V> for InMemoryTreeCache<V>
where
    V: Send + Sync,
{
    fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        if !self.is_enabled() {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        }
        let found = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned();
        match &found {
            Some(_) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = %self.config.name, key = %key, "Tree cache hit");
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(cache = %self.config.name, key = %key, "Tree cache miss");
            }
        }
        found
    }

    fn put(&self, key: CacheKey, value: Arc<V>) {
        if !self.is_enabled() {
            return;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
    }

    fn put_if_current(&self, key: CacheKey, value: Arc<V>, generation: u64) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(cache = %self.config.name, key = %key, "Dropped tree built before reset");
            return false;
        }
        entries.insert(key, value);
        true
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn invalidate_all(&self) {
        let dropped = {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            let n = entries.len();
            entries.clear();
            self.generation.fetch_add(1, Ordering::SeqCst);
            n
        };
        self.resets.fetch_add(1, Ordering::Relaxed);
        tracing::info!(cache = %self.config.name, dropped, "Tree cache reset");
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entry_count: self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len() as u64,
            resets: self.resets.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::{EntityIdType, MenusError, PageId, StorageError};
    use std::thread;

    fn cache() -> InMemoryTreeCache<String> {
        InMemoryTreeCache::new(TreeCacheConfig::new("test"))
    }

    #[test]
    fn test_put_then_get_returns_same_arc() {
        let cache = cache();
        let value = Arc::new("tree".to_string());
        cache.put(CacheKey::main(), Arc::clone(&value));
        let got = cache.get(&CacheKey::main()).unwrap();
        assert!(Arc::ptr_eq(&got, &value));
        assert!(cache.get(&CacheKey::tree(PageId::new(1))).is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entry_count, 1);
    }

    #[test]
    fn test_disabled_cache_bypasses() {
        let cache = InMemoryTreeCache::new(TreeCacheConfig::new("off").with_enabled(false));
        cache.put(CacheKey::main(), Arc::new("tree".to_string()));
        assert!(cache.get(&CacheKey::main()).is_none());
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[test]
    fn test_invalidate_all_clears_and_counts() {
        let cache = cache();
        cache.put(CacheKey::main(), Arc::new("a".to_string()));
        cache.put(CacheKey::tree(PageId::new(2)), Arc::new("b".to_string()));
        cache.invalidate_all();
        assert!(cache.get(&CacheKey::main()).is_none());
        let stats = cache.stats();
        assert_eq!(stats.entry_count, 0);
        assert_eq!(stats.resets, 1);
    }

    #[test]
    fn test_get_or_build_builds_once() {
        let cache = cache();
        let mut calls = 0;
        for _ in 0..3 {
            let value = cache
                .get_or_build(CacheKey::main(), &mut || {
                    calls += 1;
                    Ok("built".to_string())
                })
                .unwrap();
            assert_eq!(value.as_str(), "built");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_get_or_build_does_not_publish_errors() {
        let cache = cache();
        let err = cache
            .get_or_build(CacheKey::main(), &mut || {
                Err(MenusError::Storage(StorageError::LockPoisoned))
            })
            .unwrap_err();
        assert!(matches!(err, MenusError::Storage(_)));
        assert_eq!(cache.stats().entry_count, 0);
    }

    #[test]
    fn test_build_overlapping_reset_is_not_published() {
        let cache = cache();
        let value = cache
            .get_or_build(CacheKey::main(), &mut || {
                cache.invalidate_all();
                Ok("stale".to_string())
            })
            .unwrap();
        assert_eq!(value.as_str(), "stale");
        assert_eq!(cache.stats().entry_count, 0);

        let value = cache
            .get_or_build(CacheKey::main(), &mut || Ok("fresh".to_string()))
            .unwrap();
        assert_eq!(value.as_str(), "fresh");
        assert_eq!(cache.stats().entry_count, 1);
    }

    #[test]
    fn test_put_if_current_checks_generation() {
        let cache = cache();
        let before = cache.generation();
        cache.invalidate_all();
        assert!(!cache.put_if_current(CacheKey::main(), Arc::new("a".to_string()), before));
        assert!(cache.put_if_current(CacheKey::main(), Arc::new("b".to_string()), cache.generation()));
        assert_eq!(cache.get(&CacheKey::main()).unwrap().as_str(), "b");
    }

    #[test]
    fn test_set_enabled_false_drops_entries() {
        let cache = cache();
        cache.put(CacheKey::main(), Arc::new("a".to_string()));
        cache.set_enabled(false);
        assert!(!cache.is_enabled());
        cache.set_enabled(true);
        assert!(cache.get(&CacheKey::main()).is_none());
    }

    #[test]
    fn test_concurrent_readers_see_whole_values() {
        let cache = Arc::new(cache());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let key = CacheKey::tree(PageId::new(i % 2));
                    let value = cache
                        .get_or_build(key, &mut || Ok(format!("tree-{}", i % 2)))
                        .unwrap();
                    assert_eq!(*value, format!("tree-{}", i % 2));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.stats().entry_count, 2);
    }
}
