use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Entry<V> {
    inserted_at: Instant,
    value: V,
}

/// Read-through cache with a single freshness window for all keys.
///
/// Entries are stamped on insert and checked on read. An expired entry stays
/// readable through [`TtlCache::get_stale`] until a new key is inserted and
/// triggers a purge.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<K, Entry<V>>>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            ttl: self.ttl,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_fresh(&self, entry: &Entry<V>) -> bool {
        entry.inserted_at.elapsed() < self.ttl
    }

    /// Value for `key` if it is still inside the freshness window.
    pub fn get(&self, key: &K) -> Option<V> {
        let guard = self.lock();
        guard
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone())
    }

    /// Value for `key` regardless of age.
    pub fn get_stale(&self, key: &K) -> Option<V> {
        self.lock().get(key).map(|entry| entry.value.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let mut guard = self.lock();
        if !guard.contains_key(&key) {
            let ttl = self.ttl;
            guard.retain(|_, entry| entry.inserted_at.elapsed() < ttl);
        }
        guard.insert(
            key,
            Entry {
                inserted_at: Instant::now(),
                value,
            },
        );
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}
