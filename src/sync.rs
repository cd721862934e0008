//! Thread-safe wrapper around [`WebCache`], behind the `concurrency` feature.
//!
//! The index and the recency list are one unit of mutual exclusion: a lookup
//! that promotes an entry mutates the list, and an insert mutates both
//! structures. Any interleaving that updates one without the other breaks the
//! index/list consistency invariant, so the wrapper holds a single
//! `parking_lot::Mutex` across every operation. There is no read path that
//! could soundly take a shared lock except `peek`-style accessors, and those
//! go through the same mutex for simplicity.
//!
//! Borrowed views cannot escape the lock, so read accessors take a closure
//! (`get_with`, `peek_with`) that runs while the guard is held.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::WebCache;
use crate::entry::Entry;
use crate::error::CacheError;

/// Cloneable, thread-safe LRU content cache.
///
/// All operations serialize on one exclusive lock; see the module docs for
/// why a finer grain is unsound here.
#[derive(Clone)]
pub struct ConcurrentWebCache {
    inner: Arc<Mutex<WebCache>>,
}

impl ConcurrentWebCache {
    /// Creates a shared cache holding at most `max_size` entries.
    ///
    /// # Errors
    ///
    /// Same as [`WebCache::try_new`].
    pub fn try_new(max_size: usize) -> Result<Self, CacheError> {
        Ok(Self {
            inner: Arc::new(Mutex::new(WebCache::try_new(max_size)?)),
        })
    }

    /// Inserts or updates the value cached under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`WebCache::put`].
    pub fn put(
        &self,
        key: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<(), CacheError> {
        self.inner.lock().put(key, content_type, content)
    }

    /// Looks `key` up, promotes it, and runs `f` on the entry while the lock
    /// is held.
    pub fn get_with<R>(&self, key: &str, f: impl FnOnce(&Entry) -> R) -> Option<R> {
        let mut cache = self.inner.lock();
        cache.get(key).map(f)
    }

    /// Runs `f` on the entry without promoting it.
    pub fn peek_with<R>(&self, key: &str, f: impl FnOnce(&Entry) -> R) -> Option<R> {
        let cache = self.inner.lock();
        cache.peek(key).map(f)
    }

    /// Promotes `key` to the MRU position; returns `false` if absent.
    pub fn touch(&self, key: &str) -> bool {
        self.inner.lock().touch(key)
    }

    /// Removes and returns the entry cached under `key`, if any.
    pub fn remove(&self, key: &str) -> Option<Entry> {
        self.inner.lock().remove(key)
    }

    /// Evicts and returns the least recently used entry, if any.
    pub fn pop_lru(&self) -> Option<Entry> {
        self.inner.lock().pop_lru()
    }

    /// Returns `true` if `key` is currently cached.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    /// Current number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Configured capacity, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Drops every entry, keeping the cache usable.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

impl std::fmt::Debug for ConcurrentWebCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentWebCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
