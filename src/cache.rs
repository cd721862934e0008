//! # Bounded LRU content cache
//!
//! `WebCache` fronts an expensive producer (typically file content served by
//! path) with a fixed-entry-count LRU cache. It orchestrates two structures
//! that must stay mutually consistent:
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────┐
//!   │                        WebCache                               │
//!   │                                                               │
//!   │   ┌─────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<String, EntryId>  (key → slab index)         │ │
//!   │   │                                                         │ │
//!   │   │  ┌──────────────┬──────────┐                            │ │
//!   │   │  │ "/index.html"│ id_0 ──────────────────┐              │ │
//!   │   │  │ "/style.css" │ id_1 ────────────┐     │              │ │
//!   │   │  └──────────────┴──────────┘       │     │              │ │
//!   │   └────────────────────────────────────┼─────┼──────────────┘ │
//!   │                                        │     │                │
//!   │   ┌────────────────────────────────────┼─────┼──────────────┐ │
//!   │   │  RecencyList<Entry>                ▼     ▼              │ │
//!   │   │                                                         │ │
//!   │   │  head ──► [Entry] ◄──────────► [Entry] ◄── tail         │ │
//!   │   │           (MRU)                 (LRU)                   │ │
//!   │   └─────────────────────────────────────────────────────────┘ │
//!   └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entry reachable from the list has exactly one index mapping and vice
//! versa; `put` and `get` mutate both structures or neither.
//!
//! ## Operations
//!
//! | Method             | Complexity | Description                              |
//! |--------------------|------------|------------------------------------------|
//! | `try_new(n)`       | O(1)       | Create with capacity `n` (`n >= 1`)      |
//! | `put(k, ct, c)`    | O(1)*      | Insert or update, may evict from tail    |
//! | `get(&k)`          | O(1)       | Lookup + promote to MRU                  |
//! | `peek(&k)`         | O(1)       | Lookup without promotion                 |
//! | `touch(&k)`        | O(1)       | Promote without returning the value      |
//! | `remove(&k)`       | O(1)       | Invalidate one key                       |
//! | `pop_lru()`        | O(1)       | Evict and return the LRU entry           |
//! | `peek_lru()`       | O(1)       | Inspect the next eviction victim         |
//! | `iter()`           | O(n)       | Traverse entries MRU → LRU               |
//! | `clear()`          | O(n)       | Drop all entries, keep the cache         |
//!
//! `put` on a key that is already cached replaces the payload in place and
//! promotes the existing entry; it never creates a second entry for the same
//! key, so repeated writes to one key cannot leak list nodes.
//!
//! ## Eviction
//!
//! After a new-key insertion the cache evicts from the tail while it is over
//! capacity. With duplicate-free insertion this runs at most once per `put`,
//! but it stays a loop so a future bulk insert or capacity shrink cannot
//! silently break the bound.
//!
//! ## Failure semantics
//!
//! `put` reserves all the space it needs before touching either structure, so
//! an allocation failure surfaces as [`CacheError::AllocationFailure`] with
//! the cache unchanged. `get` misses are `None`, never errors.
//!
//! ## Example
//!
//! ```
//! use webcache::WebCache;
//!
//! let mut cache = WebCache::try_new(2).unwrap();
//! cache.put("/a", "text/html", b"aaa".to_vec()).unwrap();
//! cache.put("/b", "text/html", b"bbb".to_vec()).unwrap();
//! cache.put("/c", "text/html", b"ccc".to_vec()).unwrap(); // evicts /a
//!
//! assert!(cache.get("/a").is_none());
//! assert_eq!(cache.get("/b").unwrap().content(), b"bbb");
//!
//! // /b was just touched, so /c is now the eviction victim
//! cache.put("/d", "text/html", b"ddd".to_vec()).unwrap();
//! assert!(cache.contains("/b"));
//! assert!(!cache.contains("/c"));
//! ```
//!
//! ## Thread safety
//!
//! `WebCache` is single-threaded (`&mut self` operations). With the
//! `concurrency` feature, `ConcurrentWebCache` in the `sync` module wraps it
//! in a single exclusive lock; see that module for why the lock must span
//! both the index and the list.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::entry::Entry;
use crate::error::CacheError;
use crate::list::{EntryId, RecencyList};

/// Index pre-allocation used when the caller passes a size hint of 0.
const DEFAULT_INDEX_CAPACITY: usize = 128;

/// Capacity-bounded LRU cache from string key to content bytes.
///
/// See the [module docs](self) for the architecture and operation summary.
pub struct WebCache {
    index: FxHashMap<String, EntryId>,
    entries: RecencyList<Entry>,
    max_size: usize,
}

impl WebCache {
    /// Creates a cache holding at most `max_size` entries.
    ///
    /// Equivalent to [`try_with_index_capacity`](Self::try_with_index_capacity)
    /// with a size hint of 0.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] if `max_size` is 0;
    /// [`CacheError::AllocationFailure`] if the initial index reservation
    /// fails.
    pub fn try_new(max_size: usize) -> Result<Self, CacheError> {
        Self::try_with_index_capacity(max_size, 0)
    }

    /// Creates a cache holding at most `max_size` entries, pre-sizing the
    /// index for `index_size_hint` keys (0 means a reasonable default).
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] if `max_size` is 0;
    /// [`CacheError::AllocationFailure`] if the initial reservations fail.
    pub fn try_with_index_capacity(
        max_size: usize,
        index_size_hint: usize,
    ) -> Result<Self, CacheError> {
        if max_size == 0 {
            return Err(CacheError::invalid_argument("max_size must be >= 1"));
        }
        let hint = if index_size_hint == 0 {
            max_size.min(DEFAULT_INDEX_CAPACITY)
        } else {
            index_size_hint
        };

        let mut index = FxHashMap::default();
        index.try_reserve(hint)?;
        let mut entries = RecencyList::new();
        entries.try_reserve(hint)?;

        Ok(Self {
            index,
            entries,
            max_size,
        })
    }

    /// Inserts or updates the value cached under `key`.
    ///
    /// An existing key keeps its entry: the payload is replaced in place and
    /// the entry promoted to MRU, with no size change. A new key is inserted
    /// at the MRU position and the cache then evicts from the tail while over
    /// capacity.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidArgument`] if `key` is empty;
    /// [`CacheError::AllocationFailure`] if the index or list cannot grow.
    /// On error the cache is unchanged.
    pub fn put(
        &mut self,
        key: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<(), CacheError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CacheError::invalid_argument("key must be non-empty"));
        }
        let content_type = content_type.into();

        // Duplicate key: refresh the existing entry, never add a second one.
        if let Some(&id) = self.index.get(key.as_str()) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.replace_content(content_type, content);
            }
            self.entries.move_to_front(id);

            #[cfg(debug_assertions)]
            self.validate_invariants();

            return Ok(());
        }

        // Reserve before linking so a growth failure leaves both structures
        // untouched.
        self.entries.try_reserve(1)?;
        self.index.try_reserve(1)?;

        let id = self
            .entries
            .push_front(Entry::new(key.clone(), content_type, content));
        self.index.insert(key, id);

        while self.entries.len() > self.max_size {
            match self.entries.pop_back() {
                Some(evicted) => {
                    self.index.remove(evicted.key());
                }
                None => break,
            }
        }

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Ok(())
    }

    /// Looks `key` up and promotes the entry to the MRU position.
    ///
    /// Returns a read-only view of the entry on a hit. A miss returns `None`
    /// and mutates nothing.
    #[inline]
    pub fn get(&mut self, key: &str) -> Option<&Entry> {
        let id = *self.index.get(key)?;
        self.entries.move_to_front(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        self.entries.get(id)
    }

    /// Looks `key` up without touching the recency order.
    #[inline]
    pub fn peek(&self, key: &str) -> Option<&Entry> {
        let id = *self.index.get(key)?;
        self.entries.get(id)
    }

    /// Promotes `key` to the MRU position without returning its value.
    ///
    /// Returns `false` if the key is not cached.
    #[inline]
    pub fn touch(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&id) => {
                self.entries.move_to_front(id);

                #[cfg(debug_assertions)]
                self.validate_invariants();

                true
            }
            None => false,
        }
    }

    /// Removes and returns the entry cached under `key`, if any.
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let id = self.index.remove(key)?;
        let entry = self.entries.remove(id);

        #[cfg(debug_assertions)]
        self.validate_invariants();

        entry
    }

    /// Evicts and returns the least recently used entry, if any.
    pub fn pop_lru(&mut self) -> Option<Entry> {
        let entry = self.entries.pop_back()?;
        self.index.remove(entry.key());

        #[cfg(debug_assertions)]
        self.validate_invariants();

        Some(entry)
    }

    /// Returns the least recently used entry without evicting it.
    #[inline]
    pub fn peek_lru(&self) -> Option<&Entry> {
        self.entries.back()
    }

    /// Returns `true` if `key` is currently cached.
    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Current number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Configured capacity, fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_size
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Drops every entry, keeping the cache usable.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();

        #[cfg(debug_assertions)]
        self.validate_invariants();
    }

    /// Checks index/list mutual consistency and the capacity bound.
    ///
    /// O(n) walk; always compiled so optimized test and fuzz builds can call
    /// it, but the cache itself only invokes it under `debug_assertions`.
    pub fn validate_invariants(&self) {
        self.entries.debug_validate();
        assert_eq!(
            self.index.len(),
            self.entries.len(),
            "index and list disagree on entry count"
        );
        for entry in self.entries.iter() {
            let id = self
                .index
                .get(entry.key())
                .expect("list entry missing from index");
            let indexed = self.entries.get(*id).expect("index maps to freed slot");
            assert_eq!(indexed.key(), entry.key());
        }
        assert!(self.entries.len() <= self.max_size);
    }
}

impl fmt::Debug for WebCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}
