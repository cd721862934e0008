//! One cached item: a key, its content type, and the content bytes.
//!
//! An `Entry` owns its buffers exclusively. Its position in the recency order
//! is held by the [`RecencyList`](crate::list::RecencyList) node that stores
//! it, never by the entry itself, so releasing an entry releases exactly the
//! key and the two payload buffers and nothing belonging to its neighbors.

/// One cached key/value record.
///
/// Created by [`WebCache::put`](crate::WebCache::put), released on eviction,
/// [`remove`](crate::WebCache::remove), or drop of the cache. The content
/// length is the length of the owned buffer; it cannot disagree with the
/// bytes actually stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    content_type: String,
    content: Vec<u8>,
}

impl Entry {
    pub(crate) fn new(key: String, content_type: String, content: Vec<u8>) -> Self {
        Self {
            key,
            content_type,
            content,
        }
    }

    /// The key this entry is cached under.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Opaque metadata carried alongside the value (e.g. a MIME type).
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The cached value bytes.
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Byte count of [`content`](Self::content).
    #[inline]
    pub fn content_length(&self) -> usize {
        self.content.len()
    }

    /// Replaces the payload in place, dropping the old buffers.
    ///
    /// Used by the duplicate-key branch of `put`: the entry keeps its key and
    /// its slot in the recency list, only the value changes.
    pub(crate) fn replace_content(&mut self, content_type: String, content: Vec<u8>) {
        self.content_type = content_type;
        self.content = content;
    }

    /// Consumes the entry, returning `(key, content_type, content)`.
    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        (self.key, self.content_type, self.content)
    }
}
