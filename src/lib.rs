//! webcache: bounded LRU content cache for serving repeated lookups in O(1).
//!
//! See the [`cache`] module for the architecture and operation summary.

#![forbid(unsafe_code)]

pub mod cache;
pub mod entry;
pub mod error;
pub mod list;
pub mod prelude;

#[cfg(feature = "concurrency")]
pub mod sync;

pub use cache::WebCache;
pub use entry::Entry;
pub use error::CacheError;
pub use list::{EntryId, RecencyList};

#[cfg(feature = "concurrency")]
pub use sync::ConcurrentWebCache;
