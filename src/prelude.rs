pub use crate::cache::WebCache;
pub use crate::entry::Entry;
pub use crate::error::CacheError;
pub use crate::list::{EntryId, RecencyList};

#[cfg(feature = "concurrency")]
pub use crate::sync::ConcurrentWebCache;
