//! Error types for the webcache library.
//!
//! ## Key Components
//!
//! - [`CacheError::InvalidArgument`]: Returned when a caller-supplied
//!   parameter fails validation (zero capacity, empty key).
//! - [`CacheError::AllocationFailure`]: Returned when the index or the
//!   recency list cannot grow; every growth path goes through `try_reserve`
//!   so exhaustion surfaces as a result instead of an abort.
//!
//! ## Example Usage
//!
//! ```
//! use webcache::{CacheError, WebCache};
//!
//! // Fallible constructor for user-configurable parameters
//! let cache = WebCache::try_new(100);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = WebCache::try_new(0);
//! assert!(matches!(bad, Err(CacheError::InvalidArgument(_))));
//! ```

use std::collections::TryReserveError;
use std::fmt;

/// Error returned by fallible cache operations.
///
/// Produced by [`WebCache::try_new`](crate::WebCache::try_new) and
/// [`WebCache::put`](crate::WebCache::put). A failed `put` leaves the cache
/// in its pre-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A caller-supplied parameter failed validation.
    InvalidArgument(String),
    /// The index or recency list could not reserve memory.
    AllocationFailure(TryReserveError),
}

impl CacheError {
    /// Creates an `InvalidArgument` error with the given description.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::AllocationFailure(err) => write!(f, "allocation failure: {err}"),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::AllocationFailure(err) => Some(err),
        }
    }
}

impl From<TryReserveError> for CacheError {
    fn from(err: TryReserveError) -> Self {
        Self::AllocationFailure(err)
    }
}
