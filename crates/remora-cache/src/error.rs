use thiserror::Error;

/// Result type used by `remora-cache`.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors produced by cache writes.
///
/// Lookups never error: a miss is a normal outcome. A failed write is
/// expected to degrade to "served but not cached" in the caller.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("payload of {len} bytes exceeds per-entry limit of {limit} bytes")]
    PayloadTooLarge { len: usize, limit: usize },
}
