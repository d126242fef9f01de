#![forbid(unsafe_code)]

//! `remora-cache`
//!
//! A bounded, in-memory entry cache mapping [`CacheKey`] to byte payloads
//! with strict least-recently-used eviction and optional per-entry expiry.
//!
//! This is a pure storage component: no I/O, no knowledge of range
//! semantics. The adapter in `remora-stream` owns one instance per
//! configured adapter.

mod error;
mod key;
mod store;

pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use store::{CacheOptions, EntryCache};
