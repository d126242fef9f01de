#![forbid(unsafe_code)]

use bytes::Bytes;
use remora_cache::{CacheKey, CacheOptions, EntryCache};
use remora_core::{ReadError, ReadResult};
use tracing::debug;

use crate::{
    reader::Reader,
    source::{RangeSource, RangeStream},
};

/// Default chunk size for sequential reads through a [`Reader`].
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for an [`Adapter`].
///
/// Without a cache the adapter stays functional and every read is a fresh
/// fetch.
#[derive(Clone, Debug)]
pub struct AdapterOptions {
    /// Attach an LRU entry cache with the given options.
    pub cache: Option<CacheOptions>,
    /// Bytes requested per sequential [`Reader::read`] call.
    pub chunk_size: usize,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            cache: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl AdapterOptions {
    /// Enable an LRU entry cache.
    #[must_use]
    pub fn with_cache(mut self, cache: CacheOptions) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the sequential read chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }
}

/// Orchestrates a [`RangeSource`] with an optional [`EntryCache`].
///
/// Given `(key, offset, len)` the adapter serves cached bytes when present,
/// else fetches the range, stores the payload under a per-range cache key
/// and returns it. Source errors propagate verbatim and are never cached;
/// a failed cache write degrades to "served but not cached".
///
/// The adapter is safe to share (`&self` methods); each instance owns its
/// own cache, so separate adapters never collide on keys.
pub struct Adapter<S> {
    source: S,
    cache: Option<EntryCache>,
    chunk_size: usize,
}

impl<S: RangeSource> Adapter<S> {
    /// Uncached adapter: every read is a fresh fetch.
    pub fn new(source: S) -> Self {
        Self::with_options(source, AdapterOptions::default())
    }

    pub fn with_options(source: S, options: AdapterOptions) -> Self {
        Self {
            source,
            cache: options.cache.map(EntryCache::new),
            chunk_size: options.chunk_size,
        }
    }

    pub(crate) fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Shared reference to the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// A cursor over one object, starting at offset 0 with unknown size.
    ///
    /// Readers borrow the adapter; any number of them may exist at once
    /// and they share its cache.
    pub fn reader<K: Into<String>>(&self, key: K) -> Reader<'_, S> {
        Reader::new(self, key.into())
    }

    /// Reads `[offset, offset + len)` of `key`, clipped to the object's
    /// size; `len == 0` reads from `offset` to the end.
    ///
    /// A short read at end-of-object is success; a range at or past the
    /// end is [`ReadError::EndOfStream`].
    pub async fn read_range(&self, key: &str, offset: u64, len: u64) -> ReadResult<Bytes> {
        let (payload, _) = self.fetch(key, offset, len).await?;
        Ok(payload)
    }

    /// As [`Adapter::read_range`], also surfacing the source's total-size
    /// hint when the fetch went to the source with `offset == 0`.
    pub(crate) async fn fetch(
        &self,
        key: &str,
        offset: u64,
        len: u64,
    ) -> ReadResult<(Bytes, Option<u64>)> {
        let cache_key = CacheKey::new(key, offset, len);

        if let Some(cache) = &self.cache
            && let Some(payload) = cache.get(&cache_key)
        {
            debug!(key, offset, len, "cache hit");
            return Ok((payload, None));
        }

        let stream = self.source.stream_at(key, offset, len).await?;
        let size = stream.size();
        let payload = stream.collect().await?;

        // A drained range with nothing in it means the object ended at or
        // before `offset`.
        if payload.is_empty() {
            return Err(ReadError::EndOfStream);
        }

        debug!(key, offset, len, n = payload.len(), "fetched range");

        if let Some(cache) = &self.cache
            && let Err(err) = cache.put(cache_key, payload.clone())
        {
            debug!(key, offset, len, %err, "payload not cached");
        }

        Ok((payload, size))
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::memory::MemorySource;

    fn cached(source: MemorySource, capacity: usize) -> Adapter<MemorySource> {
        Adapter::with_options(
            source,
            AdapterOptions::default()
                .with_cache(CacheOptions::new(NonZeroUsize::new(capacity).unwrap())),
        )
    }

    #[tokio::test]
    async fn read_range_returns_the_requested_bytes() {
        let source = MemorySource::new();
        source.insert("obj", "hello world");

        let adapter = cached(source, 8);
        assert_eq!(
            adapter.read_range("obj", 0, 5).await.unwrap(),
            Bytes::from_static(b"hello")
        );
        assert_eq!(
            adapter.read_range("obj", 6, 5).await.unwrap(),
            Bytes::from_static(b"world")
        );
    }

    #[tokio::test]
    async fn short_read_at_end_of_object_is_success() {
        let source = MemorySource::new();
        source.insert("obj", "hello world");

        let adapter = Adapter::new(source);
        let payload = adapter.read_range("obj", 8, 100).await.unwrap();
        assert_eq!(payload, Bytes::from_static(b"rld"));
    }

    #[tokio::test]
    async fn range_at_end_is_end_of_stream() {
        let source = MemorySource::new();
        source.insert("obj", "hello world");

        let adapter = cached(source, 8);
        let err = adapter.read_range("obj", 11, 16).await.unwrap_err();
        assert!(err.is_eof());
    }

    #[tokio::test]
    async fn len_zero_reads_to_end() {
        let source = MemorySource::new();
        source.insert("obj", "hello world");

        let adapter = Adapter::new(source);
        let payload = adapter.read_range("obj", 0, 0).await.unwrap();
        assert_eq!(payload, Bytes::from_static(b"hello world"));
    }

    #[tokio::test]
    async fn not_found_propagates() {
        let adapter = cached(MemorySource::new(), 8);
        let err = adapter.read_range("absent", 0, 8).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
