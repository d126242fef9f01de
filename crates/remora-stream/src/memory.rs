#![forbid(unsafe_code)]

//! In-memory range source for ephemeral content and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use remora_core::{ReadError, ReadResult};

use crate::source::{RangeSource, RangeStream};

/// [`RangeSource`] over a map of in-memory objects.
///
/// Objects are registered with [`MemorySource::insert`] and served back in
/// one chunk per request. Useful for embedding small fixed payloads and as
/// the reference implementation of the source contract.
#[derive(Debug, Default)]
pub struct MemorySource {
    objects: RwLock<HashMap<String, Bytes>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, B: Into<Bytes>>(&self, key: K, payload: B) {
        self.objects.write().insert(key.into(), payload.into());
    }

    pub fn remove(&self, key: &str) {
        self.objects.write().remove(key);
    }
}

#[async_trait]
impl RangeSource for MemorySource {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream> {
        let objects = self.objects.read();
        let Some(object) = objects.get(key) else {
            return Err(ReadError::not_found(key));
        };

        let total = object.len() as u64;
        if offset >= total {
            return Err(ReadError::EndOfStream);
        }

        let end = if len == 0 {
            total
        } else {
            total.min(offset.saturating_add(len))
        };
        let payload = object.slice(offset as usize..end as usize);
        let size = (offset == 0).then_some(total);

        Ok(RangeStream::from_bytes(payload, size))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn source_with_hello() -> MemorySource {
        let source = MemorySource::new();
        source.insert("obj", "hello world");
        source
    }

    #[rstest]
    #[case::interior(0, 5, b"hello".as_slice())]
    #[case::tail(6, 5, b"world".as_slice())]
    #[case::clipped_short_read(8, 64, b"rld".as_slice())]
    #[case::len_zero_reads_to_end(6, 0, b"world".as_slice())]
    #[tokio::test]
    async fn serves_ranges_clipped_to_the_object(
        #[case] offset: u64,
        #[case] len: u64,
        #[case] expected: &[u8],
    ) {
        let source = source_with_hello();
        let stream = source.stream_at("obj", offset, len).await.unwrap();
        assert_eq!(stream.collect().await.unwrap(), Bytes::copy_from_slice(expected));
    }

    #[tokio::test]
    async fn size_hint_only_at_offset_zero() {
        let source = source_with_hello();

        let stream = source.stream_at("obj", 0, 5).await.unwrap();
        assert_eq!(stream.size(), Some(11));

        let stream = source.stream_at("obj", 6, 5).await.unwrap();
        assert_eq!(stream.size(), None);
    }

    #[rstest]
    #[case::at_end(11)]
    #[case::past_end(4096)]
    #[tokio::test]
    async fn range_at_or_past_end_is_end_of_stream(#[case] offset: u64) {
        let source = source_with_hello();
        let err = source.stream_at("obj", offset, 4).await.unwrap_err();
        assert!(err.is_eof());
    }

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let source = MemorySource::new();
        let err = source.stream_at("absent", 0, 4).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
