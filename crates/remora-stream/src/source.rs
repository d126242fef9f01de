use std::pin::Pin;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt, stream};
use remora_core::ReadResult;

/// Chunked byte stream produced by a range source.
pub type ByteStream = Pin<Box<dyn Stream<Item = ReadResult<Bytes>> + Send>>;

/// An open byte stream for one range, plus the total-size hint a source
/// reports for offset-0 requests.
pub struct RangeStream {
    body: ByteStream,
    size: Option<u64>,
}

impl std::fmt::Debug for RangeStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeStream")
            .field("body", &"<stream>")
            .field("size", &self.size)
            .finish()
    }
}

impl RangeStream {
    pub fn new(body: ByteStream, size: Option<u64>) -> Self {
        Self { body, size }
    }

    /// Builds a stream over an already-materialized payload.
    pub fn from_bytes(payload: Bytes, size: Option<u64>) -> Self {
        Self {
            body: Box::pin(stream::iter([Ok(payload)])),
            size,
        }
    }

    /// Total object size, reported only for offset-0 requests.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Drains the body into a single payload.
    ///
    /// A single-chunk body is handed back without copying.
    pub async fn collect(mut self) -> ReadResult<Bytes> {
        let Some(first) = self.body.try_next().await? else {
            return Ok(Bytes::new());
        };
        let Some(second) = self.body.try_next().await? else {
            return Ok(first);
        };

        let mut buf = BytesMut::with_capacity(first.len() + second.len());
        buf.extend_from_slice(&first);
        buf.extend_from_slice(&second);
        while let Some(chunk) = self.body.try_next().await? {
            buf.extend_from_slice(&chunk);
        }
        Ok(buf.freeze())
    }
}

/// Capability boundary for range-addressable byte stores.
///
/// Implementations must:
/// - report the object's total size when `offset == 0`, `None` otherwise
/// - map a range at or past the object's end to
///   [`ReadError::EndOfStream`](remora_core::ReadError::EndOfStream),
///   not a hard error
/// - map a missing object to
///   [`ReadError::NotFound`](remora_core::ReadError::NotFound), distinct
///   from transient failure
/// - yield, once drained, exactly the bytes in `[offset, offset + len)`
///   clipped to the object's actual size; `len == 0` reads to the end
///
/// Cancellation and timeouts are the caller's concern, imposed at this
/// boundary; the adapter never retries.
#[async_trait]
pub trait RangeSource: Send + Sync {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream>;
}

#[async_trait]
impl<S: RangeSource + ?Sized> RangeSource for std::sync::Arc<S> {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream> {
        (**self).stream_at(key, offset, len).await
    }
}
