use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use remora_core::ReadResult;
use remora_stream::{RangeSource, RangeStream};

/// Decorator that counts `stream_at` invocations per key.
pub struct CountingSource<S> {
    inner: S,
    calls: Mutex<HashMap<String, usize>>,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls_for(&self, key: &str) -> usize {
        self.calls.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }
}

#[async_trait]
impl<S: RangeSource> RangeSource for CountingSource<S> {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream> {
        *self.calls.lock().entry(key.to_string()).or_insert(0) += 1;
        self.inner.stream_at(key, offset, len).await
    }
}
