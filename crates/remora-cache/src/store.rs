use std::{
    collections::HashMap,
    num::NonZeroUsize,
    time::{Duration, Instant},
};

use bytes::Bytes;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    error::{CacheError, CacheResult},
    key::CacheKey,
};

/// Configuration for an [`EntryCache`].
///
/// Capacity is fixed at construction. `max_payload_bytes` bounds single
/// payloads (oversized writes fail and the caller serves uncached); `ttl`
/// is a default expiry applied to plain `put` calls.
#[derive(Clone, Debug)]
pub struct CacheOptions {
    pub num_entries: NonZeroUsize,
    pub max_payload_bytes: Option<usize>,
    pub ttl: Option<Duration>,
}

impl CacheOptions {
    #[must_use]
    pub fn new(num_entries: NonZeroUsize) -> Self {
        Self {
            num_entries,
            max_payload_bytes: None,
            ttl: None,
        }
    }

    /// Set an upper bound on single payload size.
    #[must_use]
    pub fn with_max_payload_bytes(mut self, bytes: usize) -> Self {
        self.max_payload_bytes = Some(bytes);
        self
    }

    /// Set a default time-to-live for entries.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }
}

struct Slot {
    payload: Bytes,
    last_touch: u64,
    expires_at: Option<Instant>,
}

impl Slot {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// In-memory state. Recency is a monotonically increasing logical clock;
/// the least-recently-accessed slot is the one with the smallest
/// `last_touch`.
#[derive(Default)]
struct LruState {
    clock: u64,
    slots: HashMap<CacheKey, Slot>,
}

impl LruState {
    fn tick(&mut self) -> u64 {
        self.clock = self.clock.saturating_add(1);
        self.clock
    }

    fn evict_lru(&mut self) -> Option<CacheKey> {
        let key = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_touch)
            .map(|(key, _)| key.clone())?;
        self.slots.remove(&key);
        Some(key)
    }
}

/// Bounded key-value store with strict LRU eviction and optional expiry.
///
/// `get` and `put` both refresh recency. Expired entries behave as absent
/// and are dropped when observed, independent of LRU pressure. Payloads
/// are [`Bytes`]: immutable once stored, cheap to hand back on hit.
///
/// All state sits behind a single mutex, so concurrent `get`/`put` on the
/// same key cannot corrupt the recency bookkeeping; racing writers to one
/// key are last-store-wins.
pub struct EntryCache {
    state: Mutex<LruState>,
    options: CacheOptions,
}

impl EntryCache {
    #[must_use]
    pub fn new(options: CacheOptions) -> Self {
        Self {
            state: Mutex::new(LruState::default()),
            options,
        }
    }

    pub fn capacity(&self) -> usize {
        self.options.num_entries.get()
    }

    pub fn len(&self) -> usize {
        self.state.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a payload. A miss returns `None`; lookups never error.
    pub fn get(&self, key: &CacheKey) -> Option<Bytes> {
        let mut state = self.state.lock();

        if state.slots.get(key).is_some_and(|s| s.is_expired(Instant::now())) {
            state.slots.remove(key);
            debug!(key = %key.object_key(), offset = key.offset(), "cache entry expired");
            return None;
        }

        let touch = state.tick();
        let slot = state.slots.get_mut(key)?;
        slot.last_touch = touch;
        Some(slot.payload.clone())
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        let state = self.state.lock();
        state
            .slots
            .get(key)
            .is_some_and(|s| !s.is_expired(Instant::now()))
    }

    /// Stores a payload, evicting the least-recently-accessed entry when
    /// capacity is exceeded. Applies the configured default TTL, if any.
    pub fn put(&self, key: CacheKey, payload: Bytes) -> CacheResult<()> {
        self.insert(key, payload, self.options.ttl)
    }

    /// As [`EntryCache::put`], but the entry becomes invisible once `ttl`
    /// elapses, independent of LRU pressure.
    pub fn put_with_expiry(&self, key: CacheKey, payload: Bytes, ttl: Duration) -> CacheResult<()> {
        self.insert(key, payload, Some(ttl))
    }

    fn insert(&self, key: CacheKey, payload: Bytes, ttl: Option<Duration>) -> CacheResult<()> {
        if let Some(limit) = self.options.max_payload_bytes
            && payload.len() > limit
        {
            return Err(CacheError::PayloadTooLarge {
                len: payload.len(),
                limit,
            });
        }

        let expires_at = ttl.map(|ttl| Instant::now() + ttl);

        let mut state = self.state.lock();
        let touch = state.tick();
        state.slots.insert(
            key,
            Slot {
                payload,
                last_touch: touch,
                expires_at,
            },
        );

        while state.slots.len() > self.options.num_entries.get() {
            match state.evict_lru() {
                Some(evicted) => {
                    debug!(key = %evicted.object_key(), offset = evicted.offset(), "evicted LRU cache entry");
                }
                None => break,
            }
        }

        Ok(())
    }
}
