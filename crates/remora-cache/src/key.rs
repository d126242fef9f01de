/// Cache key for a fetched range: (object key, offset, length).
///
/// Keying per range keeps the invariant that one cache key never maps to
/// payloads for two different logical ranges: distinct ranges of the same
/// object coexist, and repeated identical requests collide on purpose.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CacheKey {
    key: String,
    offset: u64,
    len: u64,
}

impl CacheKey {
    pub fn new<K: Into<String>>(key: K, offset: u64, len: u64) -> Self {
        Self {
            key: key.into(),
            offset,
            len,
        }
    }

    pub fn object_key(&self) -> &str {
        &self.key
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn range_len(&self) -> u64 {
        self.len
    }

    /// Checks if this key belongs to the given object, ignoring the range.
    pub fn matches_object(&self, key: &str) -> bool {
        self.key == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_ranges_are_distinct_keys() {
        let a = CacheKey::new("s3://bucket/obj", 0, 16);
        let b = CacheKey::new("s3://bucket/obj", 16, 16);
        let c = CacheKey::new("s3://bucket/obj", 0, 32);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, CacheKey::new("s3://bucket/obj", 0, 16));
    }

    #[test]
    fn matches_object_ignores_the_range() {
        let key = CacheKey::new("s3://bucket/obj", 128, 64);
        assert!(key.matches_object("s3://bucket/obj"));
        assert!(!key.matches_object("s3://bucket/other"));
    }
}
