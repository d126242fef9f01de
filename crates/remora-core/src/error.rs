use thiserror::Error;

/// Result type used across remora crates.
pub type ReadResult<T> = Result<T, ReadError>;

/// Error taxonomy shared by sources, the adapter and readers.
///
/// [`ReadError::EndOfStream`] is a termination signal rather than a failure:
/// sources raise it for ranges at or past the end of an object, and the
/// cursor reader folds it into a normal end-of-stream outcome.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The underlying object does not exist. Non-retryable.
    #[error("object not found: {key}")]
    NotFound { key: String },

    /// The requested range lies beyond the object's end, or the object is
    /// fully consumed.
    #[error("end of stream")]
    EndOfStream,

    /// A malformed key or an out-of-range seek, rejected before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Any other failure from a range source, propagated verbatim.
    #[error("source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReadError {
    pub fn not_found<K: Into<String>>(key: K) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Wraps an arbitrary source failure.
    pub fn source<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Source(err.into())
    }

    /// Checks whether this is the end-of-stream signal.
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
