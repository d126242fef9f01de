#![forbid(unsafe_code)]

//! # remora
//!
//! Cached random-access reads over range-addressable byte stores (object
//! storage, local files) behind a uniform `key + offset + length -> bytes`
//! contract. Previously fetched ranges are served from a bounded LRU cache
//! instead of going back to the store.
//!
//! ## Quick start
//!
//! ```ignore
//! use std::num::NonZeroUsize;
//! use remora::prelude::*;
//!
//! let adapter = Adapter::with_options(
//!     FsSource::new(),
//!     AdapterOptions::default()
//!         .with_cache(CacheOptions::new(NonZeroUsize::new(1024).unwrap())),
//! );
//!
//! let mut reader = adapter.reader("/var/data/demo.txt");
//! while let ReadOutcome::Data(chunk) = reader.read().await? {
//!     consume(&chunk);
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod cache {
    pub use remora_cache::*;
}

pub mod stream {
    pub use remora_stream::*;
}

#[cfg(feature = "file")]
pub mod file {
    pub use remora_file::*;
}

#[cfg(feature = "s3")]
pub mod s3 {
    pub use remora_s3::*;
}

pub use remora_core::{ObjectLocation, ReadError, ReadResult};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use remora_cache::CacheOptions;
    pub use remora_core::{ReadError, ReadResult};
    pub use remora_stream::{
        Adapter, AdapterOptions, RangeSource, RangeStream, ReadOutcome, Reader, Whence,
    };

    #[cfg(feature = "file")]
    pub use remora_file::FsSource;

    #[cfg(feature = "s3")]
    pub use remora_s3::{S3Options, S3Source};
}
