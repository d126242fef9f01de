#![forbid(unsafe_code)]

//! `remora-stream`
//!
//! The core of remora: random-access reads over range-addressable byte
//! stores behind a uniform `key + offset + length -> bytes` contract.
//!
//! - [`RangeSource`] is the capability boundary a backing store implements
//! - [`Adapter`] orchestrates a source with an optional LRU entry cache
//! - [`Reader`] is a per-key cursor exposing sequential and random-access
//!   reads plus seek arithmetic
//!
//! ## Quick start
//!
//! ```ignore
//! use remora_stream::{Adapter, AdapterOptions, MemorySource};
//! use remora_cache::CacheOptions;
//!
//! let source = MemorySource::new();
//! source.insert("demo.txt", "hello world");
//!
//! let adapter = Adapter::with_options(
//!     source,
//!     AdapterOptions::default().with_cache(CacheOptions::new(capacity)),
//! );
//! let mut reader = adapter.reader("demo.txt");
//! let chunk = reader.read().await?;
//! ```

mod adapter;
mod memory;
mod reader;
mod source;

pub use adapter::{Adapter, AdapterOptions, DEFAULT_CHUNK_SIZE};
pub use memory::MemorySource;
pub use reader::{ReadOutcome, Reader, Whence};
pub use source::{ByteStream, RangeSource, RangeStream};

pub use remora_core::{ReadError, ReadResult};
