#![forbid(unsafe_code)]

//! `remora-core`
//!
//! Shared primitives for remora:
//! - The [`ReadError`] taxonomy every layer speaks
//! - [`ObjectLocation`] parsing of `scheme://bucket/path` object keys

mod error;
mod location;

pub use error::{ReadError, ReadResult};
pub use location::ObjectLocation;
