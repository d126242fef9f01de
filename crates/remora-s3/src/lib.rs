#![forbid(unsafe_code)]

//! `remora-s3`
//!
//! S3 [`RangeSource`](remora_stream::RangeSource): keys are
//! `s3://bucket/path` URIs, ranges map to `GetObject` with a `Range`
//! header, and the size hint for offset-0 requests comes from
//! `HeadObject`.

mod source;

pub use source::{S3Options, S3Source};
