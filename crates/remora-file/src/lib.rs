#![forbid(unsafe_code)]

//! `remora-file`
//!
//! Local-filesystem [`RangeSource`](remora_stream::RangeSource): keys are
//! file paths, ranges are served with `tokio::fs` seek-and-take reads.

mod source;

pub use source::FsSource;
