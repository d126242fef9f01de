#![forbid(unsafe_code)]

//! Per-key cursor with sequential and random-access reads.

use bytes::Bytes;
use remora_core::{ReadError, ReadResult};

use crate::{adapter::Adapter, source::RangeSource};

/// Origin for [`Reader::seek`] arithmetic.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Whence {
    /// Offset from the start of the object.
    Start,
    /// Offset relative to the current position.
    Current,
    /// Offset relative to the end; requires a known size.
    End,
}

/// Result of a read through a [`Reader`].
///
/// End of stream is an ordinary outcome carrying zero bytes, not an error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadOutcome {
    Data(Bytes),
    Eof,
}

impl ReadOutcome {
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Eof)
    }

    pub fn bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Data(bytes) => Some(bytes),
            Self::Eof => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Self::Data(bytes) => Some(bytes),
            Self::Eof => None,
        }
    }

    /// Bytes carried by this outcome; zero at end of stream.
    pub fn len(&self) -> usize {
        match self {
            Self::Data(bytes) => bytes.len(),
            Self::Eof => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cursor over one object, reading through a borrowed [`Adapter`].
///
/// A fresh reader sits at offset 0 with unknown size; the size becomes
/// known once a fetch that reached the source at offset 0 reports its
/// hint. Sequential reads advance the position by the bytes actually
/// read; random-access reads leave it alone. The cursor is single-owner:
/// reads take `&mut self` and the position is not shared.
pub struct Reader<'a, S> {
    adapter: &'a Adapter<S>,
    key: String,
    pos: u64,
    len: Option<u64>,
}

impl<'a, S: RangeSource> Reader<'a, S> {
    pub(crate) fn new(adapter: &'a Adapter<S>, key: String) -> Self {
        Self {
            adapter,
            key,
            pos: 0,
            len: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total object size, once known.
    pub fn len(&self) -> Option<u64> {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len.is_none_or(|len| len == 0)
    }

    /// Reads the next chunk at the current position and advances by the
    /// bytes actually read. Returns [`ReadOutcome::Eof`] once the position
    /// reaches the known size, or when the source signals end of stream.
    pub async fn read(&mut self) -> ReadResult<ReadOutcome> {
        let outcome = self.chunk_at(self.pos).await?;
        if let ReadOutcome::Data(bytes) = &outcome {
            self.pos = self.pos.saturating_add(bytes.len() as u64);
        }
        Ok(outcome)
    }

    /// Reads a chunk at an explicit offset without moving the cursor.
    pub async fn read_at(&mut self, offset: u64) -> ReadResult<ReadOutcome> {
        self.chunk_at(offset).await
    }

    async fn chunk_at(&mut self, offset: u64) -> ReadResult<ReadOutcome> {
        if let Some(len) = self.len
            && offset >= len
        {
            return Ok(ReadOutcome::Eof);
        }

        let chunk = self.adapter.chunk_size() as u64;
        match self.adapter.fetch(&self.key, offset, chunk).await {
            Ok((payload, size)) => {
                if let Some(size) = size {
                    self.len = Some(size);
                }
                Ok(ReadOutcome::Data(payload))
            }
            Err(ReadError::EndOfStream) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err),
        }
    }

    /// Moves the cursor to `whence + delta` and returns the new position.
    ///
    /// A negative result is rejected with `InvalidArgument` and the
    /// position is left unchanged, as is seeking from the end before the
    /// size is known. Seeking past the end is permitted; the next
    /// sequential read reports end of stream.
    pub fn seek(&mut self, delta: i64, whence: Whence) -> ReadResult<u64> {
        let base: i128 = match whence {
            Whence::Start => 0,
            Whence::Current => i128::from(self.pos),
            Whence::End => {
                let len = self.len.ok_or_else(|| {
                    ReadError::invalid_argument("seek from end requires a known size")
                })?;
                i128::from(len)
            }
        };

        let target = base + i128::from(delta);
        if target < 0 {
            return Err(ReadError::invalid_argument(format!(
                "seek to negative offset {target}"
            )));
        }

        self.pos = u64::try_from(target).map_err(|_| {
            ReadError::invalid_argument(format!("seek offset {target} out of range"))
        })?;
        Ok(self.pos)
    }
}
