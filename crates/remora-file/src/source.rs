use std::{io::SeekFrom, path::PathBuf};

use async_trait::async_trait;
use futures::TryStreamExt;
use remora_core::{ReadError, ReadResult};
use remora_stream::{RangeSource, RangeStream};
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt},
};
use tokio_util::io::ReaderStream;
use tracing::debug;

/// [`RangeSource`] over the local filesystem.
///
/// Keys are paths. With [`FsSource::rooted`] keys are resolved relative to
/// a base directory, which keeps an embedding application from handing the
/// source absolute paths from untrusted keys.
#[derive(Clone, Debug, Default)]
pub struct FsSource {
    root: Option<PathBuf>,
}

impl FsSource {
    /// Keys are used as paths verbatim.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys are resolved relative to `root`.
    pub fn rooted<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(key.trim_start_matches('/')),
            None => PathBuf::from(key),
        }
    }
}

fn open_error(key: &str, err: std::io::Error) -> ReadError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ReadError::not_found(key)
    } else {
        ReadError::source(err)
    }
}

#[async_trait]
impl RangeSource for FsSource {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream> {
        let path = self.resolve(key);

        let mut file = File::open(&path).await.map_err(|e| open_error(key, e))?;
        let total = file
            .metadata()
            .await
            .map_err(ReadError::source)?
            .len();

        if offset >= total {
            return Err(ReadError::EndOfStream);
        }

        file.seek(SeekFrom::Start(offset))
            .await
            .map_err(ReadError::source)?;

        let remaining = total - offset;
        let take = if len == 0 { remaining } else { remaining.min(len) };

        debug!(key, offset, take, total, "streaming file range");

        let body = ReaderStream::new(file.take(take)).map_err(ReadError::source);
        let size = (offset == 0).then_some(total);

        Ok(RangeStream::new(Box::pin(body), size))
    }
}
