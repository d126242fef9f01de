use async_trait::async_trait;
use aws_sdk_s3::{
    Client,
    error::ProvideErrorMetadata,
    operation::{get_object::GetObjectError, head_object::HeadObjectError},
    types::RequestPayer,
};
use futures::TryStreamExt;
use remora_core::{ObjectLocation, ReadError, ReadResult};
use remora_stream::{RangeSource, RangeStream};
use tokio_util::io::ReaderStream;
use tracing::debug;

/// Configuration for an [`S3Source`].
#[derive(Clone, Debug, Default)]
pub struct S3Options {
    /// Send requests as `RequestPayer: requester` (requester-pays buckets).
    pub request_payer: bool,
}

impl S3Options {
    #[must_use]
    pub fn with_request_payer(mut self) -> Self {
        self.request_payer = true;
        self
    }
}

/// [`RangeSource`] over S3-compatible object storage.
///
/// Keys are `s3://bucket/path` URIs. An offset-0 request issues a
/// `HeadObject` for the total-size hint before the ranged `GetObject`;
/// other offsets skip the extra round trip and report no size.
#[derive(Clone, Debug)]
pub struct S3Source {
    client: Client,
    options: S3Options,
}

impl S3Source {
    pub fn new(client: Client) -> Self {
        Self::with_options(client, S3Options::default())
    }

    pub fn with_options(client: Client, options: S3Options) -> Self {
        Self { client, options }
    }

    /// Builds a source from the default environment configuration
    /// (credentials chain, region, endpoint overrides).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }

    fn request_payer(&self) -> Option<RequestPayer> {
        self.options.request_payer.then_some(RequestPayer::Requester)
    }
}

/// How a service error affects the read, by error code.
#[derive(Debug, Eq, PartialEq)]
enum RangeFault {
    Eof,
    NotFound,
    Other,
}

fn classify_code(code: Option<&str>) -> RangeFault {
    match code {
        Some("InvalidRange") => RangeFault::Eof,
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => RangeFault::NotFound,
        _ => RangeFault::Other,
    }
}

fn map_sdk_error<E>(key: &str, err: E) -> ReadError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match classify_code(err.code()) {
        RangeFault::Eof => ReadError::EndOfStream,
        RangeFault::NotFound => ReadError::not_found(key),
        RangeFault::Other => ReadError::source(err),
    }
}

fn range_header(offset: u64, len: u64) -> Option<String> {
    if offset == 0 && len == 0 {
        return None;
    }
    if len == 0 {
        return Some(format!("bytes={offset}-"));
    }
    Some(format!("bytes={}-{}", offset, offset + len - 1))
}

#[async_trait]
impl RangeSource for S3Source {
    async fn stream_at(&self, key: &str, offset: u64, len: u64) -> ReadResult<RangeStream> {
        let location = ObjectLocation::parse(key)?;

        // The total size is only owed to offset-0 callers; skip the extra
        // round trip otherwise.
        let size = if offset == 0 {
            let head = self
                .client
                .head_object()
                .bucket(location.bucket())
                .key(location.path())
                .set_request_payer(self.request_payer())
                .send()
                .await
                .map_err(|e| {
                    // A 404 head response has no error body to carry a code.
                    if matches!(e.as_service_error(), Some(HeadObjectError::NotFound(_))) {
                        ReadError::not_found(key)
                    } else {
                        map_sdk_error(key, e)
                    }
                })?;
            head.content_length().and_then(|l| u64::try_from(l).ok())
        } else {
            None
        };

        debug!(bucket = location.bucket(), object = location.path(), offset, len, "fetching s3 range");

        let mut request = self
            .client
            .get_object()
            .bucket(location.bucket())
            .key(location.path())
            .set_request_payer(self.request_payer());
        if let Some(range) = range_header(offset, len) {
            request = request.range(range);
        }

        let output = request.send().await.map_err(|e| {
            if matches!(e.as_service_error(), Some(GetObjectError::NoSuchKey(_))) {
                ReadError::not_found(key)
            } else {
                map_sdk_error(key, e)
            }
        })?;

        let body = ReaderStream::new(output.body.into_async_read()).map_err(ReadError::source);
        Ok(RangeStream::new(Box::pin(body), size))
    }
}
