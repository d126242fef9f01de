use url::Url;

use crate::{ReadError, ReadResult};

/// Bucket and object path parsed out of a `scheme://bucket/path` key.
///
/// The scheme is accepted but not interpreted; `s3://photos/2024/cat.jpg`
/// and `minio://photos/2024/cat.jpg` both resolve to bucket `photos` and
/// path `2024/cat.jpg`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectLocation {
    bucket: String,
    path: String,
}

impl ObjectLocation {
    /// Parse an object key of the form `scheme://bucket/path`.
    ///
    /// Malformed keys (unparseable URI, missing bucket, empty path) are
    /// rejected with [`ReadError::InvalidArgument`] before any I/O happens.
    pub fn parse(key: &str) -> ReadResult<Self> {
        let url = Url::parse(key)
            .map_err(|e| ReadError::invalid_argument(format!("malformed object key {key:?}: {e}")))?;

        let bucket = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ReadError::invalid_argument(format!("object key {key:?} has no bucket")))?
            .to_string();

        let path = url.path().trim_start_matches('/').to_string();
        if path.is_empty() {
            return Err(ReadError::invalid_argument(format!(
                "object key {key:?} has no object path"
            )));
        }

        Ok(Self { bucket, path })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.path)
    }
}
