//! AWS S3 artifact store implementation.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use super::ArtifactStore;
use crate::error::{Error, Result};

/// Artifact store backed by an S3 bucket.
///
/// Objects land at `s3://{bucket}/{key}`; keys carry the caller's prefix
/// layout verbatim.
#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    client: Client,
    bucket: String,
}

impl S3ArtifactStore {
    /// Creates a store handle for the given bucket.
    #[must_use]
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Returns the bucket this store writes to.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put_file(&self, key: &str, path: &Path) -> Result<()> {
        let body = ByteStream::from_path(path).await.map_err(|e| {
            Error::storage_with_source(format!("failed to read {}", path.display()), e)
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                Error::storage_with_source(format!("failed to upload s3://{}/{key}", self.bucket), e)
            })?;

        Ok(())
    }
}
