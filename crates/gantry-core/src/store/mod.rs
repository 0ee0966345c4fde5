//! Artifact store abstraction for result persistence.
//!
//! This module provides:
//!
//! - [`ArtifactStore`]: Trait for uploading result files by key
//! - [`S3ArtifactStore`]: AWS S3 implementation
//! - [`InMemoryArtifactStore`]: In-memory implementation for testing
//!
//! Keys are plain forward-slash-separated strings; layout policy (which
//! prefix a file lands under) belongs to the caller.

pub mod memory;
pub mod s3;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::InMemoryArtifactStore;
pub use s3::S3ArtifactStore;

/// Object store seam for durable result artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Uploads the file at `path` under the given key, replacing any
    /// existing object with that key.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Storage`] if the file cannot be read or
    /// the backend rejects the upload.
    async fn put_file(&self, key: &str, path: &Path) -> Result<()>;
}
