// Adapters layer: one module per storage backend, all behind the same trait.

pub mod file_service;
pub mod local;
pub mod s3;

pub use file_service::{FileServiceStore, WireFormat};
pub use local::LocalStore;
pub use s3::{S3Store, UploadOptions};

use async_trait::async_trait;

use crate::core::format::DataFormat;
use crate::utils::error::Result;

/// Uniform contract every backend implements. `put_text` receives the body
/// already serialized; `get_text` returns the stored text and leaves
/// interpretation to the caller. Adapters never panic on backend failures,
/// they return tagged errors.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn put_text(&self, name: &str, body: &str) -> Result<()>;

    /// `format` is forwarded to backends whose wire protocol negotiates it
    /// (the file service); the others ignore it.
    async fn get_text(&self, name: &str, format: DataFormat) -> Result<String>;

    /// Copy a local file to the backend as raw bytes, no format conversion.
    async fn upload_file(&self, local_path: &str, name: &str) -> Result<()>;

    async fn download_file(&self, name: &str, local_path: &str) -> Result<()>;

    /// Existence check that keeps its error channel, so callers can tell
    /// "not found" from "backend unreachable".
    async fn head(&self, name: &str) -> Result<bool>;

    /// Collapses every `head` failure to `false`. Absence and backend
    /// outage are indistinguishable here; use `head` when that matters.
    async fn exists(&self, name: &str) -> bool {
        self.head(name).await.unwrap_or(false)
    }
}
