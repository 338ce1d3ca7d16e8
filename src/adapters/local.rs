use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::adapters::StoreBackend;
use crate::core::backend::Backend;
use crate::core::format::DataFormat;
use crate::utils::error::{Operation, Result, StoreError};

/// Fallback backend writing straight to the filesystem. Names are used as
/// paths, resolved against the working directory unless a base path is set.
#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    base_path: Option<PathBuf>,
}

impl LocalStore {
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Resolve names relative to `base_path`. Absolute names still win.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: Some(base_path.into()),
        }
    }

    fn full_path(&self, name: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(name),
            None => PathBuf::from(name),
        }
    }

    fn op_error(operation: Operation, message: impl ToString) -> StoreError {
        StoreError::Backend {
            backend: Backend::Local,
            operation,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackend for LocalStore {
    async fn put_text(&self, name: &str, body: &str) -> Result<()> {
        let path = self.full_path(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::op_error(Operation::Write, e))?;
        }

        fs::write(&path, body)
            .await
            .map_err(|e| Self::op_error(Operation::Write, e))
    }

    async fn get_text(&self, name: &str, _format: DataFormat) -> Result<String> {
        fs::read_to_string(self.full_path(name))
            .await
            .map_err(|e| Self::op_error(Operation::Read, e))
    }

    // source and destination coincide for the local backend, so moving a
    // file "to" or "from" it is already done
    async fn upload_file(&self, _local_path: &str, _name: &str) -> Result<()> {
        Ok(())
    }

    async fn download_file(&self, _name: &str, _local_path: &str) -> Result<()> {
        Ok(())
    }

    async fn head(&self, name: &str) -> Result<bool> {
        fs::try_exists(self.full_path(name))
            .await
            .map_err(|e| Self::op_error(Operation::Head, e))
    }
}
