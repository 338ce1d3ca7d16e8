use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::adapters::StoreBackend;
use crate::config::S3Config;
use crate::core::backend::Backend;
use crate::core::format::DataFormat;
use crate::utils::error::{Operation, Result, StoreError};
use crate::utils::validation::Validate;

/// Optional settings forwarded to the object store on upload.
/// Everything here is the backend's concern; unknown ACL values are passed
/// through verbatim.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub content_type: Option<String>,
    pub acl: Option<String>,
    pub metadata: HashMap<String, String>,
}

/// Object-store backend. The client, bucket, and credentials are bound at
/// construction; the router constructs a fresh instance per call so
/// credentials are re-read from the environment each time.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn from_env() -> Result<Self> {
        Self::new(S3Config::from_env()?)
    }

    pub fn new(config: S3Config) -> Result<Self> {
        config.validate()?;

        let credentials = Credentials::new(
            config.access_key.as_str(),
            config.secret_key.as_str(),
            None,
            None,
            "storegate",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .credentials_provider(credentials)
            // each public operation is a single one-shot round trip
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket,
        })
    }

    /// `put_text` with an explicit content type instead of `text/plain`.
    pub async fn put_text_with(&self, name: &str, body: &str, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .body(ByteStream::from(body.as_bytes().to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| Self::op_error(Operation::Put, DisplayErrorContext(e)))?;
        Ok(())
    }

    /// `upload_file` with ACL, content type, and object metadata forwarded
    /// to the store. The file is read fully into memory; streaming is out
    /// of scope.
    pub async fn upload_file_with(
        &self,
        local_path: &str,
        name: &str,
        options: UploadOptions,
    ) -> Result<()> {
        let data = tokio::fs::read(local_path)
            .await
            .map_err(|e| Self::op_error(Operation::Upload, e))?;

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(name)
            .body(ByteStream::from(data));

        if let Some(content_type) = &options.content_type {
            request = request.content_type(content_type);
        }
        if let Some(acl) = &options.acl {
            request = request.acl(ObjectCannedAcl::from(acl.as_str()));
        }
        for (key, value) in &options.metadata {
            request = request.metadata(key, value);
        }

        request
            .send()
            .await
            .map_err(|e| Self::op_error(Operation::Upload, DisplayErrorContext(e)))?;
        Ok(())
    }

    fn op_error(operation: Operation, message: impl ToString) -> StoreError {
        StoreError::Backend {
            backend: Backend::ObjectStore,
            operation,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackend for S3Store {
    async fn put_text(&self, name: &str, body: &str) -> Result<()> {
        self.put_text_with(name, body, "text/plain").await
    }

    async fn get_text(&self, name: &str, _format: DataFormat) -> Result<String> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| Self::op_error(Operation::Get, DisplayErrorContext(e)))?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| Self::op_error(Operation::Get, DisplayErrorContext(e)))?;

        // objects written through put_text are UTF-8; anything else is a
        // backend-tagged failure, not a panic
        String::from_utf8(data.into_bytes().to_vec())
            .map_err(|e| Self::op_error(Operation::Get, e))
    }

    async fn upload_file(&self, local_path: &str, name: &str) -> Result<()> {
        self.upload_file_with(local_path, name, UploadOptions::default())
            .await
    }

    async fn download_file(&self, name: &str, local_path: &str) -> Result<()> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
            .map_err(|e| Self::op_error(Operation::Download, DisplayErrorContext(e)))?;

        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| Self::op_error(Operation::Download, DisplayErrorContext(e)))?;

        if let Some(parent) = Path::new(local_path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::op_error(Operation::Download, e))?;
        }

        tokio::fs::write(local_path, data.into_bytes())
            .await
            .map_err(|e| Self::op_error(Operation::Download, e))
    }

    async fn head(&self, name: &str) -> Result<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    Ok(false)
                } else {
                    Err(Self::op_error(
                        Operation::Head,
                        DisplayErrorContext(service_error),
                    ))
                }
            }
        }
    }
}
