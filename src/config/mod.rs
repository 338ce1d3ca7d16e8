#[cfg(feature = "cli")]
pub mod cli;

use std::env;

use crate::utils::error::{Result, StoreError};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};

pub const ENV_ACCESS_KEY: &str = "STOREGATE_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "STOREGATE_SECRET_KEY";
pub const ENV_BUCKET: &str = "STOREGATE_BUCKET";
pub const ENV_REGION: &str = "STOREGATE_REGION";
pub const ENV_S3_ENDPOINT: &str = "STOREGATE_S3_ENDPOINT";
pub const ENV_FILE_API_KEY: &str = "STOREGATE_FILE_API_KEY";
pub const ENV_FILE_BASE_URL: &str = "STOREGATE_FILE_BASE_URL";

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_FILE_BASE_URL: &str = "https://file-manager-vist.onrender.com";

/// Credentials and target bucket for the object store, read from the
/// environment at adapter construction time, never cached across calls.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible stores (MinIO, LocalStack).
    /// Implies path-style addressing.
    pub endpoint: Option<String>,
}

impl S3Config {
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        let access_key = read_required(ENV_ACCESS_KEY, &mut missing);
        let secret_key = read_required(ENV_SECRET_KEY, &mut missing);
        let bucket = read_required(ENV_BUCKET, &mut missing);

        let (Some(access_key), Some(secret_key), Some(bucket)) = (access_key, secret_key, bucket)
        else {
            return Err(StoreError::MissingEnv { vars: missing });
        };

        Ok(Self {
            access_key,
            secret_key,
            bucket,
            region: env::var(ENV_REGION).unwrap_or_else(|_| DEFAULT_REGION.to_string()),
            endpoint: env::var(ENV_S3_ENDPOINT).ok(),
        })
    }
}

impl Validate for S3Config {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("access_key", &self.access_key)?;
        validate_non_empty_string("secret_key", &self.secret_key)?;
        validate_bucket_name("bucket", &self.bucket)?;
        validate_region("region", &self.region)?;
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        Ok(())
    }
}

/// Base URL and API key for the remote file service. The base URL has a
/// production default and is only overridden for self-hosted deployments
/// and tests.
#[derive(Debug, Clone)]
pub struct FileServiceConfig {
    pub base_url: String,
    pub api_key: String,
}

impl FileServiceConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(ENV_FILE_API_KEY).map_err(|_| StoreError::MissingEnv {
            vars: vec![ENV_FILE_API_KEY],
        })?;

        Ok(Self {
            base_url: env::var(ENV_FILE_BASE_URL)
                .unwrap_or_else(|_| DEFAULT_FILE_BASE_URL.to_string()),
            api_key,
        })
    }
}

impl Validate for FileServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("api_key", &self.api_key)?;
        Ok(())
    }
}

fn read_required(name: &'static str, missing: &mut Vec<&'static str>) -> Option<String> {
    match env::var(name) {
        Ok(value) => Some(value),
        Err(_) => {
            missing.push(name);
            None
        }
    }
}

fn validate_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

fn validate_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(StoreError::InvalidConfigValue {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "region can only contain lowercase letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}
