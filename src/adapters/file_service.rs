use std::path::Path;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::StoreBackend;
use crate::config::FileServiceConfig;
use crate::core::backend::Backend;
use crate::core::format::DataFormat;
use crate::utils::error::{Operation, Result, StoreError};
use crate::utils::validation::Validate;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Representation negotiated with the service via the `data_format` field.
/// `binary` carries file bytes as a JSON array of integers; upload and
/// download always use it, `put`/`get` use the text/json pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireFormat {
    Text,
    Json,
    Binary,
}

impl WireFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireFormat::Text => "text",
            WireFormat::Json => "json",
            WireFormat::Binary => "binary",
        }
    }
}

impl From<DataFormat> for WireFormat {
    fn from(format: DataFormat) -> Self {
        match format {
            DataFormat::Text => WireFormat::Text,
            DataFormat::Json => WireFormat::Json,
        }
    }
}

#[derive(Debug, Serialize)]
struct PutEnvelope {
    data: Value,
    data_format: WireFormat,
}

#[derive(Debug, Deserialize)]
struct GetEnvelope {
    data: Value,
}

/// Remote file-service backend: a key-value disk behind
/// `{base_url}/files/{name}`, authenticated with a static API key header.
#[derive(Debug, Clone)]
pub struct FileServiceStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl FileServiceStore {
    pub fn from_env() -> Result<Self> {
        Self::new(FileServiceConfig::from_env()?)
    }

    pub fn new(config: FileServiceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Write `data` under `name` with an explicit wire format, bypassing the
    /// router's central text path. `Binary` expects `data` to already be a
    /// JSON array of byte values.
    pub async fn put_value(&self, name: &str, data: Value, format: WireFormat) -> Result<()> {
        self.put_envelope(name, Operation::Put, data, format).await
    }

    fn file_url(&self, name: &str) -> String {
        format!("{}/files/{}", self.base_url, name)
    }

    async fn put_envelope(
        &self,
        name: &str,
        operation: Operation,
        data: Value,
        format: WireFormat,
    ) -> Result<()> {
        let resp = self
            .client
            .put(self.file_url(name))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&PutEnvelope {
                data,
                data_format: format,
            })
            .send()
            .await
            .map_err(|e| Self::op_error(operation, e))?;

        resp.error_for_status()
            .map_err(|e| Self::op_error(operation, e))?;
        Ok(())
    }

    // non-2xx raises before the body is ever parsed
    async fn get_envelope(
        &self,
        name: &str,
        operation: Operation,
        format: WireFormat,
    ) -> Result<Value> {
        let resp = self
            .client
            .get(self.file_url(name))
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("data_format", format.as_str())])
            .send()
            .await
            .map_err(|e| Self::op_error(operation, e))?;

        let resp = resp
            .error_for_status()
            .map_err(|e| Self::op_error(operation, e))?;

        let envelope: GetEnvelope = resp.json().await.map_err(|e| StoreError::Decode {
            backend: Backend::FileService,
            message: e.to_string(),
        })?;
        Ok(envelope.data)
    }

    fn op_error(operation: Operation, message: impl ToString) -> StoreError {
        StoreError::Backend {
            backend: Backend::FileService,
            operation,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackend for FileServiceStore {
    async fn put_text(&self, name: &str, body: &str) -> Result<()> {
        // bodies arrive pre-serialized, so the wire format is always text
        self.put_envelope(
            name,
            Operation::Put,
            Value::String(body.to_string()),
            WireFormat::Text,
        )
        .await
    }

    async fn get_text(&self, name: &str, format: DataFormat) -> Result<String> {
        let data = self
            .get_envelope(name, Operation::Get, WireFormat::from(format))
            .await?;

        // the service may answer a json read with the parsed value instead
        // of its text; re-serialize so the central decoder sees one shape
        match data {
            Value::String(text) => Ok(text),
            other => serde_json::to_string(&other).map_err(|e| StoreError::Decode {
                backend: Backend::FileService,
                message: e.to_string(),
            }),
        }
    }

    async fn upload_file(&self, local_path: &str, name: &str) -> Result<()> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| Self::op_error(Operation::Upload, e))?;

        let data = Value::Array(bytes.into_iter().map(Value::from).collect());
        self.put_envelope(name, Operation::Upload, data, WireFormat::Binary)
            .await
    }

    async fn download_file(&self, name: &str, local_path: &str) -> Result<()> {
        let data = self
            .get_envelope(name, Operation::Download, WireFormat::Binary)
            .await?;
        let bytes = decode_byte_array(&data)?;

        if let Some(parent) = Path::new(local_path).parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::op_error(Operation::Download, e))?;
        }

        tokio::fs::write(local_path, &bytes)
            .await
            .map_err(|e| Self::op_error(Operation::Download, e))
    }

    async fn head(&self, name: &str) -> Result<bool> {
        let resp = self
            .client
            .get(self.file_url(name))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| Self::op_error(Operation::Head, e))?;

        match resp.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Self::op_error(Operation::Head, format!("status {status}"))),
        }
    }
}

fn decode_byte_array(data: &Value) -> Result<Vec<u8>> {
    let items = data.as_array().ok_or_else(|| StoreError::Decode {
        backend: Backend::FileService,
        message: "binary payload is not an array of bytes".to_string(),
    })?;

    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| StoreError::Decode {
                    backend: Backend::FileService,
                    message: format!("invalid byte value in binary payload: {}", item),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format_names() {
        assert_eq!(WireFormat::Text.as_str(), "text");
        assert_eq!(WireFormat::Json.as_str(), "json");
        assert_eq!(WireFormat::Binary.as_str(), "binary");
        assert_eq!(
            serde_json::to_value(WireFormat::Binary).unwrap(),
            json!("binary")
        );
    }

    #[test]
    fn test_decode_byte_array() {
        let bytes = decode_byte_array(&json!([0, 127, 255])).unwrap();
        assert_eq!(bytes, vec![0u8, 127, 255]);
    }

    #[test]
    fn test_decode_byte_array_rejects_out_of_range_values() {
        assert!(decode_byte_array(&json!([0, 300])).is_err());
        assert!(decode_byte_array(&json!([-1])).is_err());
        assert!(decode_byte_array(&json!([1.5])).is_err());
    }

    #[test]
    fn test_decode_byte_array_rejects_non_arrays() {
        let err = decode_byte_array(&json!("bytes")).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }
}
