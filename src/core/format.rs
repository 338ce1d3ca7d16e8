use std::str::FromStr;

use serde_json::Value;

use crate::core::backend::Backend;
use crate::utils::error::{Operation, Result, StoreError};

/// Logical encoding of a stored value, independent of any backend's wire
/// representation. Parsed from the caller's format string before any
/// credential read or I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Text,
    Json,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Text => "text",
            DataFormat::Json => "json",
        }
    }
}

impl FromStr for DataFormat {
    type Err = StoreError;

    // Exact match only; "TEXT" or "Json" are unsupported values.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(DataFormat::Text),
            "json" => Ok(DataFormat::Json),
            other => Err(StoreError::UnsupportedFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// A value travelling through the uniform put/get path.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(Value),
}

impl Payload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Text(_) => None,
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload::Json(value)
    }
}

// Write-path errors use each backend's own vocabulary: file I/O words for
// the local store, transfer words for the remote ones.
fn write_operation(backend: Backend) -> Operation {
    match backend {
        Backend::Local => Operation::Write,
        _ => Operation::Put,
    }
}

/// Serialize a payload to the text form handed to an adapter's put.
///
/// Text payloads under the `json` format are JSON-encoded (and come back
/// from a json get as a JSON string value). A structured payload under the
/// `text` format has no textual form and fails with the backend's write tag.
pub fn encode_payload(payload: &Payload, format: DataFormat, backend: Backend) -> Result<String> {
    match (payload, format) {
        (Payload::Text(text), DataFormat::Text) => Ok(text.clone()),
        (Payload::Json(value), DataFormat::Json) => {
            serde_json::to_string(value).map_err(|e| StoreError::Backend {
                backend,
                operation: write_operation(backend),
                message: e.to_string(),
            })
        }
        (Payload::Text(text), DataFormat::Json) => {
            serde_json::to_string(text).map_err(|e| StoreError::Backend {
                backend,
                operation: write_operation(backend),
                message: e.to_string(),
            })
        }
        (Payload::Json(_), DataFormat::Text) => Err(StoreError::Backend {
            backend,
            operation: write_operation(backend),
            message: "a json payload cannot be written with the text format".to_string(),
        }),
    }
}

/// Interpret the text an adapter returned according to `format`.
///
/// A json parse failure is a `Decode` error tagged with the backend it came
/// from, distinct from the transport errors the adapter itself produces.
pub fn decode_payload(raw: String, format: DataFormat, backend: Backend) -> Result<Payload> {
    match format {
        DataFormat::Text => Ok(Payload::Text(raw)),
        DataFormat::Json => serde_json::from_str(&raw)
            .map(Payload::Json)
            .map_err(|e| StoreError::Decode {
                backend,
                message: e.to_string(),
            }),
    }
}
