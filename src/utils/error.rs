use crate::core::backend::Backend;
use std::fmt;
use thiserror::Error;

/// Operation name carried inside a backend error tag.
///
/// Remote backends report `Put`/`Get`/`Upload`/`Download`, the local
/// filesystem reports `Read`/`Write`, mirroring the words each backend
/// uses in its error strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Put,
    Get,
    Upload,
    Download,
    Read,
    Write,
    Head,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Put => "Put",
            Operation::Get => "Get",
            Operation::Upload => "Upload",
            Operation::Download => "Download",
            Operation::Read => "Read",
            Operation::Write => "Write",
            Operation::Head => "Head",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport or backend-side failure, attributed via the bracketed tag.
    #[error("[{} {} Error] {}", .backend.tag(), .operation, .message)]
    Backend {
        backend: Backend,
        operation: Operation,
        message: String,
    },

    /// Payload could not be decoded after a successful transfer. Kept as a
    /// separate variant so callers can tell corruption from transport errors.
    #[error("[{} Read Error] {}", .backend.tag(), .message)]
    Decode { backend: Backend, message: String },

    #[error("Unsupported data_format '{value}'. Only text and json are supported.")]
    UnsupportedFormat { value: String },

    #[error("Missing required environment variables: {}", .vars.join(", "))]
    MissingEnv { vars: Vec<&'static str> },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl StoreError {
    /// Configuration-class failures abort before any I/O is attempted.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            StoreError::UnsupportedFormat { .. }
                | StoreError::MissingEnv { .. }
                | StoreError::InvalidConfigValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
