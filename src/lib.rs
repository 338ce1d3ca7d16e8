//! Uniform storage dispatch: one put/get/upload/download surface over an
//! S3-compatible object store, a remote file service, and the local
//! filesystem, selected by a host string and configured from the
//! environment at call time.

pub mod adapters;
pub mod config;
pub mod core;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{FileServiceStore, LocalStore, S3Store, StoreBackend, UploadOptions, WireFormat};
pub use config::{FileServiceConfig, S3Config};
pub use crate::core::backend::{resolve_host, Backend};
pub use crate::core::format::{DataFormat, Payload};
pub use crate::core::router::{connect, download, get, put, upload};
pub use utils::error::{Operation, Result, StoreError};
