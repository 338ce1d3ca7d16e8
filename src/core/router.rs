use std::str::FromStr;

use crate::adapters::{FileServiceStore, LocalStore, S3Store, StoreBackend};
use crate::core::backend::Backend;
use crate::core::format::{decode_payload, encode_payload, DataFormat, Payload};
use crate::utils::error::Result;

/// Construct the adapter selected by `host`, reading that backend's
/// credentials from the environment. Variables of unused backends are never
/// touched. Unrecognized hosts fall back to the local filesystem.
pub fn connect(host: &str) -> Result<Box<dyn StoreBackend>> {
    match Backend::from_host(host) {
        Backend::ObjectStore => Ok(Box::new(S3Store::from_env()?)),
        Backend::FileService => Ok(Box::new(FileServiceStore::from_env()?)),
        Backend::Local => Ok(Box::new(LocalStore::new())),
    }
}

/// Write a value under `name` on the backend selected by `host`.
///
/// The format string is validated before anything else; an unsupported
/// value fails without reading credentials or touching the network.
pub async fn put(name: &str, data: impl Into<Payload>, host: &str, format: &str) -> Result<()> {
    let format = DataFormat::from_str(format)?;
    let backend = Backend::from_host(host);
    let body = encode_payload(&data.into(), format, backend)?;

    tracing::debug!("put {} via {} as {}", name, host, format.as_str());
    let store = connect(host)?;
    store.put_text(name, &body).await
}

/// Read the value stored under `name`, decoding it according to `format`.
pub async fn get(name: &str, host: &str, format: &str) -> Result<Payload> {
    let format = DataFormat::from_str(format)?;
    let backend = Backend::from_host(host);

    tracing::debug!("get {} via {} as {}", name, host, format.as_str());
    let store = connect(host)?;
    let raw = store.get_text(name, format).await?;
    decode_payload(raw, format, backend)
}

/// Copy a local file to the backend under `name`. Raw bytes, no format
/// conversion; a no-op on the local backend.
pub async fn upload(local_path: &str, name: &str, host: &str) -> Result<()> {
    tracing::debug!("upload {} to {} via {}", local_path, name, host);
    let store = connect(host)?;
    store.upload_file(local_path, name).await
}

/// Fetch the backend object `name` into a local file. Counterpart of
/// [`upload`].
pub async fn download(name: &str, local_path: &str, host: &str) -> Result<()> {
    tracing::debug!("download {} to {} via {}", name, local_path, host);
    let store = connect(host)?;
    store.download_file(name, local_path).await
}
