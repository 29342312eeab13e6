//! Resource resolution for desktop picker handles
//!
//! On desktop a picker handle is a filesystem path, optionally written as a
//! `file://` URL.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    picker::{PickedResource, ResourceHandle, ResourceResolver},
};
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;
use url::Url;

use crate::mime::mime_for_extension;

/// Tokio-based resolver reading picked files from disk
#[derive(Debug, Clone, Default)]
pub struct TokioResourceResolver;

impl TokioResourceResolver {
    pub fn new() -> Self {
        Self
    }

    /// `file:` URLs are decoded to a local path; anything else is taken as a
    /// path as-is.
    fn path_of(handle: &ResourceHandle) -> Result<PathBuf> {
        let raw = handle.as_str();
        if !raw.starts_with("file:") {
            return Ok(PathBuf::from(raw));
        }

        Url::parse(raw)
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid file URL: {}", e)))?
            .to_file_path()
            .map_err(|_| BridgeError::OperationFailed(format!("Not a local file URL: {}", raw)))
    }
}

#[async_trait]
impl ResourceResolver for TokioResourceResolver {
    async fn resolve(&self, handle: &ResourceHandle) -> Result<PickedResource> {
        let path = Self::path_of(handle)?;

        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => BridgeError::ResourceNotFound(path.display().to_string()),
            _ => BridgeError::Io(e),
        })?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(mime_for_extension)
            .map(str::to_string);

        debug!(bytes = data.len(), ?mime_type, "Resolved picked resource");

        Ok(PickedResource {
            file_name,
            mime_type,
            data: Bytes::from(data),
        })
    }
}
