//! Uploadcare client configuration, API payloads and the normalized file
//! descriptor returned to callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default Upload API host
pub const DEFAULT_UPLOAD_BASE: &str = "https://upload.uploadcare.com";

/// Default CDN host used when the service does not return a file URL
pub const DEFAULT_CDN_BASE: &str = "https://ucarecdn.com";

/// What the configured credentials allow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAccess {
    /// Public key only. Uploads work; management calls do not.
    UploadOnly,
    /// Public and secret key. Uploads are signed.
    Signed,
}

/// Uploadcare client configuration
///
/// Replaced wholesale on every `configure`; there is no partial update.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub public_key: String,
    secret_key: Option<String>,
    pub debug: bool,
    pub upload_base: String,
    pub cdn_base: String,
}

impl ClientConfig {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            secret_key: None,
            debug: false,
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
        }
    }

    /// Sets the secret key. An empty string leaves the client upload-only.
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        let secret_key = secret_key.into();
        self.secret_key = (!secret_key.is_empty()).then_some(secret_key);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_upload_base(mut self, upload_base: impl Into<String>) -> Self {
        self.upload_base = upload_base.into();
        self
    }

    pub fn with_cdn_base(mut self, cdn_base: impl Into<String>) -> Self {
        self.cdn_base = cdn_base.into();
        self
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    pub fn access(&self) -> ClientAccess {
        match self.secret_key {
            Some(_) => ClientAccess::Signed,
            None => ClientAccess::UploadOnly,
        }
    }

    /// Joins an Upload API path onto the configured host.
    pub(crate) fn upload_endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.upload_base.trim_end_matches('/'), path)
    }

    /// CDN URL for a file when the service does not report one.
    pub fn cdn_url_for(&self, uuid: &str) -> String {
        format!("{}/{}/", self.cdn_base.trim_end_matches('/'), uuid)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("debug", &self.debug)
            .field("upload_base", &self.upload_base)
            .field("cdn_base", &self.cdn_base)
            .finish()
    }
}

/// Flat description of an uploaded file
///
/// Optional fields are omitted from JSON when the service did not report
/// them; they are never serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub uuid: String,
    pub cdn_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl FileDescriptor {
    /// Descriptor carrying only what the upload response guarantees.
    pub fn from_uuid(uuid: impl Into<String>, config: &ClientConfig) -> Self {
        let uuid = uuid.into();
        Self {
            cdn_url: config.cdn_url_for(&uuid),
            uuid,
            filename: None,
            size_bytes: None,
            mime_type: None,
            width: None,
            height: None,
        }
    }

    /// Normalizes `/info/` metadata. `fallback_uuid` is used when the
    /// response omits the identifier.
    pub fn from_info(info: FileInfo, fallback_uuid: &str, config: &ClientConfig) -> Self {
        let uuid = info
            .uuid
            .filter(|uuid| !uuid.is_empty())
            .unwrap_or_else(|| fallback_uuid.to_string());

        let cdn_url = info
            .original_file_url
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| config.cdn_url_for(&uuid));

        let (width, height) = info
            .image_info
            .map(|image| (image.width, image.height))
            .unwrap_or_default();

        Self {
            uuid,
            cdn_url,
            filename: info.original_filename,
            size_bytes: info.size,
            mime_type: info.mime_type,
            width,
            height,
        }
    }
}

/// `POST /base/` response
#[derive(Debug, Clone, Deserialize)]
pub struct BaseUploadResponse {
    /// UUID of the stored file
    pub file: String,
}

/// `GET /info/` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileInfo {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub original_file_url: Option<String>,
    #[serde(default)]
    pub image_info: Option<ImageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageInfo {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}
