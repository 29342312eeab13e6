//! Request and response shapes exchanged with the application layer.
//!
//! Field names are camelCase on the wire. Every request field is optional at
//! the type level so a missing value reaches validation and produces the
//! documented `<field> is required` rejection instead of a parse error.

use bridge_traits::picker::PickerOptions;
use core_runtime::config::is_image_mime;
use provider_uploadcare::FileDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// `configure` request
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureRequest {
    pub public_key: Option<String>,
    pub secret_key: Option<String>,
    pub debug: Option<bool>,
    /// Overrides the CDN host used for synthesized URLs
    pub cdn_base: Option<String>,
    /// Overrides the Upload API host
    pub api_base: Option<String>,
}

impl ConfigureRequest {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: Some(public_key.into()),
            ..Self::default()
        }
    }

    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}

impl fmt::Debug for ConfigureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigureRequest")
            .field("public_key", &self.public_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("debug", &self.debug)
            .field("cdn_base", &self.cdn_base)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Options accepted by `openUploader`
///
/// `multiple` and `maxFiles` are accepted for compatibility; only one image
/// is ever picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadOptions {
    pub multiple: Option<bool>,
    pub max_files: Option<u32>,
    pub allowed_mime_types: Option<Vec<String>>,
    pub max_file_size_bytes: Option<u64>,
    pub enable_crop: Option<bool>,
    pub crop_ratio: Option<String>,
}

impl UploadOptions {
    /// Merges these options over the configured picker defaults.
    ///
    /// Non-image MIME types are dropped; if nothing usable remains the
    /// defaults apply.
    pub fn picker_options(&self, defaults: &PickerOptions) -> PickerOptions {
        let mime_types: Vec<String> = self
            .allowed_mime_types
            .iter()
            .flatten()
            .map(|mime| mime.trim().to_ascii_lowercase())
            .filter(|mime| is_image_mime(mime))
            .collect();

        PickerOptions {
            mime_types: if mime_types.is_empty() {
                defaults.mime_types.clone()
            } else {
                mime_types
            },
            enable_crop: self.enable_crop.unwrap_or(defaults.enable_crop),
            crop_ratio: self
                .crop_ratio
                .clone()
                .or_else(|| defaults.crop_ratio.clone()),
        }
    }
}

/// `uploadDataUri` request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataUriRequest {
    pub data_uri: Option<String>,
    pub file_name: Option<String>,
}

impl DataUriRequest {
    pub fn new(data_uri: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            data_uri: Some(data_uri.into()),
            file_name: Some(file_name.into()),
        }
    }
}

/// Response for upload operations: `{success, cancelled, files}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub success: bool,
    pub cancelled: bool,
    pub files: Vec<FileDescriptor>,
}

impl UploadResult {
    pub fn uploaded(file: FileDescriptor) -> Self {
        Self {
            success: true,
            cancelled: false,
            files: vec![file],
        }
    }

    pub fn cancelled() -> Self {
        Self {
            success: false,
            cancelled: true,
            files: Vec::new(),
        }
    }
}
