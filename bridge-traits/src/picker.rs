//! Image Picker Abstractions
//!
//! The picker is an interactive, asynchronous platform UI. It hands back an
//! opaque [`ResourceHandle`] (content URI, file path, photo-library id, ...)
//! which a [`ResourceResolver`] later turns into bytes.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// MIME filter used when the caller does not narrow the selection.
pub const IMAGE_MIME_WILDCARD: &str = "image/*";

/// Opaque reference to a resource selected in the platform picker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceHandle(String);

impl ResourceHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hints forwarded to the platform picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// MIME types the picker should offer; always within `image/*`
    pub mime_types: Vec<String>,
    /// Whether to show a crop step, where the platform supports one
    pub enable_crop: bool,
    /// Preferred crop aspect ratio such as `"1:1"`
    pub crop_ratio: Option<String>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            mime_types: vec![IMAGE_MIME_WILDCARD.to_string()],
            enable_crop: false,
            crop_ratio: None,
        }
    }
}

/// Outcome code reported by the platform once the picker closes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerResultCode {
    Ok,
    Cancelled,
}

/// Payload attached to a finished picker interaction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PickerData {
    pub resource: Option<ResourceHandle>,
}

/// Result delivered by the platform when the picker UI finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerResult {
    pub code: PickerResultCode,
    pub data: Option<PickerData>,
}

impl PickerResult {
    /// User picked a resource.
    pub fn picked(handle: ResourceHandle) -> Self {
        Self {
            code: PickerResultCode::Ok,
            data: Some(PickerData {
                resource: Some(handle),
            }),
        }
    }

    /// User dismissed the picker.
    pub fn cancelled() -> Self {
        Self {
            code: PickerResultCode::Cancelled,
            data: None,
        }
    }

    /// Platform reported success but attached no payload at all.
    pub fn without_data() -> Self {
        Self {
            code: PickerResultCode::Ok,
            data: None,
        }
    }

    /// Platform attached a payload that carries no resource reference.
    pub fn without_resource() -> Self {
        Self {
            code: PickerResultCode::Ok,
            data: Some(PickerData::default()),
        }
    }
}

/// Bytes and metadata behind a [`ResourceHandle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedResource {
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub data: Bytes,
}

/// Native image picker
///
/// Implementations present the platform picker restricted to image content
/// and resolve once the user finishes:
/// - **iOS**: `UIImagePickerController` / `PHPickerViewController`
/// - **Android**: `ACTION_PICK` intent with `image/*`
/// - **Desktop**: native file dialog filtered to image extensions
///
/// A dismissed picker is reported as [`PickerResultCode::Cancelled`], not as
/// an error. Errors mean the picker could not be shown at all.
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick_image(&self, options: PickerOptions) -> Result<PickerResult>;
}

/// Turns an opaque picker handle into the bytes to upload
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    async fn resolve(&self, handle: &ResourceHandle) -> Result<PickedResource>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_image_only() {
        let options = PickerOptions::default();
        assert_eq!(options.mime_types, vec!["image/*".to_string()]);
        assert!(!options.enable_crop);
    }

    #[test]
    fn test_result_constructors() {
        let picked = PickerResult::picked(ResourceHandle::new("content://media/1"));
        assert_eq!(picked.code, PickerResultCode::Ok);
        assert_eq!(
            picked.data.and_then(|d| d.resource).map(|h| h.to_string()),
            Some("content://media/1".to_string())
        );

        assert_eq!(PickerResult::cancelled().code, PickerResultCode::Cancelled);
        assert!(PickerResult::without_data().data.is_none());
        assert_eq!(
            PickerResult::without_resource().data,
            Some(PickerData { resource: None })
        );
    }

    #[test]
    fn test_handle_serializes_as_plain_string() {
        let handle = ResourceHandle::new("/tmp/cat.png");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"/tmp/cat.png\"");
    }
}
