//! Image Picker Implementation using the native file dialog (rfd)

use async_trait::async_trait;
use bridge_traits::{
    error::Result,
    picker::{ImagePicker, PickerOptions, PickerResult, ResourceHandle},
};
use tracing::{debug, info};

use crate::mime::extensions_for_mime_types;

/// Desktop image picker backed by the OS file dialog
///
/// Crop hints are ignored; the dialog has no crop step. A dismissed dialog
/// is reported as a cancelled pick.
pub struct RfdImagePicker {
    title: String,
}

impl RfdImagePicker {
    pub fn new() -> Self {
        Self::with_title("Select an image")
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for RfdImagePicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImagePicker for RfdImagePicker {
    async fn pick_image(&self, options: PickerOptions) -> Result<PickerResult> {
        let extensions = extensions_for_mime_types(&options.mime_types);
        debug!(?extensions, "Opening file dialog");

        let picked = rfd::AsyncFileDialog::new()
            .set_title(self.title.as_str())
            .add_filter("Images", extensions.as_slice())
            .pick_file()
            .await;

        match picked {
            Some(file) => {
                let path = file.path().to_string_lossy().into_owned();
                info!(file = %file.file_name(), "Image picked");
                Ok(PickerResult::picked(ResourceHandle::new(path)))
            }
            None => {
                info!("File dialog dismissed");
                Ok(PickerResult::cancelled())
            }
        }
    }
}
