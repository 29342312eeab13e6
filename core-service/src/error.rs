use provider_uploadcare::UploadcareError;
use thiserror::Error;

/// Errors surfaced to the calling application layer
///
/// `to_string()` is the rejection message the caller sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// A required request field is missing or empty
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Invalid dataUri format, missing comma")]
    InvalidFormat,

    #[error("Invalid base64 data in dataUri: {0}")]
    InvalidEncoding(String),

    #[error("Uploadcare client is not configured")]
    NotConfigured,

    #[error("An upload is already in progress")]
    AlreadyInProgress,

    #[error("No image selected")]
    NoImageSelected,

    #[error("{}", upload_failure_message(.0))]
    UploadFailed(String),

    /// The platform picker could not be shown at all
    #[error("Could not open image picker: {0}")]
    PickerUnavailable(String),

    #[error("File is too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Method not implemented: {0}")]
    UnknownMethod(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl PluginError {
    pub fn missing(field: &str) -> Self {
        Self::InvalidArgument(format!("{} is required", field))
    }

    /// Stable machine-readable code for bridge runtimes that carry one
    /// alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidEncoding(_) => "INVALID_ENCODING",
            Self::NotConfigured => "NOT_CONFIGURED",
            Self::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            Self::NoImageSelected => "NO_IMAGE_SELECTED",
            Self::UploadFailed(_) => "UPLOAD_FAILED",
            Self::PickerUnavailable(_) => "PICKER_UNAVAILABLE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::UnknownMethod(_) => "UNIMPLEMENTED",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

fn upload_failure_message(reason: &str) -> &str {
    if reason.is_empty() {
        "Upload failed"
    } else {
        reason
    }
}

impl From<UploadcareError> for PluginError {
    fn from(error: UploadcareError) -> Self {
        match error {
            UploadcareError::NotConfigured => PluginError::NotConfigured,
            UploadcareError::FileTooLarge { size, limit } => {
                PluginError::FileTooLarge { size, limit }
            }
            other => PluginError::UploadFailed(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PluginError>;

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::BridgeError;

    #[test]
    fn test_messages_seen_by_caller() {
        assert_eq!(PluginError::missing("publicKey").to_string(), "publicKey is required");
        assert_eq!(
            PluginError::AlreadyInProgress.to_string(),
            "An upload is already in progress"
        );
        assert_eq!(PluginError::NoImageSelected.to_string(), "No image selected");
        assert_eq!(
            PluginError::UnknownMethod("delete".into()).to_string(),
            "Method not implemented: delete"
        );
    }

    #[test]
    fn test_empty_upload_reason_is_generic() {
        assert_eq!(PluginError::UploadFailed(String::new()).to_string(), "Upload failed");
        assert_eq!(
            PluginError::UploadFailed("quota exceeded".into()).to_string(),
            "quota exceeded"
        );
    }

    #[test]
    fn test_uploadcare_errors_pass_through() {
        assert_eq!(
            PluginError::from(UploadcareError::NotConfigured),
            PluginError::NotConfigured
        );

        let bridged = PluginError::from(UploadcareError::Bridge(BridgeError::OperationFailed(
            "Request timed out".into(),
        )));
        assert_eq!(
            bridged,
            PluginError::UploadFailed("Bridge operation failed: Request timed out".into())
        );

        let too_large = PluginError::from(UploadcareError::FileTooLarge { size: 9, limit: 4 });
        assert_eq!(too_large.code(), "FILE_TOO_LARGE");
    }
}
