//! Data URI decoding
//!
//! Accepts `<metadata>,<base64-payload>`. Only the first comma separates the
//! two halves; the payload is always decoded as standard base64.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use bytes::Bytes;

use crate::error::{PluginError, Result};

/// Standard alphabet; padding optional so hosts that strip `=` still work.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type named by the metadata segment, if any
    pub mime_type: Option<String>,
    pub data: Bytes,
}

/// Splits and decodes a data URI.
///
/// # Errors
///
/// - [`PluginError::InvalidFormat`] when there is no comma
/// - [`PluginError::InvalidEncoding`] when the payload is not valid base64
pub fn decode_data_uri(data_uri: &str) -> Result<DataUri> {
    let (metadata, payload) = data_uri
        .split_once(',')
        .ok_or(PluginError::InvalidFormat)?;

    // Line-wrapped payloads are common in pasted data URIs.
    let payload: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let data = PAYLOAD_ENGINE
        .decode(payload.as_bytes())
        .map_err(|e| PluginError::InvalidEncoding(e.to_string()))?;

    Ok(DataUri {
        mime_type: media_type(metadata),
        data: Bytes::from(data),
    })
}

/// `data:image/png;base64` -> `image/png`
fn media_type(metadata: &str) -> Option<String> {
    let metadata = metadata.trim();
    let metadata = metadata.strip_prefix("data:").unwrap_or(metadata);
    let media_type = metadata.split(';').next()?.trim();

    match media_type.split_once('/') {
        Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {
            Some(media_type.to_ascii_lowercase())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_png_payload() {
        let decoded = decode_data_uri("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(decoded.mime_type.as_deref(), Some("image/png"));
        assert_eq!(decoded.data.as_ref(), b"hello");
    }

    #[test]
    fn test_missing_comma() {
        assert_eq!(
            decode_data_uri("data:image/png;base64aGVsbG8="),
            Err(PluginError::InvalidFormat)
        );
    }

    #[test]
    fn test_malformed_base64() {
        let err = decode_data_uri("data:image/png;base64,!!!notbase64!!!").unwrap_err();
        assert!(matches!(err, PluginError::InvalidEncoding(_)));
        assert!(err.to_string().starts_with("Invalid base64 data in dataUri:"));
    }

    #[test]
    fn test_only_first_comma_splits() {
        // "a,b" is not base64, so the second comma must stay in the payload.
        let err = decode_data_uri("data:text/plain;base64,YQ==,Yg==").unwrap_err();
        assert!(matches!(err, PluginError::InvalidEncoding(_)));
    }

    #[test]
    fn test_unpadded_and_wrapped_payloads() {
        let decoded = decode_data_uri("data:image/gif;base64,aGVs\nbG8").unwrap();
        assert_eq!(decoded.data.as_ref(), b"hello");
    }

    #[test]
    fn test_metadata_without_media_type() {
        assert_eq!(decode_data_uri(",aGk=").unwrap().mime_type, None);
        assert_eq!(decode_data_uri("data:;base64,aGk=").unwrap().mime_type, None);
        assert_eq!(
            decode_data_uri("data:Image/JPEG;base64,aGk=").unwrap().mime_type.as_deref(),
            Some("image/jpeg")
        );
    }
}
