//! Signed upload parameters
//!
//! Uploadcare accepts `signature = hex(HMAC-SHA256(secret_key, expire))`
//! where `expire` is a unix timestamp in seconds.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Result, UploadcareError};

type HmacSha256 = Hmac<Sha256>;

/// How long a generated signature stays valid
pub const SIGNATURE_LIFETIME_SECS: i64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSignature {
    pub signature: String,
    pub expire: i64,
}

impl UploadSignature {
    /// Signs an upload valid until `now + SIGNATURE_LIFETIME_SECS`.
    pub fn generate(secret_key: &str, now: i64) -> Result<Self> {
        let expire = now + SIGNATURE_LIFETIME_SECS;

        let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|e| UploadcareError::Signing(e.to_string()))?;
        mac.update(expire.to_string().as_bytes());

        Ok(Self {
            signature: hex::encode(mac.finalize().into_bytes()),
            expire,
        })
    }
}
