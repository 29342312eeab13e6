//! Workspace facade crate.
//!
//! Exposes feature flags that map onto the workspace crates so host
//! applications can depend on `uploadcare-bridge` alone:
//!
//! - `desktop-shims`: reqwest HTTP client and filesystem resolver defaults
//! - `picker-dialog`: native file dialog as the default image picker
//!
//! With either feature enabled the plugin façade from `core-service` is
//! re-exported here.

#[cfg(any(feature = "desktop-shims", feature = "picker-dialog"))]
pub use core_service::{
    bootstrap, ConfigureRequest, DataUriRequest, FileDescriptor, PluginConfig,
    PluginConfigBuilder, PluginError, UploadOptions, UploadPlugin, UploadResult,
};
