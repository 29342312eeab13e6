//! Upload plugin service façade.
//!
//! This crate wires host-provided bridges (HTTP, image picker, resource
//! resolver, clock) into the Uploadcare client and exposes the operations the
//! application layer calls: `configure`, `openUploader` and `uploadDataUri`.
//! Desktop hosts typically enable the `desktop-shims` feature (and
//! `picker-dialog` for the native file dialog); mobile hosts inject their own
//! bridges through [`PluginConfig`].

pub mod data_uri;
pub mod error;
pub mod plugin;
pub mod types;

pub use core_runtime::config::{PluginConfig, PluginConfigBuilder};
pub use error::{PluginError, Result};
pub use plugin::UploadPlugin;
pub use provider_uploadcare::FileDescriptor;
pub use types::{ConfigureRequest, DataUriRequest, UploadOptions, UploadResult};

/// Builds a plugin from platform defaults.
///
/// Fails with `CapabilityMissing` when this build has no default for a
/// required bridge; inject it through [`PluginConfig::builder`] instead.
pub fn bootstrap() -> core_runtime::Result<UploadPlugin> {
    PluginConfig::builder().build().map(UploadPlugin::new)
}
