//! # Plugin Configuration Module
//!
//! Collects the platform bridges the upload plugin runs on.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a
//! `PluginConfig` holding every bridge the plugin needs. It enforces fail-fast
//! validation so a host learns about a missing capability at startup rather
//! than when the user first taps "upload".
//!
//! ## Required Dependencies
//!
//! - `HttpClient` - Upload API requests (desktop default: reqwest)
//! - `ResourceResolver` - Turns picker handles into bytes (desktop default: tokio fs)
//! - `ImagePicker` - Native picker UI (desktop default: rfd, `picker-dialog` feature)
//!
//! `Clock` always defaults to [`SystemClock`].
//!
//! When the `desktop-shims` feature is enabled, desktop-ready defaults are
//! injected for any bridge that was not provided.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::PluginConfig;
//! use std::sync::Arc;
//!
//! let config = PluginConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .image_picker(Arc::new(MyPicker))
//!     .resource_resolver(Arc::new(MyResolver))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{
    http::HttpClient,
    picker::{ImagePicker, PickerOptions, ResourceResolver, IMAGE_MIME_WILDCARD},
    time::{Clock, SystemClock},
};
use std::sync::Arc;

/// Bridges and defaults the upload plugin is built from.
#[derive(Clone)]
pub struct PluginConfig {
    pub http_client: Arc<dyn HttpClient>,
    pub image_picker: Arc<dyn ImagePicker>,
    pub resource_resolver: Arc<dyn ResourceResolver>,
    pub clock: Arc<dyn Clock>,
    /// Picker hints used when a call does not supply its own.
    pub picker_options: PickerOptions,
}

impl std::fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginConfig")
            .field("http_client", &"<HttpClient>")
            .field("image_picker", &"<ImagePicker>")
            .field("resource_resolver", &"<ResourceResolver>")
            .field("clock", &"<Clock>")
            .field("picker_options", &self.picker_options)
            .finish()
    }
}

impl PluginConfig {
    pub fn builder() -> PluginConfigBuilder {
        PluginConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// The picker is image-only, so every default MIME filter must sit under
    /// `image/`.
    pub fn validate(&self) -> Result<()> {
        if self.picker_options.mime_types.is_empty() {
            return Err(Error::Config(
                "Picker MIME filter cannot be empty. Use \"image/*\" to allow all images."
                    .to_string(),
            ));
        }

        if let Some(bad) = self
            .picker_options
            .mime_types
            .iter()
            .find(|mime| !is_image_mime(mime))
        {
            return Err(Error::Config(format!(
                "Picker MIME filter '{}' is not an image type",
                bad
            )));
        }

        Ok(())
    }
}

/// `true` for `image/*` and concrete `image/<subtype>` values.
pub fn is_image_mime(mime: &str) -> bool {
    mime == IMAGE_MIME_WILDCARD
        || mime
            .strip_prefix("image/")
            .is_some_and(|subtype| !subtype.is_empty())
}

#[cfg(not(feature = "desktop-shims"))]
fn capability_missing(capability: &str, purpose: &str) -> Error {
    Error::CapabilityMissing {
        capability: capability.to_string(),
        message: format!(
            "{} implementation is required {}. \
             Desktop: enable the 'desktop-shims' feature to use the default. \
             Mobile: inject the platform-native implementation.",
            capability, purpose
        ),
    }
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::new()
        .map_err(|e| Error::Internal(format!("Failed to create default HttpClient: {}", e)))?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Arc<dyn HttpClient>> {
    Err(capability_missing("HttpClient", "for Upload API requests"))
}

#[cfg(feature = "desktop-shims")]
fn provide_default_resource_resolver() -> Result<Arc<dyn ResourceResolver>> {
    Ok(Arc::new(bridge_desktop::TokioResourceResolver::new()))
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_resource_resolver() -> Result<Arc<dyn ResourceResolver>> {
    Err(capability_missing(
        "ResourceResolver",
        "to read the bytes behind a picked image",
    ))
}

#[cfg(feature = "picker-dialog")]
fn provide_default_image_picker() -> Result<Arc<dyn ImagePicker>> {
    Ok(Arc::new(bridge_desktop::RfdImagePicker::new()))
}

#[cfg(not(feature = "picker-dialog"))]
fn provide_default_image_picker() -> Result<Arc<dyn ImagePicker>> {
    Err(Error::CapabilityMissing {
        capability: "ImagePicker".to_string(),
        message: "ImagePicker implementation is required to present the image picker. \
                  Desktop: enable the 'picker-dialog' feature to use the native file dialog. \
                  Mobile: inject the platform photo picker."
            .to_string(),
    })
}

/// Builder for [`PluginConfig`].
#[derive(Default)]
pub struct PluginConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    image_picker: Option<Arc<dyn ImagePicker>>,
    resource_resolver: Option<Arc<dyn ResourceResolver>>,
    clock: Option<Arc<dyn Clock>>,
    picker_options: Option<PickerOptions>,
}

impl PluginConfigBuilder {
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn image_picker(mut self, picker: Arc<dyn ImagePicker>) -> Self {
        self.image_picker = Some(picker);
        self
    }

    pub fn resource_resolver(mut self, resolver: Arc<dyn ResourceResolver>) -> Self {
        self.resource_resolver = Some(resolver);
        self
    }

    /// Overrides the time source used for signature expiry and generated
    /// file names.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn picker_options(mut self, options: PickerOptions) -> Self {
        self.picker_options = Some(options);
        self
    }

    /// Builds the configuration, filling in platform defaults where allowed.
    ///
    /// # Errors
    ///
    /// - `CapabilityMissing` when a bridge was not injected and no default
    ///   exists for this build
    /// - `Config` when the picker defaults are not image types
    pub fn build(self) -> Result<PluginConfig> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => provide_default_http_client()?,
        };

        let resource_resolver = match self.resource_resolver {
            Some(resolver) => resolver,
            None => provide_default_resource_resolver()?,
        };

        let image_picker = match self.image_picker {
            Some(picker) => picker,
            None => provide_default_image_picker()?,
        };

        let config = PluginConfig {
            http_client,
            image_picker,
            resource_resolver,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            picker_options: self.picker_options.unwrap_or_default(),
        };

        config.validate()?;

        Ok(config)
    }
}
