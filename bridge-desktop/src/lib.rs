//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` (multipart uploads, progress callbacks)
//! - `ImagePicker` using the native file dialog from `rfd`
//! - `ResourceResolver` using `tokio::fs`
//!
//! ## Feature Flags
//!
//! - `picker-dialog`: Enable the native file dialog picker (default)
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, RfdImagePicker, TokioResourceResolver};
//!
//! let http_client = ReqwestHttpClient::new()?;
//! let picker = RfdImagePicker::new();
//! let resolver = TokioResourceResolver::new();
//! ```

mod http;
mod mime;
mod resolver;

#[cfg(feature = "picker-dialog")]
mod picker;

pub use http::ReqwestHttpClient;
pub use mime::{extensions_for_mime_types, mime_for_extension};
pub use resolver::TokioResourceResolver;

#[cfg(feature = "picker-dialog")]
pub use picker::RfdImagePicker;
