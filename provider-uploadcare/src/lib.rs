//! # Uploadcare Provider
//!
//! Direct uploads to the Uploadcare Upload API.
//!
//! ## Overview
//!
//! This module provides:
//! - A lazily configured client (`UploadcareClient::configure`)
//! - Uploads from raw bytes or from an opaque picker handle
//! - Signed uploads when a secret key is configured
//! - Normalization of the service's file metadata into a flat [`FileDescriptor`]
//!
//! Requests go out once; there is no retry or backoff at this layer.

pub mod client;
pub mod error;
pub mod signing;
pub mod types;

pub use client::{UploadcareClient, DEFAULT_MIME_TYPE};
pub use error::{Result, UploadcareError};
pub use signing::{UploadSignature, SIGNATURE_LIFETIME_SECS};
pub use types::{
    ClientAccess, ClientConfig, FileDescriptor, DEFAULT_CDN_BASE, DEFAULT_UPLOAD_BASE,
};
