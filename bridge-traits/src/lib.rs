//! # Host Bridge Traits
//!
//! Platform abstraction traits that each host platform implements for the
//! upload plugin.
//!
//! ## Overview
//!
//! This crate defines the contract between the plugin core and the
//! platform-specific implementations. Each trait is a capability the core
//! needs but which is implemented differently per platform (desktop, iOS,
//! Android).
//!
//! ## Traits
//!
//! ### Networking
//! - [`HttpClient`](http::HttpClient) - Async HTTP with multipart bodies and progress callbacks
//!
//! ### Platform UI
//! - [`ImagePicker`](picker::ImagePicker) - Native image picker returning an opaque handle
//! - [`ResourceResolver`](picker::ResourceResolver) - Resolves a picked handle to bytes
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | iOS      | host adapter        | 📋 Planned |
//! | Android  | host adapter        | 📋 Planned |
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert platform errors into it with an actionable message.
//!
//! ## Thread Safety
//!
//! Bridge traits require `Send + Sync` so handles can be shared across
//! spawned tasks (the picker flow runs on its own task).

pub mod error;
pub mod http;
pub mod picker;
pub mod time;

pub use error::BridgeError;

pub use http::{
    FormPart, FormValue, HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartBody,
    ProgressCallback, TransferProgress,
};
pub use picker::{
    ImagePicker, PickedResource, PickerData, PickerOptions, PickerResult, PickerResultCode,
    ResourceHandle, ResourceResolver, IMAGE_MIME_WILDCARD,
};
pub use time::{Clock, ConsoleLogger, LogEntry, LogLevel, LoggerSink, SystemClock};
