//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the upload plugin:
//! - Logging and tracing infrastructure
//! - Plugin configuration (bridge injection with desktop defaults)
//!
//! ## Overview
//!
//! Other crates depend on this one for the logging conventions and for the
//! validated bundle of platform bridges the plugin runs on.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{PluginConfig, PluginConfigBuilder};
pub use error::{Error, Result};
