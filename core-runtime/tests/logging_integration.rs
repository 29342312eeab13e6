//! Integration tests for logging setup

use bridge_traits::time::{ConsoleLogger, LogLevel};
use core_runtime::logging::{
    init_logging, redact_if_sensitive, strip_path, LogFormat, LoggingConfig,
};
use std::sync::Arc;

#[test]
fn test_init_logging_installs_once() {
    // A process holds one global subscriber, so both cases live in one test.
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug)
        .with_logger_sink(Arc::new(ConsoleLogger::default()));

    init_logging(config.clone()).expect("first initialization succeeds");
    tracing::info!(target: "core_service", "Plugin loaded");

    let second = init_logging(config);
    assert!(second.is_err());
    assert!(second
        .unwrap_err()
        .to_string()
        .contains("Failed to initialize logging"));
}

#[test]
fn test_invalid_filter_is_rejected_before_install() {
    let config = LoggingConfig::default().with_filter("core_service=notalevel");
    let err = init_logging(config).unwrap_err();
    assert!(err.to_string().contains("Invalid log filter"));
}

#[test]
fn test_upload_credentials_are_redacted() {
    assert_eq!(redact_if_sensitive("secret_key", "s3cr3t"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("signature", "9f86d081"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer x"), "[REDACTED]");

    // Identifiers that are safe to log pass through.
    assert_eq!(redact_if_sensitive("uuid", "b2c1"), "b2c1");
    assert_eq!(redact_if_sensitive("mime_type", "image/png"), "image/png");
}

#[test]
fn test_emails_keep_only_first_character() {
    let redacted = redact_if_sensitive("uploader", "jo@example.com");
    assert!(redacted.starts_with('j'));
    assert!(!redacted.contains("example.com"));
}

#[test]
fn test_picked_paths_reduce_to_file_name() {
    assert_eq!(strip_path("/storage/emulated/0/DCIM/IMG_0001.jpg"), "IMG_0001.jpg");
    assert_eq!(strip_path("content://media/external/images/42"), "42");
    assert_eq!(strip_path("C:\\Users\\Jo\\Pictures\\cat.heic"), "cat.heic");
    assert_eq!(strip_path(""), "");
}

#[test]
fn test_default_format_follows_build_profile() {
    let config = LoggingConfig::default();

    #[cfg(debug_assertions)]
    assert_eq!(config.format, LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(config.format, LogFormat::Json);

    assert_eq!(config.level, LogLevel::Info);
    assert!(config.redact_pii);
}
