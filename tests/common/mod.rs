//! Common test utilities for Fridge Chef
//!
//! Shared fixtures and helpers used across the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::time::Duration;

use fridge_chef::{Config, ModelSettings};
use tempfile::NamedTempFile;

/// Test configuration constants
pub mod constants {
    /// Model name used in every test request
    pub const TEST_MODEL: &str = "gemma3:4b";
    /// Bytes written into image fixtures
    pub const FAKE_IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";
    /// Base64 of `FAKE_IMAGE_BYTES`
    pub const FAKE_IMAGE_BASE64: &str = "iVBORw0KGgpub3QtcmVhbGx5LWEtcG5n";
    /// Address that refuses connections
    pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";
}

/// Config pointing at `ollama_url` with default model settings
pub fn test_config(ollama_url: &str) -> Config {
    Config {
        ollama_url: ollama_url.to_string(),
        request_timeout: None,
        model: ModelSettings {
            model: constants::TEST_MODEL.to_string(),
            ..ModelSettings::default()
        },
    }
}

/// Config with a short client-side timeout
pub fn test_config_with_timeout(ollama_url: &str, timeout: Duration) -> Config {
    Config {
        request_timeout: Some(timeout),
        ..test_config(ollama_url)
    }
}

/// Write a small fake image to a temp file
pub fn image_fixture() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("create temp image");
    file.write_all(constants::FAKE_IMAGE_BYTES)
        .expect("write temp image");
    file
}
