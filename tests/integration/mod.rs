//! Integration tests for the Fridge Chef pipeline
//!
//! This module contains tests that exercise the public API over HTTP
//! against a mocked Ollama server.

mod gateway;
