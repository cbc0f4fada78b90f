//! Mock infrastructure for testing external services
//!
//! Currently only the Ollama chat endpoint is mocked.

pub mod ollama;

pub use ollama::*;
